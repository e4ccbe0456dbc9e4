//! Scoped ownership across a detach/reattach pair.

use crate::shell::widget::{Container, Widget, WidgetError};
use std::rc::{Rc, Weak};

/// A widget that has been taken out of its container and not yet packed
/// into a new one.
///
/// The guard holds the only strong reference while the widget is between
/// parents. [`Reparent::attach`] hands that reference to the new container.
/// Dropping the guard without attaching destroys the widget.
#[must_use = "a detached widget is destroyed unless it is attached"]
pub struct Reparent {
    widget: Option<Rc<Widget>>,
}

impl Reparent {
    /// Take the widget behind `handle` out of whatever container holds it.
    ///
    /// A parentless widget is accepted as-is.
    pub fn detach(handle: &Weak<Widget>, name: &'static str) -> Result<Self, WidgetError> {
        let widget = handle.upgrade().ok_or(WidgetError::Destroyed(name))?;
        if let Some(parent) = widget.parent() {
            // The container's reference is released here; `widget` keeps it alive.
            drop(parent.remove(&widget)?);
            log::trace!("Detached '{}' from '{}'", widget.name(), parent.name());
        }
        Ok(Self {
            widget: Some(widget),
        })
    }

    /// The widget being moved, for adjusting its state between parents.
    pub fn widget(&self) -> Option<&Widget> {
        self.widget.as_deref()
    }

    /// Pack the widget at the end of `container` and release the guard.
    pub fn attach(mut self, container: &Rc<Container>) -> Result<(), WidgetError> {
        let Some(widget) = self.widget.take() else {
            return Ok(());
        };
        let name = widget.name();
        container.append(widget)?;
        log::trace!("Attached '{}' to '{}'", name, container.name());
        Ok(())
    }
}

impl Drop for Reparent {
    fn drop(&mut self) {
        if let Some(widget) = self.widget.take() {
            log::warn!(
                "Widget '{}' dropped while detached; it will be destroyed",
                widget.name()
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shell::header_bar::HeaderBar;

    #[test]
    fn test_move_preserves_identity() {
        let from = Container::new("from");
        let to = Container::new("to");
        let widget = Widget::header_bar(HeaderBar::new("a.md", ""));
        let id = widget.id();
        let handle = Rc::downgrade(&widget);
        from.append(widget).unwrap();

        let guard = Reparent::detach(&handle, "header_bar").unwrap();
        assert!(!from.contains(id));
        guard.attach(&to).unwrap();

        assert!(to.contains(id));
        assert_eq!(handle.upgrade().map(|w| w.id()), Some(id));
        // The container is again the sole owner
        assert_eq!(handle.strong_count(), 1);
    }

    #[test]
    fn test_dropped_guard_destroys_widget() {
        let from = Container::new("from");
        let widget = Widget::header_bar(HeaderBar::new("a.md", ""));
        let handle = Rc::downgrade(&widget);
        from.append(widget).unwrap();

        let guard = Reparent::detach(&handle, "header_bar").unwrap();
        drop(guard);
        assert!(handle.upgrade().is_none());
    }

    #[test]
    fn test_detach_destroyed_widget() {
        let handle = Rc::downgrade(&Widget::header_bar(HeaderBar::new("a.md", "")));
        assert!(matches!(
            Reparent::detach(&handle, "header_bar"),
            Err(WidgetError::Destroyed("header_bar"))
        ));
    }
}
