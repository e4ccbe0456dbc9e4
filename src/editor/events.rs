//! Notifications an [`Editor`](super::Editor) sends to whoever displays it.

use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorEvent {
    /// The display title changed (file name, modified marker).
    TitleChanged(String),
    /// The display subtitle changed (containing directory).
    SubtitleChanged(String),
    /// The buffer was written to disk.
    Saved(PathBuf),
}

/// Handle returned by [`Editor::subscribe`](super::Editor::subscribe).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(&EditorEvent)>;

/// Listener list, in subscription order.
#[derive(Default)]
pub struct Subscribers {
    next_id: u64,
    listeners: Vec<(SubscriptionId, Listener)>,
}

impl Subscribers {
    pub fn add(&mut self, listener: impl FnMut(&EditorEvent) + 'static) -> SubscriptionId {
        self.next_id += 1;
        let id = SubscriptionId(self.next_id);
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns false when `id` was not subscribed.
    pub fn remove(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(existing, _)| *existing != id);
        self.listeners.len() != before
    }

    pub fn emit(&mut self, event: &EditorEvent) {
        log::trace!("Editor event {:?} -> {} listener(s)", event, self.listeners.len());
        for (_, listener) in &mut self.listeners {
            listener(event);
        }
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

impl std::fmt::Debug for Subscribers {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Subscribers")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_emit_reaches_every_listener_in_order() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut subscribers = Subscribers::default();
        for tag in ["first", "second"] {
            let seen = Rc::clone(&seen);
            subscribers.add(move |event| seen.borrow_mut().push((tag, event.clone())));
        }

        subscribers.emit(&EditorEvent::TitleChanged("a.md".into()));
        let seen = seen.borrow();
        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].0, "first");
        assert_eq!(seen[1].1, EditorEvent::TitleChanged("a.md".into()));
    }

    #[test]
    fn test_remove_stops_delivery() {
        let count = Rc::new(RefCell::new(0));
        let mut subscribers = Subscribers::default();
        let id = {
            let count = Rc::clone(&count);
            subscribers.add(move |_| *count.borrow_mut() += 1)
        };

        assert!(subscribers.remove(id));
        assert!(!subscribers.remove(id));
        subscribers.emit(&EditorEvent::SubtitleChanged(String::new()));
        assert_eq!(*count.borrow(), 0);
        assert!(subscribers.is_empty());
    }
}
