//! Retained widget tree the window chrome is built from.
//!
//! Containers own their children (`Rc<Widget>`). Anything else that needs to
//! refer to a widget keeps a `Weak` handle, so a widget that is removed from
//! its last container without someone holding a strong reference is gone.

use crate::editor::Editor;
use crate::shell::header_bar::HeaderBar;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicU64, Ordering};

static NEXT_WIDGET_ID: AtomicU64 = AtomicU64::new(1);

/// Stable identity of a widget, preserved across reparenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(u64);

impl WidgetId {
    fn next() -> Self {
        Self(NEXT_WIDGET_ID.fetch_add(1, Ordering::Relaxed))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum WidgetError {
    #[error("widget '{0}' was destroyed")]
    Destroyed(&'static str),
    #[error("widget '{widget}' already has parent '{parent}'")]
    AlreadyParented {
        widget: &'static str,
        parent: &'static str,
    },
    #[error("widget '{widget}' is not a child of '{container}'")]
    NotAChild {
        widget: &'static str,
        container: &'static str,
    },
}

/// What a widget displays.
pub enum WidgetContent {
    HeaderBar(RefCell<HeaderBar>),
    Editor(RefCell<Editor>),
}

pub struct Widget {
    id: WidgetId,
    name: &'static str,
    content: WidgetContent,
    parent: RefCell<Weak<Container>>,
}

impl Widget {
    fn new(name: &'static str, content: WidgetContent) -> Rc<Self> {
        Rc::new(Self {
            id: WidgetId::next(),
            name,
            content,
            parent: RefCell::new(Weak::new()),
        })
    }

    pub fn header_bar(header_bar: HeaderBar) -> Rc<Self> {
        Self::new("header_bar", WidgetContent::HeaderBar(RefCell::new(header_bar)))
    }

    pub fn editor(editor: Editor) -> Rc<Self> {
        Self::new("editor", WidgetContent::Editor(RefCell::new(editor)))
    }

    pub fn id(&self) -> WidgetId {
        self.id
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn content(&self) -> &WidgetContent {
        &self.content
    }

    pub fn as_header_bar(&self) -> Option<&RefCell<HeaderBar>> {
        match &self.content {
            WidgetContent::HeaderBar(bar) => Some(bar),
            WidgetContent::Editor(_) => None,
        }
    }

    pub fn as_editor(&self) -> Option<&RefCell<Editor>> {
        match &self.content {
            WidgetContent::Editor(editor) => Some(editor),
            WidgetContent::HeaderBar(_) => None,
        }
    }

    /// The container this widget is packed in, if any.
    pub fn parent(&self) -> Option<Rc<Container>> {
        self.parent.borrow().upgrade()
    }
}

impl std::fmt::Debug for Widget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Widget")
            .field("id", &self.id)
            .field("name", &self.name)
            .finish()
    }
}

/// A vertical box: children are laid out top to bottom in pack order.
#[derive(Debug)]
pub struct Container {
    name: &'static str,
    children: RefCell<Vec<Rc<Widget>>>,
}

impl Container {
    pub fn new(name: &'static str) -> Rc<Self> {
        Rc::new(Self {
            name,
            children: RefCell::new(Vec::new()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Pack `widget` after the existing children.
    ///
    /// The widget must be parentless; a widget lives in one container at a time.
    pub fn append(self: &Rc<Self>, widget: Rc<Widget>) -> Result<(), WidgetError> {
        if let Some(parent) = widget.parent() {
            return Err(WidgetError::AlreadyParented {
                widget: widget.name,
                parent: parent.name,
            });
        }
        *widget.parent.borrow_mut() = Rc::downgrade(self);
        self.children.borrow_mut().push(widget);
        Ok(())
    }

    /// Unpack `widget`, handing the container's reference to the caller.
    ///
    /// Dropping the returned `Rc` destroys the widget unless another strong
    /// reference exists.
    pub fn remove(&self, widget: &Widget) -> Result<Rc<Widget>, WidgetError> {
        let mut children = self.children.borrow_mut();
        let index = children
            .iter()
            .position(|child| child.id == widget.id)
            .ok_or(WidgetError::NotAChild {
                widget: widget.name,
                container: self.name,
            })?;
        let removed = children.remove(index);
        *removed.parent.borrow_mut() = Weak::new();
        Ok(removed)
    }

    pub fn contains(&self, id: WidgetId) -> bool {
        self.children.borrow().iter().any(|child| child.id == id)
    }

    /// Index of the child `id` in pack order.
    pub fn position(&self, id: WidgetId) -> Option<usize> {
        self.children.borrow().iter().position(|child| child.id == id)
    }

    /// Snapshot of the children in layout order.
    pub fn children(&self) -> Vec<Rc<Widget>> {
        self.children.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.children.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.borrow().is_empty()
    }
}
