//! Document-level pointer listeners.
//!
//! Components that need to react to clicks landing *outside* of themselves
//! (dropdowns, popovers) cannot rely on the owner routing mouse events to
//! them, since the owner only forwards events to the component under the
//! cursor. Instead they subscribe to a [`PointerHub`] while they are open.
//!
//! A subscription is a guard: dropping it removes the listener, so closing
//! the popup, committing a value or dropping the whole component all release
//! it the same way.

use crossterm::event::{MouseEvent, MouseEventKind};
use ratatui::layout::{Position, Rect};
use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::{Rc, Weak};

pub type ListenerId = u64;

struct Listener {
    boundary: Rect,
    outside_click: Rc<Cell<bool>>,
}

#[derive(Default)]
struct Registry {
    next_id: ListenerId,
    listeners: HashMap<ListenerId, Listener>,
}

/// Shared dispatcher for pointer-down events.
///
/// Cloning the hub is cheap; all clones share one registry.
#[derive(Clone, Default)]
pub struct PointerHub {
    registry: Rc<RefCell<Registry>>,
}

impl PointerHub {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new listener whose inside starts as `boundary`. It stays
    /// registered until the returned subscription is dropped.
    pub fn subscribe(&self, boundary: Rect) -> PointerSubscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;

        let outside_click = Rc::new(Cell::new(false));
        registry.listeners.insert(
            id,
            Listener {
                boundary,
                outside_click: Rc::clone(&outside_click),
            },
        );
        log::debug!("PointerHub: listener {} registered", id);

        PointerSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
            outside_click,
        }
    }

    /// Feed a mouse event to every listener. Only button presses count;
    /// moves, drags and wheel events are ignored.
    ///
    /// Returns the number of listeners that saw the press land outside of
    /// their boundary.
    pub fn dispatch(&self, mouse: &MouseEvent) -> usize {
        if !matches!(mouse.kind, MouseEventKind::Down(_)) {
            return 0;
        }

        let point = Position::new(mouse.column, mouse.row);
        let registry = self.registry.borrow();
        let mut notified = 0;
        for listener in registry.listeners.values() {
            if !listener.boundary.contains(point) {
                listener.outside_click.set(true);
                notified += 1;
            }
        }
        notified
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Live registration on a [`PointerHub`].
pub struct PointerSubscription {
    id: ListenerId,
    registry: Weak<RefCell<Registry>>,
    outside_click: Rc<Cell<bool>>,
}

impl PointerSubscription {
    pub fn id(&self) -> ListenerId {
        self.id
    }

    /// Update the on-screen area considered "inside" the subscriber.
    pub fn set_boundary(&self, boundary: Rect) {
        if let Some(registry) = self.registry.upgrade() {
            if let Some(listener) = registry.borrow_mut().listeners.get_mut(&self.id) {
                listener.boundary = boundary;
            }
        }
    }

    /// Returns whether a press landed outside since the last call, and
    /// resets the flag.
    pub fn take_outside_click(&self) -> bool {
        self.outside_click.replace(false)
    }
}

impl Drop for PointerSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.remove(&self.id);
            log::debug!("PointerHub: listener {} released", self.id);
        }
    }
}
