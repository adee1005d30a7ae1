use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::{Rc, Weak};

/// Window focus and visibility changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    Focus,
    Blur,
    Hidden,
    Visible,
}

impl LifecycleEvent {
    pub fn pauses(&self) -> bool {
        matches!(self, LifecycleEvent::Blur | LifecycleEvent::Hidden)
    }
}

type Queue = Rc<RefCell<VecDeque<LifecycleEvent>>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    listeners: Vec<(u64, Queue)>,
}

/// Fans lifecycle events out to every live [`Subscription`].
#[derive(Clone, Default)]
pub struct LifecycleHub {
    registry: Rc<RefCell<Registry>>,
}

impl LifecycleHub {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&self) -> Subscription {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        let queue = Queue::default();
        registry.listeners.push((id, queue.clone()));
        Subscription {
            id,
            queue,
            registry: Rc::downgrade(&self.registry),
        }
    }

    pub fn dispatch(&self, event: LifecycleEvent) {
        for (_, queue) in &self.registry.borrow().listeners {
            queue.borrow_mut().push_back(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().listeners.len()
    }
}

/// Registration handle. Dropping it unregisters the listener.
pub struct Subscription {
    id: u64,
    queue: Queue,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    pub fn drain(&self) -> Vec<LifecycleEvent> {
        self.queue.borrow_mut().drain(..).collect()
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().listeners.retain(|(id, _)| *id != self.id);
        }
    }
}
