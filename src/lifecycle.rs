//! Frame scheduling and listener registration.
//!
//! Components that own recurring work (the particle loop, the hotkey listener, the
//! chapter observer) record what they have registered so that disposal can release
//! exactly what was acquired, once.

use std::collections::BTreeSet;

/// Handle returned by [`FrameScheduler::request_frame`].
pub type FrameRequestId = u64;

/// A request-next-frame primitive.
///
/// Implementations schedule a single callback for the next display refresh. The
/// driver owning the scheduler re-requests from inside each frame.
pub trait FrameScheduler {
    /// Schedules the next frame and returns a handle that can cancel it.
    fn request_frame(&mut self) -> FrameRequestId;
    /// Cancels a pending request. Unknown or stale handles are ignored.
    fn cancel_frame(&mut self, id: FrameRequestId);
}

/// Kinds of input a component can listen for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ListenerKind {
    /// Window resized
    Resize,
    /// Pointer moved over the surface
    PointerMove,
    /// Pointer left the surface
    PointerLeave,
    /// Touch point moved
    TouchMove,
    /// Touch ended or was cancelled
    TouchEnd,
    /// Key pressed
    KeyDown,
}

/// The set of listeners a component currently holds.
#[derive(Debug, Default, Clone)]
pub struct ListenerSet {
    kinds: BTreeSet<ListenerKind>,
}

impl ListenerSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a listener. Returns false if it was already registered.
    pub fn register(&mut self, kind: ListenerKind) -> bool {
        self.kinds.insert(kind)
    }

    /// Returns true while `kind` is registered.
    pub fn is_registered(&self, kind: ListenerKind) -> bool {
        self.kinds.contains(&kind)
    }

    /// Number of registered listeners.
    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    /// Returns true if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }

    /// Removes every listener and returns what was removed, in a stable order.
    pub fn remove_all(&mut self) -> Vec<ListenerKind> {
        std::mem::take(&mut self.kinds).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_is_idempotent() {
        let mut set = ListenerSet::new();
        assert!(set.register(ListenerKind::Resize));
        assert!(!set.register(ListenerKind::Resize));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn remove_all_empties_the_set_once() {
        let mut set = ListenerSet::new();
        set.register(ListenerKind::TouchEnd);
        set.register(ListenerKind::Resize);
        assert_eq!(
            set.remove_all(),
            vec![ListenerKind::Resize, ListenerKind::TouchEnd]
        );
        assert!(set.is_empty());
        assert!(set.remove_all().is_empty());
        assert!(!set.is_registered(ListenerKind::Resize));
    }
}
