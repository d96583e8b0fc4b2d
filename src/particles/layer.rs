//! Lifecycle driver for the particle background.
//!
//! A [`ParticleLayer`] exists only while the background is mounted on a usable
//! surface. It owns the pointer state (written only by [`ParticleLayer::handle_event`]),
//! the pending frame request and the registered listeners, and releases the last two
//! exactly once on [`ParticleLayer::dispose`] or drop.

use super::{ParticleField, PointerState, Surface, SurfaceMetrics};
use crate::lifecycle::{FrameRequestId, FrameScheduler, ListenerKind, ListenerSet};
use eframe::egui::Pos2;

/// Listeners the background registers on mount.
const LAYER_LISTENERS: [ListenerKind; 5] = [
    ListenerKind::Resize,
    ListenerKind::PointerMove,
    ListenerKind::PointerLeave,
    ListenerKind::TouchMove,
    ListenerKind::TouchEnd,
];

/// Input delivered to the background, in surface-relative displayed units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// The surface was re-measured
    Resize(SurfaceMetrics),
    /// The pointer moved over the surface
    PointerMove(Pos2),
    /// The pointer left the surface
    PointerLeave,
    /// A touch moved; `None` when the event carried no touch point
    TouchMove(Option<Pos2>),
    /// The touch ended
    TouchEnd,
}

impl InputEvent {
    /// The listener kind that must be registered for this event to be handled.
    pub fn kind(&self) -> ListenerKind {
        match self {
            InputEvent::Resize(_) => ListenerKind::Resize,
            InputEvent::PointerMove(_) => ListenerKind::PointerMove,
            InputEvent::PointerLeave => ListenerKind::PointerLeave,
            InputEvent::TouchMove(_) => ListenerKind::TouchMove,
            InputEvent::TouchEnd => ListenerKind::TouchEnd,
        }
    }
}

/// A mounted, animating particle background.
pub struct ParticleLayer<S: FrameScheduler> {
    field: ParticleField,
    pointer: PointerState,
    scheduler: S,
    pending_frame: Option<FrameRequestId>,
    listeners: ListenerSet,
}

impl<S: FrameScheduler> ParticleLayer<S> {
    /// Mounts `field` on a surface and starts the frame loop.
    ///
    /// Returns `None` without requesting a frame when the surface could not be
    /// measured; the background then simply draws nothing.
    pub fn mount(
        mut field: ParticleField,
        surface: Option<SurfaceMetrics>,
        mut scheduler: S,
    ) -> Option<Self> {
        let Some(metrics) = surface else {
            log::warn!("Particle surface unavailable; background disabled");
            return None;
        };
        field.resize(metrics);

        let mut listeners = ListenerSet::new();
        for kind in LAYER_LISTENERS {
            listeners.register(kind);
        }
        let pending_frame = Some(scheduler.request_frame());
        log::debug!(
            "Particle layer mounted at {}x{} (ratio {})",
            metrics.width,
            metrics.height,
            metrics.pixel_ratio
        );

        Some(Self {
            field,
            pointer: PointerState::default(),
            scheduler,
            pending_frame,
            listeners,
        })
    }

    /// The simulated field.
    pub fn field(&self) -> &ParticleField {
        &self.field
    }

    /// The latest pointer state.
    pub fn pointer(&self) -> &PointerState {
        &self.pointer
    }

    /// The frame scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// True while a frame is scheduled.
    pub fn is_running(&self) -> bool {
        self.pending_frame.is_some()
    }

    /// True while `kind` is registered.
    pub fn is_listening(&self, kind: ListenerKind) -> bool {
        self.listeners.is_registered(kind)
    }

    /// Applies an input event. Events whose listener is not registered are dropped.
    pub fn handle_event(&mut self, event: InputEvent) {
        if !self.listeners.is_registered(event.kind()) {
            return;
        }
        match event {
            InputEvent::Resize(metrics) => {
                log::debug!("Particle surface resized to {}x{}", metrics.width, metrics.height);
                self.field.resize(metrics);
            }
            InputEvent::PointerMove(pos) | InputEvent::TouchMove(Some(pos)) => {
                self.pointer.move_to(pos.x, pos.y);
            }
            InputEvent::TouchMove(None) => {}
            InputEvent::PointerLeave | InputEvent::TouchEnd => self.pointer.leave(),
        }
    }

    /// Runs one scheduled frame: step, render, then schedule the next one.
    ///
    /// Returns false (and draws nothing) when no frame was pending.
    pub fn on_frame(&mut self, surface: &mut dyn Surface) -> bool {
        if self.pending_frame.take().is_none() {
            return false;
        }
        self.field.step(&self.pointer);
        self.field.render(surface);
        self.pending_frame = Some(self.scheduler.request_frame());
        true
    }

    /// Cancels the pending frame and removes every listener.
    ///
    /// Returns true if anything was released; later calls are no-ops.
    pub fn dispose(&mut self) -> bool {
        let frame = self.pending_frame.take();
        if let Some(id) = frame {
            self.scheduler.cancel_frame(id);
        }
        let removed = self.listeners.remove_all();
        let released = frame.is_some() || !removed.is_empty();
        if released {
            log::debug!("Particle layer disposed ({} listeners removed)", removed.len());
        }
        released
    }
}

impl<S: FrameScheduler> Drop for ParticleLayer<S> {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::tests::RecordingSurface;
    use crate::particles::{FieldConfig, Node};
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[derive(Debug, Default)]
    struct SchedulerLog {
        requested: Vec<FrameRequestId>,
        cancelled: Vec<FrameRequestId>,
    }

    #[derive(Clone, Default)]
    struct FakeScheduler {
        log: Rc<RefCell<SchedulerLog>>,
    }

    impl FrameScheduler for FakeScheduler {
        fn request_frame(&mut self) -> FrameRequestId {
            let mut log = self.log.borrow_mut();
            let id = log.requested.len() as FrameRequestId + 1;
            log.requested.push(id);
            id
        }

        fn cancel_frame(&mut self, id: FrameRequestId) {
            self.log.borrow_mut().cancelled.push(id);
        }
    }

    fn field() -> ParticleField {
        ParticleField::with_rng(FieldConfig { node_count: 12 }, &mut StdRng::seed_from_u64(3))
    }

    fn surface() -> Option<SurfaceMetrics> {
        SurfaceMetrics::measure(640.0, 480.0, 2.0)
    }

    #[test]
    fn unavailable_surface_starts_nothing() {
        let scheduler = FakeScheduler::default();
        let log = scheduler.log.clone();
        assert!(ParticleLayer::mount(field(), None, scheduler).is_none());
        assert!(log.borrow().requested.is_empty());
        assert!(log.borrow().cancelled.is_empty());
    }

    #[test]
    fn mount_requests_a_frame_and_registers_listeners() {
        let layer = ParticleLayer::mount(field(), surface(), FakeScheduler::default()).unwrap();
        assert!(layer.is_running());
        assert_eq!(layer.scheduler().log.borrow().requested, vec![1]);
        for kind in LAYER_LISTENERS {
            assert!(layer.is_listening(kind));
        }
        assert!(!layer.is_listening(ListenerKind::KeyDown));
    }

    #[test]
    fn each_frame_steps_renders_and_reschedules() {
        let mut layer = ParticleLayer::mount(field(), surface(), FakeScheduler::default()).unwrap();
        let before = layer.field().nodes().to_vec();
        let mut canvas = RecordingSurface::default();

        assert!(layer.on_frame(&mut canvas));
        assert_eq!(canvas.clears, 1);
        assert_eq!(canvas.circles.len(), 12);
        assert_ne!(layer.field().nodes(), before.as_slice());
        assert_eq!(layer.scheduler().log.borrow().requested, vec![1, 2]);
    }

    #[test]
    fn dispose_is_idempotent() {
        let mut layer = ParticleLayer::mount(field(), surface(), FakeScheduler::default()).unwrap();
        let log = layer.scheduler().log.clone();

        assert!(layer.dispose());
        assert!(!layer.dispose());
        assert_eq!(log.borrow().cancelled, vec![1]);
        assert!(!layer.is_running());
        assert!(!layer.is_listening(ListenerKind::Resize));

        drop(layer);
        assert_eq!(log.borrow().cancelled, vec![1]);
    }

    #[test]
    fn drop_releases_the_pending_frame() {
        let layer = ParticleLayer::mount(field(), surface(), FakeScheduler::default()).unwrap();
        let log = layer.scheduler().log.clone();
        drop(layer);
        assert_eq!(log.borrow().cancelled, vec![1]);
    }

    #[test]
    fn disposed_layer_ignores_frames_and_input() {
        let mut layer = ParticleLayer::mount(field(), surface(), FakeScheduler::default()).unwrap();
        layer.dispose();
        let mut canvas = RecordingSurface::default();
        assert!(!layer.on_frame(&mut canvas));
        assert_eq!(canvas.clears, 0);

        layer.handle_event(InputEvent::PointerMove(Pos2::new(10.0, 10.0)));
        assert!(!layer.pointer().active);
    }

    #[test]
    fn pointer_and_touch_events_drive_the_pointer_state() {
        let mut layer = ParticleLayer::mount(field(), surface(), FakeScheduler::default()).unwrap();

        layer.handle_event(InputEvent::PointerMove(Pos2::new(12.0, 34.0)));
        assert_eq!(
            *layer.pointer(),
            PointerState {
                x: 12.0,
                y: 34.0,
                active: true
            }
        );

        layer.handle_event(InputEvent::PointerLeave);
        assert!(!layer.pointer().active);

        layer.handle_event(InputEvent::TouchMove(None));
        assert!(!layer.pointer().active);

        layer.handle_event(InputEvent::TouchMove(Some(Pos2::new(5.0, 6.0))));
        assert!(layer.pointer().active);
        assert_eq!((layer.pointer().x, layer.pointer().y), (5.0, 6.0));

        layer.handle_event(InputEvent::TouchEnd);
        assert!(!layer.pointer().active);
    }

    #[test]
    fn resize_keeps_nodes() {
        let node = Node {
            x: 0.3,
            y: 0.7,
            vx: 0.0,
            vy: 0.0,
            radius: 2.0,
        };
        let mut layer = ParticleLayer::mount(
            ParticleField::from_nodes(vec![node]),
            surface(),
            FakeScheduler::default(),
        )
        .unwrap();
        let bigger = SurfaceMetrics::measure(1280.0, 960.0, 1.0).unwrap();
        layer.handle_event(InputEvent::Resize(bigger));
        assert_eq!(layer.field().metrics(), Some(bigger));
        assert_eq!(layer.field().nodes(), &[node]);
    }
}
