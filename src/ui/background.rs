//! egui glue for the particle background.
//!
//! The background is painted on egui's background layer across the whole window.
//! Frames are driven by repaint requests, input is translated from the raw egui
//! event stream into surface-relative [`InputEvent`]s.

use super::state::PortfolioApp;
use crate::constants::GRADIENT_SEGMENTS;
use crate::lifecycle::{FrameRequestId, FrameScheduler};
use crate::particles::{
    FieldConfig, InputEvent, ParticleField, ParticleLayer, RadialGradient, Surface, SurfaceMetrics,
};
use eframe::egui::{self, Color32, Pos2, Rect};

/// Schedules frames by asking egui for a repaint.
pub struct RepaintScheduler {
    ctx: egui::Context,
    next_id: FrameRequestId,
    pending: Option<FrameRequestId>,
}

impl RepaintScheduler {
    /// Creates a scheduler for `ctx`.
    pub fn new(ctx: egui::Context) -> Self {
        Self {
            ctx,
            next_id: 0,
            pending: None,
        }
    }

    /// The request that has not been consumed or cancelled yet.
    pub fn pending(&self) -> Option<FrameRequestId> {
        self.pending
    }
}

impl FrameScheduler for RepaintScheduler {
    fn request_frame(&mut self) -> FrameRequestId {
        self.next_id += 1;
        self.pending = Some(self.next_id);
        self.ctx.request_repaint();
        self.next_id
    }

    fn cancel_frame(&mut self, id: FrameRequestId) {
        // egui cannot revoke a repaint; not re-requesting is what stops the loop
        if self.pending == Some(id) {
            self.pending = None;
        }
    }
}

/// A [`Surface`] backed by an egui painter.
pub struct PainterSurface<'a> {
    painter: &'a egui::Painter,
    rect: Rect,
    background: Color32,
}

impl<'a> PainterSurface<'a> {
    /// Draws into `rect` of `painter`, clearing to `background`.
    pub fn new(painter: &'a egui::Painter, rect: Rect, background: Color32) -> Self {
        Self {
            painter,
            rect,
            background,
        }
    }

    fn to_screen(&self, p: Pos2) -> Pos2 {
        self.rect.min + p.to_vec2()
    }
}

/// Builds a mesh of concentric rings approximating `gradient`, reaching at least `far`.
pub fn gradient_mesh(gradient: &RadialGradient, origin: Pos2, far: f32) -> egui::Mesh {
    let mut mesh = egui::Mesh::default();
    let (Some(first), Some(last)) = (gradient.stops.first(), gradient.stops.last()) else {
        return mesh;
    };

    let mut rings: Vec<(f32, Color32)> = vec![(0.0, first.color), (gradient.inner_radius, first.color)];
    rings.extend(
        gradient
            .stops
            .iter()
            .map(|s| (gradient.radius_for_offset(s.offset), s.color)),
    );
    if far > gradient.outer_radius {
        rings.push((far, last.color));
    }

    let center = origin + gradient.center.to_vec2();
    let n = GRADIENT_SEGMENTS;
    for (radius, color) in &rings {
        for s in 0..n {
            let angle = std::f32::consts::TAU * s as f32 / n as f32;
            mesh.colored_vertex(center + egui::vec2(angle.cos(), angle.sin()) * *radius, *color);
        }
    }
    for k in 0..rings.len() - 1 {
        for s in 0..n {
            let a = (k * n + s) as u32;
            let b = (k * n + (s + 1) % n) as u32;
            let c = ((k + 1) * n + s) as u32;
            let d = ((k + 1) * n + (s + 1) % n) as u32;
            mesh.add_triangle(a, b, c);
            mesh.add_triangle(b, d, c);
        }
    }
    mesh
}

impl Surface for PainterSurface<'_> {
    fn clear(&mut self) {
        self.painter.rect_filled(self.rect, 0.0, self.background);
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        let center = self.to_screen(gradient.center);
        // Far enough to cover the corner furthest from the centre
        let far = [
            self.rect.left_top(),
            self.rect.right_top(),
            self.rect.left_bottom(),
            self.rect.right_bottom(),
        ]
        .iter()
        .map(|corner| corner.distance(center))
        .fold(0.0_f32, f32::max);
        let mesh = gradient_mesh(gradient, self.rect.min, far);
        self.painter.add(egui::Shape::mesh(mesh));
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        self.painter.line_segment(
            [self.to_screen(from), self.to_screen(to)],
            egui::Stroke::new(width, color),
        );
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        self.painter
            .circle_filled(self.to_screen(center), radius, color);
    }
}

/// Translates this frame's raw input into background events for a surface at `rect`.
pub fn input_events(ctx: &egui::Context, rect: Rect) -> Vec<InputEvent> {
    let local = |pos: Pos2| (pos - rect.min).to_pos2();
    ctx.input(|i| {
        i.events
            .iter()
            .filter_map(|event| match event {
                egui::Event::PointerMoved(pos) if rect.contains(*pos) => {
                    Some(InputEvent::PointerMove(local(*pos)))
                }
                egui::Event::PointerMoved(_) | egui::Event::PointerGone => {
                    Some(InputEvent::PointerLeave)
                }
                egui::Event::Touch { phase, pos, .. } => match phase {
                    egui::TouchPhase::Move => Some(InputEvent::TouchMove(Some(local(*pos)))),
                    egui::TouchPhase::End | egui::TouchPhase::Cancel => Some(InputEvent::TouchEnd),
                    egui::TouchPhase::Start => None,
                },
                _ => None,
            })
            .collect()
    })
}

/// Measures the window as a particle surface.
pub fn measure(ctx: &egui::Context) -> (Rect, Option<SurfaceMetrics>) {
    let rect = ctx.input(|i| i.screen_rect());
    let metrics = SurfaceMetrics::measure(rect.width(), rect.height(), ctx.pixels_per_point());
    (rect, metrics)
}

impl PortfolioApp {
    /// Mounts the background once per enable (retrying a failed mount once the
    /// window has a size), then runs one frame of it.
    pub fn update_background(&mut self, ctx: &egui::Context) {
        if !self.motion_enabled {
            return;
        }
        let (rect, metrics) = measure(ctx);

        if self.background.needs_mount(metrics) {
            self.background.mount_attempted = true;
            self.background.layer = ParticleLayer::mount(
                ParticleField::new(FieldConfig::default()),
                metrics,
                RepaintScheduler::new(ctx.clone()),
            );
        }
        let Some(layer) = self.background.layer.as_mut() else {
            return;
        };

        if let Some(metrics) = metrics {
            if layer.field().metrics() != Some(metrics) {
                layer.handle_event(InputEvent::Resize(metrics));
            }
        }
        for event in input_events(ctx, rect) {
            layer.handle_event(event);
        }

        let painter = ctx.layer_painter(egui::LayerId::background());
        let background = ctx.style().visuals.extreme_bg_color;
        let mut surface = PainterSurface::new(&painter, rect, background);
        layer.on_frame(&mut surface);
    }
}
