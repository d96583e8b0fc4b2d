//! Export utilities: render the particle background to a PNG snapshot.
//!
//! Notes:
//! - Native targets only; the wasm build has no snapshot button.
//! - The snapshot is rendered at the backing resolution (displayed size times the
//!   integer pixel ratio), with the same drawing commands as the live background.

use crate::particles::{ParticleField, RadialGradient, Surface};
use eframe::egui::{Color32, Pos2};
use tiny_skia::{FillRule, Paint, PathBuilder, Pixmap, SpreadMode, Stroke, Transform};

use super::state::PortfolioApp;

fn skia_color(color: Color32) -> tiny_skia::Color {
    let [r, g, b, a] = color.to_srgba_unmultiplied();
    tiny_skia::Color::from_rgba8(r, g, b, a)
}

fn solid_paint(color: Color32) -> Paint<'static> {
    let mut paint = Paint {
        anti_alias: true,
        ..Default::default()
    };
    paint.set_color(skia_color(color));
    paint
}

/// A [`Surface`] rasterizing into a tiny-skia pixmap.
pub struct PixmapSurface<'a> {
    pixmap: &'a mut Pixmap,
    transform: Transform,
    background: Color32,
}

impl<'a> PixmapSurface<'a> {
    /// Draws into `pixmap`, scaling displayed units by `pixel_ratio`.
    pub fn new(pixmap: &'a mut Pixmap, pixel_ratio: f32, background: Color32) -> Self {
        Self {
            pixmap,
            transform: Transform::from_scale(pixel_ratio, pixel_ratio),
            background,
        }
    }
}

impl Surface for PixmapSurface<'_> {
    fn clear(&mut self) {
        self.pixmap.fill(skia_color(self.background));
    }

    fn fill_radial_gradient(&mut self, gradient: &RadialGradient) {
        let Some(first) = gradient.stops.first() else {
            return;
        };
        let outer = gradient.outer_radius;
        if outer <= 0.0 {
            return;
        }
        // tiny-skia gradients start at radius 0: remap stops onto the outer radius
        let mut stops = vec![tiny_skia::GradientStop::new(0.0, skia_color(first.color))];
        stops.extend(gradient.stops.iter().map(|s| {
            let position = (gradient.radius_for_offset(s.offset) / outer).clamp(0.0, 1.0);
            tiny_skia::GradientStop::new(position, skia_color(s.color))
        }));

        let center = tiny_skia::Point::from_xy(gradient.center.x, gradient.center.y);
        let Some(shader) = tiny_skia::RadialGradient::new(
            center,
            center,
            outer,
            stops,
            SpreadMode::Pad,
            Transform::identity(),
        ) else {
            log::warn!("Degenerate background gradient skipped");
            return;
        };

        let width = self.pixmap.width() as f32 / self.transform.sx;
        let height = self.pixmap.height() as f32 / self.transform.sy;
        let Some(rect) = tiny_skia::Rect::from_xywh(0.0, 0.0, width, height) else {
            return;
        };
        let paint = Paint {
            shader,
            anti_alias: true,
            ..Default::default()
        };
        self.pixmap.fill_rect(rect, &paint, self.transform, None);
    }

    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32) {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x, from.y);
        pb.line_to(to.x, to.y);
        let Some(path) = pb.finish() else {
            return;
        };
        let stroke = Stroke {
            width,
            ..Default::default()
        };
        self.pixmap
            .stroke_path(&path, &solid_paint(color), &stroke, self.transform, None);
    }

    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32) {
        if let Some(path) = PathBuilder::from_circle(center.x, center.y, radius) {
            self.pixmap.fill_path(
                &path,
                &solid_paint(color),
                FillRule::Winding,
                self.transform,
                None,
            );
        }
    }
}

/// Renders the current frame of `field` into a new pixmap.
pub fn render_snapshot(field: &ParticleField, background: Color32) -> Result<Pixmap, String> {
    let metrics = field
        .metrics()
        .ok_or_else(|| "Background has not been sized yet".to_string())?;
    let (w, h) = metrics.backing_size();
    let mut pixmap =
        Pixmap::new(w, h).ok_or_else(|| format!("Failed to create pixmap {}x{}", w, h))?;
    {
        let mut surface = PixmapSurface::new(&mut pixmap, metrics.pixel_ratio, background);
        field.render(&mut surface);
    }
    Ok(pixmap)
}

impl PortfolioApp {
    /// Renders the background and asks where to save it as PNG.
    pub fn save_background_snapshot(&mut self, background: Color32) {
        let Some(layer) = self.background.layer.as_ref() else {
            log::warn!("No running background to snapshot");
            return;
        };
        let pixmap = match render_snapshot(layer.field(), background) {
            Ok(pixmap) => pixmap,
            Err(e) => {
                log::error!("Failed to render background snapshot: {}", e);
                return;
            }
        };

        let file_dialog_future = async {
            rfd::AsyncFileDialog::new()
                .add_filter("PNG", &["png"])
                .set_file_name("background.png")
                .save_file()
                .await
        };
        if let Some(handle) = futures::executor::block_on(file_dialog_future) {
            match pixmap.save_png(handle.path()) {
                Ok(()) => log::info!("Saved background snapshot to {}", handle.path().display()),
                Err(e) => log::error!("Failed to save PNG: {}", e),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::{Node, SurfaceMetrics};

    fn sized_field(nodes: Vec<Node>) -> ParticleField {
        let mut field = ParticleField::from_nodes(nodes);
        field.resize(SurfaceMetrics::measure(100.0, 50.0, 2.0).unwrap());
        field
    }

    #[test]
    fn snapshot_uses_the_backing_resolution() {
        let pixmap = render_snapshot(&sized_field(Vec::new()), Color32::BLACK).unwrap();
        assert_eq!((pixmap.width(), pixmap.height()), (200, 100));
    }

    #[test]
    fn unsized_field_cannot_be_snapshotted() {
        let field = ParticleField::from_nodes(Vec::new());
        assert!(render_snapshot(&field, Color32::BLACK).is_err());
    }

    #[test]
    fn nodes_are_drawn_at_scaled_positions() {
        let node = Node {
            x: 0.5,
            y: 0.5,
            vx: 0.0,
            vy: 0.0,
            radius: 3.0,
        };
        let pixmap = render_snapshot(&sized_field(vec![node]), Color32::BLACK).unwrap();

        // Node centre at (50, 25) displayed, (100, 50) in backing pixels
        let centre = pixmap.pixel(100, 50).unwrap();
        let corner = pixmap.pixel(199, 99).unwrap();
        assert!(centre.red() > 150);
        assert!(corner.red() < 100);
    }
}
