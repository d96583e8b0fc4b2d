//! Drawing surface abstraction for the particle field.
//!
//! The field only ever issues four kinds of commands, all in displayed-size units with
//! the origin at the surface's top-left corner. Backends are responsible for the
//! device pixel ratio transform.

use crate::constants;
use eframe::egui::{Color32, Pos2};

/// Measured size of a drawable surface.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SurfaceMetrics {
    /// Displayed width in logical units
    pub width: f32,
    /// Displayed height in logical units
    pub height: f32,
    /// Integer device pixel ratio, never below 1
    pub pixel_ratio: f32,
}

impl SurfaceMetrics {
    /// Measures a surface of the given displayed size.
    ///
    /// Returns `None` when the size is zero, negative or not finite: such a surface
    /// cannot be drawn to and the field must not start animating on it.
    pub fn measure(width: f32, height: f32, device_pixel_ratio: f32) -> Option<Self> {
        if !width.is_finite() || !height.is_finite() || width <= 0.0 || height <= 0.0 {
            return None;
        }
        let pixel_ratio = if device_pixel_ratio.is_finite() {
            device_pixel_ratio.floor().max(1.0)
        } else {
            1.0
        };
        Some(Self {
            width,
            height,
            pixel_ratio,
        })
    }

    /// Size of the backing pixel buffer.
    pub fn backing_size(&self) -> (u32, u32) {
        (
            (self.width * self.pixel_ratio).floor() as u32,
            (self.height * self.pixel_ratio).floor() as u32,
        )
    }
}

/// Builds a colour from unmultiplied channels and a 0..=1 alpha.
pub fn rgba(r: u8, g: u8, b: u8, alpha: f32) -> Color32 {
    let a = (alpha.clamp(0.0, 1.0) * 255.0).round() as u8;
    Color32::from_rgba_unmultiplied(r, g, b, a)
}

/// A colour stop of a [`RadialGradient`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GradientStop {
    /// Position between the inner (0) and outer (1) radius
    pub offset: f32,
    /// Colour at this position
    pub color: Color32,
}

/// Radial gradient between two concentric circles.
#[derive(Debug, Clone, PartialEq)]
pub struct RadialGradient {
    /// Shared centre of both circles
    pub center: Pos2,
    /// Radius of the start circle; everything inside takes the first stop colour
    pub inner_radius: f32,
    /// Radius of the end circle; everything outside takes the last stop colour
    pub outer_radius: f32,
    /// Colour stops sorted by offset
    pub stops: Vec<GradientStop>,
}

impl RadialGradient {
    /// The soft ambient light painted behind the field for a surface of the given size.
    pub fn ambient(width: f32, height: f32) -> Self {
        let (ax, ay) = constants::GRADIENT_ANCHOR;
        Self {
            center: Pos2::new(width * ax, height * ay),
            inner_radius: constants::GRADIENT_INNER_RADIUS,
            outer_radius: width.max(height),
            stops: constants::GRADIENT_STOPS
                .iter()
                .map(|&(offset, r, g, b, a)| GradientStop {
                    offset,
                    color: rgba(r, g, b, a),
                })
                .collect(),
        }
    }

    /// Maps a distance from the centre onto the 0..=1 stop axis.
    pub fn offset_for_distance(&self, distance: f32) -> f32 {
        let span = self.outer_radius - self.inner_radius;
        if span <= f32::EPSILON {
            return if distance <= self.inner_radius { 0.0 } else { 1.0 };
        }
        ((distance - self.inner_radius) / span).clamp(0.0, 1.0)
    }

    /// Radius at which the given stop offset lies.
    pub fn radius_for_offset(&self, offset: f32) -> f32 {
        self.inner_radius + offset * (self.outer_radius - self.inner_radius)
    }
}

/// Target of the field's drawing commands.
pub trait Surface {
    /// Erases the whole surface.
    fn clear(&mut self);
    /// Fills the whole surface with a radial gradient.
    fn fill_radial_gradient(&mut self, gradient: &RadialGradient);
    /// Strokes a straight line.
    fn stroke_line(&mut self, from: Pos2, to: Pos2, width: f32, color: Color32);
    /// Fills a circle.
    fn fill_circle(&mut self, center: Pos2, radius: f32, color: Color32);
}
