//! Spring smoothing for the scroll progress bar.

use crate::constants::{PROGRESS_DAMPING, PROGRESS_STIFFNESS};

/// Largest time step integrated at once; longer frames are split.
const MAX_STEP: f32 = 1.0 / 120.0;

/// A damped spring chasing a target value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spring {
    /// Spring constant
    pub stiffness: f32,
    /// Damping coefficient
    pub damping: f32,
    /// Mass of the moving value
    pub mass: f32,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Default for Spring {
    fn default() -> Self {
        Self::new(PROGRESS_STIFFNESS, PROGRESS_DAMPING)
    }
}

impl Spring {
    /// Creates a spring at rest at zero.
    pub fn new(stiffness: f32, damping: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass: 1.0,
            value: 0.0,
            velocity: 0.0,
            target: 0.0,
        }
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Value the spring is moving towards.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Sets a new target.
    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// True when the spring is close enough to its target to stop animating.
    pub fn is_settled(&self) -> bool {
        (self.value - self.target).abs() < 1e-4 && self.velocity.abs() < 1e-3
    }

    /// Advances the spring by `dt` seconds (semi-implicit Euler).
    pub fn step(&mut self, dt: f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return;
        }
        let mut remaining = dt;
        while remaining > 0.0 {
            let h = remaining.min(MAX_STEP);
            let force = -self.stiffness * (self.value - self.target) - self.damping * self.velocity;
            self.velocity += force / self.mass * h;
            self.value += self.velocity * h;
            remaining -= h;
        }
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
        }
    }
}

/// Fraction of the page scrolled, 0 at the top and 1 at the bottom.
pub fn scroll_fraction(offset: f32, content_height: f32, viewport_height: f32) -> f32 {
    let scrollable = content_height - viewport_height;
    if scrollable <= 0.0 || !scrollable.is_finite() {
        return 0.0;
    }
    (offset / scrollable).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spring_converges_to_target() {
        let mut spring = Spring::default();
        spring.set_target(1.0);
        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }
        assert!(spring.is_settled());
        assert_eq!(spring.value(), 1.0);
    }

    #[test]
    fn spring_moves_towards_target_immediately() {
        let mut spring = Spring::default();
        spring.set_target(0.5);
        spring.step(1.0 / 60.0);
        assert!(spring.value() > 0.0 && spring.value() < 0.5);
    }

    #[test]
    fn bad_time_steps_are_ignored() {
        let mut spring = Spring::default();
        spring.set_target(1.0);
        spring.step(0.0);
        spring.step(f32::NAN);
        assert_eq!(spring.value(), 0.0);
    }

    #[test]
    fn scroll_fraction_is_clamped() {
        assert_eq!(scroll_fraction(0.0, 2000.0, 1000.0), 0.0);
        assert_eq!(scroll_fraction(500.0, 2000.0, 1000.0), 0.5);
        assert_eq!(scroll_fraction(5000.0, 2000.0, 1000.0), 1.0);
        assert_eq!(scroll_fraction(100.0, 500.0, 1000.0), 0.0);
    }
}
