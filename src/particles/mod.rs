//! Animated particle field drawn behind the page.
//!
//! Node positions are stored as fractions of the surface size so a resize only
//! changes how they are projected, never the stored state. Velocities are kept in
//! pixels per frame and divided by the surface dimensions when integrated.
//!
//! # Module Organization
//!
//! - `surface` - drawing abstraction and surface measurement
//! - `layer` - mount/frame/dispose driver around a [`ParticleField`]

mod layer;
mod surface;

pub use layer::{InputEvent, ParticleLayer};
pub use surface::{rgba, GradientStop, RadialGradient, Surface, SurfaceMetrics};

use crate::constants::*;
use eframe::egui::{Color32, Pos2};
use rand::Rng;

/// A simulated point of the field.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Node {
    /// Horizontal position as a fraction of the surface width
    pub x: f32,
    /// Vertical position as a fraction of the surface height
    pub y: f32,
    /// Horizontal velocity in pixels per frame
    pub vx: f32,
    /// Vertical velocity in pixels per frame
    pub vy: f32,
    /// Dot radius in displayed units
    pub radius: f32,
}

impl Node {
    /// Creates a node with randomized position, velocity and radius.
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            x: rng.gen::<f32>(),
            y: rng.gen::<f32>(),
            vx: (rng.gen::<f32>() - 0.5) * INITIAL_VELOCITY_SPREAD,
            vy: (rng.gen::<f32>() - 0.5) * INITIAL_VELOCITY_SPREAD,
            radius: NODE_RADIUS_MIN + rng.gen::<f32>() * NODE_RADIUS_SPREAD,
        }
    }

    /// Speed in pixels per frame.
    pub fn speed(&self) -> f32 {
        (self.vx * self.vx + self.vy * self.vy).sqrt()
    }
}

/// Pointer position over the surface, in displayed units.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerState {
    /// Horizontal position relative to the surface's left edge
    pub x: f32,
    /// Vertical position relative to the surface's top edge
    pub y: f32,
    /// True while the pointer hovers the surface or a touch is in contact
    pub active: bool,
}

impl PointerState {
    /// Records a new pointer position and marks the pointer active.
    pub fn move_to(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
        self.active = true;
    }

    /// Marks the pointer inactive, keeping the last position.
    pub fn leave(&mut self) {
        self.active = false;
    }
}

/// Parameters for building a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldConfig {
    /// Number of nodes
    pub node_count: usize,
}

impl Default for FieldConfig {
    fn default() -> Self {
        Self {
            node_count: NODE_COUNT,
        }
    }
}

/// A line between two nearby nodes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Link {
    /// Index of the first node
    pub a: usize,
    /// Index of the second node
    pub b: usize,
    /// Pixel distance between the two nodes
    pub distance: f32,
    /// Line opacity, 1 at distance 0 down to 0 at [`LINK_DISTANCE`]
    pub strength: f32,
}

/// Wraps a fractional coordinate that left the overscan band to the opposite edge.
pub fn wrap_coordinate(v: f32) -> f32 {
    if v < -OVERSCAN {
        1.0 + OVERSCAN
    } else if v > 1.0 + OVERSCAN {
        -OVERSCAN
    } else {
        v
    }
}

/// Simulation state of the particle background.
#[derive(Debug, Clone)]
pub struct ParticleField {
    nodes: Vec<Node>,
    metrics: Option<SurfaceMetrics>,
}

impl ParticleField {
    /// Creates a field using the thread-local random generator.
    pub fn new(config: FieldConfig) -> Self {
        Self::with_rng(config, &mut rand::thread_rng())
    }

    /// Creates a field drawing its initial state from `rng`.
    pub fn with_rng<R: Rng + ?Sized>(config: FieldConfig, rng: &mut R) -> Self {
        let nodes = (0..config.node_count).map(|_| Node::random(rng)).collect();
        Self::from_nodes(nodes)
    }

    /// Creates a field from explicit nodes.
    pub fn from_nodes(nodes: Vec<Node>) -> Self {
        Self {
            nodes,
            metrics: None,
        }
    }

    /// Current nodes.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Last measured surface, if any.
    pub fn metrics(&self) -> Option<SurfaceMetrics> {
        self.metrics
    }

    /// Adopts a new surface size. Node state is left untouched.
    pub fn resize(&mut self, metrics: SurfaceMetrics) {
        self.metrics = Some(metrics);
    }

    /// Advances the simulation by one frame.
    ///
    /// Does nothing until the field has been sized.
    pub fn step(&mut self, pointer: &PointerState) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let (w, h) = (metrics.width, metrics.height);

        for node in &mut self.nodes {
            node.x = wrap_coordinate(node.x + node.vx / w);
            node.y = wrap_coordinate(node.y + node.vy / h);

            if pointer.active {
                let dx = pointer.x - node.x * w;
                let dy = pointer.y - node.y * h;
                let dist = (dx * dx + dy * dy).sqrt() + POINTER_DISTANCE_EPSILON;
                let pull = (POINTER_PULL_RADIUS / dist).clamp(0.0, 1.0) * POINTER_PULL_GAIN;
                node.vx += dx * pull * POINTER_IMPULSE_SCALE;
                node.vy += dy * pull * POINTER_IMPULSE_SCALE;
            }

            node.vx *= VELOCITY_DAMPING;
            node.vy *= VELOCITY_DAMPING;
        }
    }

    /// Every unordered pair of nodes closer than [`LINK_DISTANCE`] pixels.
    pub fn links(&self) -> Vec<Link> {
        let Some(metrics) = self.metrics else {
            return Vec::new();
        };
        let points: Vec<Pos2> = self
            .nodes
            .iter()
            .map(|n| Pos2::new(n.x * metrics.width, n.y * metrics.height))
            .collect();
        let max_sq = LINK_DISTANCE * LINK_DISTANCE;

        let mut links = Vec::new();
        for i in 0..points.len() {
            for j in (i + 1)..points.len() {
                let d2 = points[i].distance_sq(points[j]);
                if d2 < max_sq {
                    let distance = d2.sqrt();
                    links.push(Link {
                        a: i,
                        b: j,
                        distance,
                        strength: 1.0 - distance / LINK_DISTANCE,
                    });
                }
            }
        }
        links
    }

    /// Draws the current frame.
    pub fn render(&self, surface: &mut dyn Surface) {
        let Some(metrics) = self.metrics else {
            return;
        };
        let (w, h) = (metrics.width, metrics.height);

        surface.clear();
        surface.fill_radial_gradient(&RadialGradient::ambient(w, h));

        for link in self.links() {
            let a = &self.nodes[link.a];
            let b = &self.nodes[link.b];
            surface.stroke_line(
                Pos2::new(a.x * w, a.y * h),
                Pos2::new(b.x * w, b.y * h),
                LINK_WIDTH,
                rgba(255, 255, 255, link.strength * LINK_MAX_ALPHA),
            );
        }

        let dot: Color32 = rgba(255, 255, 255, NODE_ALPHA);
        for node in &self.nodes {
            surface.fill_circle(Pos2::new(node.x * w, node.y * h), node.radius, dot);
        }
    }
}
