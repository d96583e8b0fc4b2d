//! Shared application-wide constants.
//! Centralizes tweakable values used by the particle field, the interaction
//! state machines and the page chrome.

// Particle field
/// Number of nodes created when the background mounts.
pub const NODE_COUNT: usize = 90;
/// Fractional distance beyond the unit square before a node wraps to the opposite edge.
pub const OVERSCAN: f32 = 0.05;
/// Width of the uniform band initial velocities are drawn from (pixels per frame).
pub const INITIAL_VELOCITY_SPREAD: f32 = 0.12;
/// Smallest node radius (in displayed units).
pub const NODE_RADIUS_MIN: f32 = 1.2;
/// Width of the uniform band added on top of [`NODE_RADIUS_MIN`].
pub const NODE_RADIUS_SPREAD: f32 = 1.9;
/// Multiplicative velocity decay applied every frame.
pub const VELOCITY_DAMPING: f32 = 0.995;
/// Distance (pixels) at which the pointer pull starts dropping off.
pub const POINTER_PULL_RADIUS: f32 = 140.0;
/// Maximum pull factor once the pointer is within [`POINTER_PULL_RADIUS`].
pub const POINTER_PULL_GAIN: f32 = 0.0009;
/// Scale applied to the pointer displacement when turning pull into an impulse.
pub const POINTER_IMPULSE_SCALE: f32 = 0.0008;
/// Added to pointer distances so the pull never divides by zero.
pub const POINTER_DISTANCE_EPSILON: f32 = 0.001;
/// Maximum pixel distance between two nodes that still get a connecting line.
pub const LINK_DISTANCE: f32 = 160.0;
/// Opacity of a connecting line between two coincident nodes.
pub const LINK_MAX_ALPHA: f32 = 0.25;
/// Stroke width of connecting lines.
pub const LINK_WIDTH: f32 = 1.0;
/// Opacity of node dots.
pub const NODE_ALPHA: f32 = 0.75;

// Ambient gradient
/// Gradient anchor as a fraction of the surface width and height.
pub const GRADIENT_ANCHOR: (f32, f32) = (0.2, 0.1);
/// Radius (displayed units) inside which the first stop colour is solid.
pub const GRADIENT_INNER_RADIUS: f32 = 30.0;
/// Gradient stops as (offset, r, g, b, alpha).
pub const GRADIENT_STOPS: [(f32, u8, u8, u8, f32); 3] = [
    (0.0, 113, 72, 255, 0.18),
    (0.55, 0, 255, 187, 0.07),
    (1.0, 255, 96, 151, 0.05),
];
/// Number of segments used to approximate the gradient rings with a mesh.
pub const GRADIENT_SEGMENTS: usize = 64;

// Command palette
/// Delay (seconds) between opening the palette and focusing the query field.
pub const PALETTE_FOCUS_DELAY: f64 = 0.05;

// Project chapters
/// Fraction of the viewport height cut from the top of the focus band.
pub const CHAPTER_BAND_TOP: f32 = 0.20;
/// Fraction of the viewport height cut from the bottom of the focus band.
pub const CHAPTER_BAND_BOTTOM: f32 = 0.55;
/// Intersection ratios that trigger a chapter notification.
pub const CHAPTER_THRESHOLDS: [f32; 5] = [0.2, 0.35, 0.5, 0.65, 0.8];
/// Maximum number of tag filter pills, including "All".
pub const MAX_TAG_FILTERS: usize = 9;

// Status feed
/// Number of lines the build log keeps on screen.
pub const BUILD_LOG_CAPACITY: usize = 7;

// Scroll progress
/// Spring stiffness for the scroll progress bar.
pub const PROGRESS_STIFFNESS: f32 = 180.0;
/// Spring damping for the scroll progress bar.
pub const PROGRESS_DAMPING: f32 = 26.0;
/// Height of the scroll progress bar (screen pixels).
pub const PROGRESS_BAR_HEIGHT: f32 = 3.0;
