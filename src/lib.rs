//! # Portfolio Site
//!
//! A single-page developer portfolio rendered with egui. The page is built from a
//! handful of small interaction state machines:
//! - **Particle background**: a drifting node field pulled towards the pointer and
//!   linked by faint lines, painted behind the page
//! - **Command palette**: a filterable action list opened with Ctrl+K / ⌘K
//! - **Project chapters**: scroll-driven focus tracking feeding a preview panel
//! - **Build log**: a replaying status feed in the hero section
//!
//! ## Features
//! - Tag filters and a case study modal for every project
//! - Spring-smoothed scroll progress bar
//! - Dark and light themes, and a motion toggle that stops the background
//! - PNG snapshot of the background (native builds)
//! - Content override from a JSON file via `PORTFOLIO_CONTENT`

#![warn(missing_docs)]
#![deny(unsafe_code)]

pub mod build_log;
pub mod chapters;
pub mod constants;
pub mod content;
pub mod hotkeys;
pub mod lifecycle;
pub mod motion;
pub mod palette;
pub mod particles;
pub mod projects;
mod types;
mod ui;

// Re-export public types and functions
pub use types::*;
pub use ui::{default_hotkeys, Command, PainterSurface, PortfolioApp, RepaintScheduler};
#[cfg(not(target_arch = "wasm32"))]
pub use ui::{render_snapshot, PixmapSurface};

/// Runs the portfolio site in a native window.
///
/// Content comes from [`content::load`], so a `PORTFOLIO_CONTENT` file overrides the
/// built-in placeholder content.
///
/// # Returns
///
/// Returns `Ok(())` if the application runs successfully, or an `eframe::Error` if
/// initialization fails.
///
/// # Example
///
/// ```no_run
/// use portfolio_site::run_app;
///
/// fn main() -> Result<(), eframe::Error> {
///     run_app()
/// }
/// ```
#[cfg(not(target_arch = "wasm32"))]
pub fn run_app() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_title("Portfolio")
            .with_inner_size([1280.0, 820.0])
            .with_min_inner_size([640.0, 480.0]),
        ..Default::default()
    };
    let content = content::load();
    log::info!(
        "Starting portfolio for {} ({} projects)",
        content.profile.name,
        content.projects.len()
    );
    eframe::run_native(
        "Portfolio",
        options,
        Box::new(|_cc| Ok(Box::new(PortfolioApp::new(content)))),
    )
}
