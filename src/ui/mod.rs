//! User interface of the portfolio site.
//!
//! This module wires the interaction state machines to egui: it polls global
//! shortcuts, drives the particle background, lays out the page and shows the
//! modal overlays.
//!
//! # Module Organization
//!
//! - `state` - The main [`PortfolioApp`] and its state groups
//! - `background` - Particle background glue (scheduler, painter surface, input)
//! - `sections` - Top bar, hero, project chapters, preview panel and the rest of the page
//! - `overlays` - Command palette and project case study modals
//! - `export` - PNG snapshot of the background (native only)

mod background;
#[cfg(not(target_arch = "wasm32"))]
mod export;
mod overlays;
mod sections;
mod state;


#[cfg(target_arch = "wasm32")]
use web_sys;

fn is_macos_platform() -> bool {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(win) = web_sys::window() {
            let nav = win.navigator();
            if let Ok(platform) = nav.platform() {
                if platform.contains("Mac") {
                    return true;
                }
            }
            if let Ok(ua) = nav.user_agent() {
                if ua.contains("Mac OS X") || ua.contains("Macintosh") {
                    return true;
                }
            }
        }
        false
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        cfg!(target_os = "macos")
    }
}

/// Label of the palette shortcut on the current platform.
fn shortcut_hint() -> &'static str {
    if is_macos_platform() {
        "⌘K"
    } else {
        "Ctrl K"
    }
}

pub use background::{PainterSurface, RepaintScheduler};
#[cfg(not(target_arch = "wasm32"))]
pub use export::{render_snapshot, PixmapSurface};
pub use state::{default_hotkeys, Command, PortfolioApp};

use eframe::egui;
use std::time::Duration;

impl eframe::App for PortfolioApp {
    /// Main update function called by egui for each frame.
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.show(ctx);
    }
}

impl Drop for PortfolioApp {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl PortfolioApp {
    /// Runs one frame of the whole page.
    pub fn show(&mut self, ctx: &egui::Context) {
        let visuals = if self.dark_mode {
            egui::Visuals::dark()
        } else {
            egui::Visuals::light()
        };
        ctx.set_visuals(visuals);

        let now = ctx.input(|i| i.time);

        // Shortcuts first so overlays never see a handled key
        for command in self.hotkeys.poll(ctx) {
            self.apply_command(command, now);
        }

        self.build_log.tick(now);
        if let Some(wait) = self.build_log.next_due_in(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(wait));
        }

        self.update_background(ctx);

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            self.draw_top_bar(ui, now);
        });

        let viewport_width = ctx.input(|i| i.screen_rect().width());
        egui::SidePanel::right("project_preview")
            .resizable(true)
            .default_width((viewport_width * 0.3).clamp(220.0, 360.0))
            .show(ctx, |ui| {
                self.draw_preview_panel(ui);
            });

        // Transparent so the background layer shows through
        let page_frame = egui::Frame::central_panel(&ctx.style()).fill(egui::Color32::TRANSPARENT);
        egui::CentralPanel::default().frame(page_frame).show(ctx, |ui| {
            let output = egui::ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| self.draw_page(ui));
            self.navigation.scroll_metrics = (
                output.state.offset.y,
                output.content_size.y,
                output.inner_rect.height(),
            );
        });

        self.update_progress(ctx, now);
        self.draw_progress_bar(ctx);

        self.draw_project_detail(ctx);
        self.draw_palette(ctx, now);
    }
}
