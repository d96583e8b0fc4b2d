//! Modal overlays: the command palette and the project case study.

use super::sections::{draw_media, draw_metric_bars};
use super::state::{PortfolioApp, UiEffects};
use crate::projects::MediaPreview;
use eframe::egui;
use std::time::Duration;

impl PortfolioApp {
    pub(super) fn draw_palette(&mut self, ctx: &egui::Context, now: f64) {
        if !self.palette.is_open() {
            return;
        }

        let mut chosen: Option<usize> = None;
        let modal = egui::Modal::new(egui::Id::new("command_palette")).show(ctx, |ui| {
            ui.set_width(420.0);
            let edit = ui.add(
                egui::TextEdit::singleline(self.palette.query_mut())
                    .hint_text("Type a command…")
                    .desired_width(f32::INFINITY),
            );
            if self.palette.take_focus_request(now) {
                edit.request_focus();
            } else if let Some(wait) = self.palette.focus_pending_in(now) {
                ui.ctx().request_repaint_after(Duration::from_secs_f64(wait));
            }
            ui.separator();

            let visible = self.palette.visible();
            if visible.is_empty() {
                ui.weak("No matches.");
            }
            for (index, action) in visible.iter().enumerate() {
                let button = egui::Button::new(&action.label).frame(false);
                if ui
                    .add_sized([ui.available_width(), 24.0], button)
                    .clicked()
                {
                    chosen = Some(index);
                }
            }
            // Enter runs the first match
            if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) && !visible.is_empty() {
                chosen = Some(0);
            }
        });

        if let Some(index) = chosen {
            let mut effects = UiEffects {
                ctx,
                scroll_target: &mut self.navigation.scroll_target,
            };
            self.palette.select(index, &mut effects);
        } else if modal.should_close() {
            self.palette.close();
        }
    }

    pub(super) fn draw_project_detail(&mut self, ctx: &egui::Context) {
        let Some(project) = self.browser.active_detail(&self.content.projects).cloned() else {
            return;
        };

        let mut close = false;
        let modal = egui::Modal::new(egui::Id::new("project_detail")).show(ctx, |ui| {
            ui.set_width(520.0);
            ui.heading(&project.name);
            ui.label(&project.blurb);
            ui.label(egui::RichText::new(project.tags.join(" · ")).small().weak());
            ui.separator();

            ui.strong("Impact");
            for statement in &project.impact {
                ui.label(format!("• {statement}"));
            }
            ui.add_space(8.0);
            ui.strong("Metrics");
            draw_metric_bars(ui, &project.metrics);
            ui.add_space(8.0);
            draw_media(ui, &MediaPreview::for_project(&project));
            ui.add_space(8.0);

            ui.horizontal(|ui| {
                if !project.links.demo.is_empty() {
                    ui.hyperlink_to("Live demo", &project.links.demo);
                }
                if !project.links.code.is_empty() {
                    ui.hyperlink_to("Source", &project.links.code);
                }
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("Close").clicked() {
                        close = true;
                    }
                });
            });
        });

        if close || modal.should_close() {
            self.browser.close_detail();
        }
    }
}
