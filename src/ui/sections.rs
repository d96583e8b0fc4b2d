//! Page sections: top bar, hero, project chapters, preview panel, skills, timeline.

use super::state::PortfolioApp;
use crate::build_log::level_marker;
use crate::constants::PROGRESS_BAR_HEIGHT;
use crate::content::{ABOUT_SECTION, PROJECTS_SECTION, TOP_SECTION};
use crate::motion::scroll_fraction;
use crate::projects::{tag_filters, MediaPreview};
use crate::types::*;
use eframe::egui;

const ACCENT: egui::Color32 = egui::Color32::from_rgb(0, 255, 187);
const CHAPTER_WIDTH: f32 = 560.0;

/// Draws a 16:9 media frame for a project preview.
pub(super) fn draw_media(ui: &mut egui::Ui, preview: &MediaPreview<'_>) {
    let width = ui.available_width().min(CHAPTER_WIDTH);
    let (rect, _) = ui.allocate_exact_size(egui::vec2(width, width * 9.0 / 16.0), egui::Sense::hover());
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, 8.0, ui.visuals().faint_bg_color);
    painter.rect_stroke(
        rect,
        8.0,
        ui.visuals().widgets.noninteractive.bg_stroke,
        egui::StrokeKind::Inside,
    );

    let (title, caption) = match preview {
        MediaPreview::Image { src, alt } => (alt.to_string(), src.to_string()),
        MediaPreview::Placeholder { name } => (name.to_string(), "No preview available".to_string()),
    };
    painter.text(
        rect.center(),
        egui::Align2::CENTER_CENTER,
        title,
        egui::FontId::proportional(18.0),
        ui.visuals().strong_text_color(),
    );
    painter.text(
        rect.center_bottom() - egui::vec2(0.0, 12.0),
        egui::Align2::CENTER_BOTTOM,
        caption,
        egui::FontId::monospace(11.0),
        ui.visuals().weak_text_color(),
    );
}

/// Draws one labelled bar per metric dimension.
pub(super) fn draw_metric_bars(ui: &mut egui::Ui, metrics: &ProjectMetrics) {
    for (label, value) in metrics.dimensions() {
        ui.add(
            egui::ProgressBar::new(value as f32 / 100.0)
                .fill(ACCENT.gamma_multiply(0.6))
                .text(format!("{label} {value}")),
        );
    }
}

fn draw_tags(ui: &mut egui::Ui, tags: &[String]) {
    ui.horizontal_wrapped(|ui| {
        for tag in tags {
            ui.label(egui::RichText::new(tag).small().monospace());
        }
    });
}

impl PortfolioApp {
    /// Scrolls `response` into view if it is the pending scroll target.
    fn anchor(&mut self, section: &str, response: &egui::Response) {
        if self.navigation.scroll_target.as_deref() == Some(section) {
            response.scroll_to_me(Some(egui::Align::TOP));
            self.navigation.scroll_target = None;
        }
    }

    pub(super) fn draw_top_bar(&mut self, ui: &mut egui::Ui, now: f64) {
        ui.horizontal(|ui| {
            ui.strong(&self.content.profile.name);
            ui.separator();
            if ui.button("Projects").clicked() {
                self.navigation.scroll_target = Some(PROJECTS_SECTION.to_string());
            }
            if ui.button("About").clicked() {
                self.navigation.scroll_target = Some(ABOUT_SECTION.to_string());
            }
            ui.separator();
            if ui
                .button(format!("Search  {}", super::shortcut_hint()))
                .clicked()
            {
                self.palette.open(now);
            }

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.checkbox(&mut self.dark_mode, "Dark Mode");
                let mut motion = self.motion_enabled;
                if ui.checkbox(&mut motion, "Motion").changed() {
                    self.set_motion_enabled(motion);
                }
                #[cfg(not(target_arch = "wasm32"))]
                {
                    let can_snapshot = self.background.layer.is_some();
                    if ui
                        .add_enabled(can_snapshot, egui::Button::new("Snapshot"))
                        .on_hover_text("Save the background as PNG")
                        .clicked()
                    {
                        let background = ui.visuals().extreme_bg_color;
                        self.save_background_snapshot(background);
                    }
                }
            });
        });
    }

    /// Feeds the latest scroll position into the progress spring.
    pub(super) fn update_progress(&mut self, ctx: &egui::Context, now: f64) {
        let (offset, content, viewport) = self.navigation.scroll_metrics;
        self.progress
            .set_target(scroll_fraction(offset, content, viewport));
        let dt = self
            .navigation
            .last_frame_time
            .map_or(0.0, |last| (now - last) as f32);
        self.navigation.last_frame_time = Some(now);
        self.progress.step(dt);
        if !self.progress.is_settled() {
            ctx.request_repaint();
        }
    }

    pub(super) fn draw_progress_bar(&self, ctx: &egui::Context) {
        let screen = ctx.input(|i| i.screen_rect());
        let width = screen.width() * self.progress.value().clamp(0.0, 1.0);
        if width <= 0.0 {
            return;
        }
        let painter = ctx.layer_painter(egui::LayerId::new(
            egui::Order::Foreground,
            egui::Id::new("scroll_progress"),
        ));
        let bar = egui::Rect::from_min_size(screen.min, egui::vec2(width, PROGRESS_BAR_HEIGHT));
        painter.rect_filled(bar, 0.0, ACCENT);
    }

    /// Draws the scrollable page content.
    pub(super) fn draw_page(&mut self, ui: &mut egui::Ui) {
        ui.add_space(24.0);
        self.draw_hero(ui);
        ui.add_space(48.0);
        self.draw_projects(ui);
        ui.add_space(48.0);
        self.draw_skills(ui);
        ui.add_space(32.0);
        self.draw_timeline(ui);
        ui.add_space(48.0);
        self.draw_footer(ui);
    }

    fn draw_hero(&mut self, ui: &mut egui::Ui) {
        let profile = self.content.profile.clone();
        let heading = ui.heading(egui::RichText::new(&profile.name).size(34.0).strong());
        self.anchor(TOP_SECTION, &heading);
        ui.label(egui::RichText::new(format!("{} · {}", profile.title, profile.location)).weak());
        ui.add_space(8.0);
        ui.label(egui::RichText::new(&profile.tagline).size(18.0));
        ui.add_space(12.0);

        ui.horizontal_wrapped(|ui| {
            for highlight in &profile.highlights {
                egui::Frame::group(ui.style()).show(ui, |ui| {
                    ui.vertical(|ui| {
                        ui.label(egui::RichText::new(&highlight.kpi).size(20.0).color(ACCENT));
                        ui.small(&highlight.label);
                    });
                });
            }
        });
        ui.add_space(12.0);

        ui.horizontal(|ui| {
            if !profile.email.is_empty() && ui.button("Email me").clicked() {
                ui.ctx()
                    .open_url(egui::OpenUrl::same_tab(format!("mailto:{}", profile.email)));
            }
            for (label, url) in [
                ("GitHub", &profile.links.github),
                ("LinkedIn", &profile.links.linkedin),
                ("Resume", &profile.links.resume),
            ] {
                if !url.is_empty() {
                    ui.hyperlink_to(label, url);
                }
            }
        });
        ui.add_space(16.0);
        self.draw_build_log(ui);
    }

    fn draw_build_log(&self, ui: &mut egui::Ui) {
        egui::Frame::group(ui.style())
            .fill(ui.visuals().extreme_bg_color.gamma_multiply(0.8))
            .show(ui, |ui| {
                ui.set_width(ui.available_width().min(CHAPTER_WIDTH));
                ui.small(egui::RichText::new("build.log").monospace().weak());
                for line in self.build_log.lines() {
                    let color = match line.level {
                        LogLevel::Ok => ACCENT,
                        LogLevel::Warn => ui.visuals().warn_fg_color,
                        LogLevel::Info => ui.visuals().text_color(),
                    };
                    ui.label(
                        egui::RichText::new(format!(
                            "{} {} {}",
                            line.timestamp(),
                            level_marker(line.level),
                            line.text
                        ))
                        .monospace()
                        .color(color),
                    );
                }
            });
    }

    fn draw_projects(&mut self, ui: &mut egui::Ui) {
        let heading = ui.heading("Projects");
        self.anchor(PROJECTS_SECTION, &heading);

        ui.horizontal_wrapped(|ui| {
            for filter in tag_filters(&self.content.projects) {
                let selected = self.browser.filter() == &filter;
                if ui.selectable_label(selected, filter.label()).clicked() {
                    self.browser.set_filter(filter);
                }
            }
        });
        ui.add_space(12.0);

        let visible: Vec<Project> = self
            .browser
            .visible(&self.content.projects)
            .into_iter()
            .cloned()
            .collect();
        if visible.is_empty() {
            ui.weak("No projects with this tag.");
        }

        let mut rects = Vec::with_capacity(visible.len());
        for project in &visible {
            let active = self.chapters.active() == Some(project.id.as_str());
            let stroke = if active {
                egui::Stroke::new(1.5, ACCENT)
            } else {
                ui.visuals().widgets.noninteractive.bg_stroke
            };
            let response = egui::Frame::group(ui.style())
                .stroke(stroke)
                .inner_margin(16.0)
                .show(ui, |ui| {
                    ui.set_width(ui.available_width().min(CHAPTER_WIDTH));
                    ui.label(egui::RichText::new(&project.name).size(22.0).strong());
                    ui.label(&project.blurb);
                    draw_tags(ui, &project.tags);
                    if let Some(first) = project.impact.first() {
                        ui.small(format!("• {first}"));
                    }
                    if ui.button("Open case study").clicked() {
                        self.browser.open_detail(project);
                    }
                })
                .response;
            rects.push((project.id.clone(), response.rect));
            ui.add_space(120.0);
        }

        let entries = self.observer.observe(ui.clip_rect(), &rects);
        self.chapters.on_entries(&entries);
    }

    /// Side panel previewing the chapter in focus.
    pub(super) fn draw_preview_panel(&self, ui: &mut egui::Ui) {
        let visible = self.browser.visible(&self.content.projects);
        let active = self.chapters.active();
        let project = visible
            .iter()
            .find(|p| Some(p.id.as_str()) == active)
            .or_else(|| visible.first())
            .copied();
        let Some(project) = project else {
            ui.weak("Nothing to preview.");
            return;
        };

        ui.add_space(8.0);
        ui.small(egui::RichText::new("NOW VIEWING").weak());
        ui.heading(&project.name);
        ui.add_space(6.0);
        draw_media(ui, &MediaPreview::for_project(project));
        ui.add_space(8.0);
        draw_metric_bars(ui, &project.metrics);
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if !project.links.demo.is_empty() {
                ui.hyperlink_to("Demo", &project.links.demo);
            }
            if !project.links.code.is_empty() {
                ui.hyperlink_to("Code", &project.links.code);
            }
        });
    }

    fn draw_skills(&mut self, ui: &mut egui::Ui) {
        let heading = ui.heading("About");
        self.anchor(ABOUT_SECTION, &heading);
        egui::Grid::new("skills_grid")
            .num_columns(2)
            .spacing([24.0, 8.0])
            .show(ui, |ui| {
                for group in &self.content.skills {
                    ui.strong(&group.group);
                    ui.label(group.items.join(" · "));
                    ui.end_row();
                }
            });
    }

    fn draw_timeline(&self, ui: &mut egui::Ui) {
        if self.content.timeline.is_empty() {
            return;
        }
        ui.heading("Timeline");
        for entry in &self.content.timeline {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(&entry.year).monospace().color(ACCENT));
                ui.vertical(|ui| {
                    ui.strong(&entry.title);
                    ui.label(&entry.text);
                });
            });
            ui.add_space(6.0);
        }
    }

    fn draw_footer(&mut self, ui: &mut egui::Ui) {
        ui.separator();
        ui.horizontal(|ui| {
            ui.weak(format!("© {}", self.content.profile.name));
            if ui.button("Back to top").clicked() {
                self.navigation.scroll_target = Some(TOP_SECTION.to_string());
            }
        });
        ui.add_space(24.0);
    }
}
