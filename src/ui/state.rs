//! Application state structures.
//!
//! This module contains the main [`PortfolioApp`] struct and the small state groups
//! it is made of. All state lives in memory for the lifetime of the window.

use super::background::RepaintScheduler;
use crate::build_log::BuildLog;
use crate::chapters::{ChapterTracker, IntersectionObserver};
use crate::hotkeys::{HotkeyDispatcher, HotkeyMap};
use crate::motion::Spring;
use crate::palette::{CommandPalette, EffectRunner};
use crate::particles::{ParticleLayer, SurfaceMetrics};
use crate::projects::ProjectBrowser;
use crate::types::*;
use eframe::egui;

/// Commands bound to global shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Show the command palette
    OpenPalette,
    /// Close the topmost overlay
    Dismiss,
}

/// The shortcut table of the site.
pub fn default_hotkeys() -> HotkeyMap<Command> {
    HotkeyMap::new()
        .bind("ctrl+k", Command::OpenPalette)
        .bind("meta+k", Command::OpenPalette)
        .bind("escape", Command::Dismiss)
}

/// State of the animated background.
#[derive(Default)]
pub struct BackgroundState {
    /// The mounted layer, if the surface was usable
    pub layer: Option<ParticleLayer<RepaintScheduler>>,
    /// Whether a mount was attempted since motion was last enabled
    pub mount_attempted: bool,
}

impl BackgroundState {
    /// Whether a mount should be tried this frame: once per enable, and again
    /// after a failed mount as soon as the surface has a usable size.
    pub fn needs_mount(&self, metrics: Option<SurfaceMetrics>) -> bool {
        !self.mount_attempted || (self.layer.is_none() && metrics.is_some())
    }

    /// Disposes the layer (if any) and allows a later remount.
    pub fn unmount(&mut self) {
        if let Some(mut layer) = self.layer.take() {
            layer.dispose();
        }
        self.mount_attempted = false;
    }
}

/// State of page navigation.
#[derive(Debug, Default, Clone)]
pub struct NavigationState {
    /// Section the next frame should scroll to
    pub scroll_target: Option<SectionId>,
    /// Scroll offset, content height and viewport height of the last frame
    pub scroll_metrics: (f32, f32, f32),
    /// Time of the previous frame, for spring integration
    pub last_frame_time: Option<f64>,
}

/// The main application structure.
///
/// This struct implements the `eframe::App` trait (see the parent module) and owns
/// every interactive state machine of the page.
pub struct PortfolioApp {
    /// Static content rendered by the page
    pub content: SiteContent,
    /// Dark or light visuals
    pub dark_mode: bool,
    /// Whether the particle background should run
    pub motion_enabled: bool,
    /// Animated background
    pub background: BackgroundState,
    /// Global shortcuts
    pub hotkeys: HotkeyDispatcher<Command>,
    /// Command palette
    pub palette: CommandPalette,
    /// Project filter and detail selection
    pub browser: ProjectBrowser,
    /// Chapter intersection observer
    pub observer: IntersectionObserver,
    /// Chapter in focus
    pub chapters: ChapterTracker,
    /// Hero status feed
    pub build_log: BuildLog,
    /// Smoothed scroll progress
    pub progress: Spring,
    /// Scrolling and section navigation
    pub navigation: NavigationState,
}

impl Default for PortfolioApp {
    fn default() -> Self {
        Self::new(crate::content::builtin())
    }
}

impl PortfolioApp {
    /// Creates the app over the given content. Hotkeys are attached immediately.
    pub fn new(content: SiteContent) -> Self {
        let mut hotkeys = HotkeyDispatcher::new(default_hotkeys());
        hotkeys.attach();
        let first_project = content.projects.first().map(|p| p.id.clone());

        Self {
            palette: CommandPalette::new(content.actions.clone()),
            build_log: BuildLog::new(content.build_log.clone()),
            chapters: ChapterTracker::new(first_project),
            content,
            dark_mode: true,
            motion_enabled: true,
            background: BackgroundState::default(),
            hotkeys,
            browser: ProjectBrowser::new(),
            observer: IntersectionObserver::default(),
            progress: Spring::default(),
            navigation: NavigationState::default(),
        }
    }

    /// Applies a shortcut command.
    pub fn apply_command(&mut self, command: Command, now: f64) {
        match command {
            Command::OpenPalette => self.palette.open(now),
            Command::Dismiss => {
                if self.palette.is_open() {
                    self.palette.close();
                } else {
                    self.browser.close_detail();
                }
            }
        }
    }

    /// Turns the particle background on or off.
    pub fn set_motion_enabled(&mut self, enabled: bool) {
        if self.motion_enabled == enabled {
            return;
        }
        self.motion_enabled = enabled;
        if !enabled {
            self.background.unmount();
        }
    }

    /// Releases every registered resource. Safe to call more than once.
    pub fn teardown(&mut self) {
        self.background.unmount();
        self.hotkeys.detach();
        self.observer.detach();
        self.build_log.stop();
    }
}

/// Runs palette effects against the live UI.
pub struct UiEffects<'a> {
    /// Context used to open links
    pub ctx: &'a egui::Context,
    /// Where scroll requests are recorded
    pub scroll_target: &'a mut Option<SectionId>,
}

impl EffectRunner for UiEffects<'_> {
    fn run(&mut self, effect: &Effect) {
        match effect {
            Effect::ScrollTo { section } => {
                *self.scroll_target = Some(section.clone());
            }
            Effect::Email { address } => {
                self.ctx
                    .open_url(egui::OpenUrl::same_tab(format!("mailto:{address}")));
            }
            Effect::OpenLink { url } => {
                self.ctx.open_url(egui::OpenUrl::new_tab(url));
            }
        }
    }
}
