//! Scroll-driven tracking of the project chapter in focus.
//!
//! Each frame the UI reports where every chapter sits relative to the viewport. An
//! [`IntersectionObserver`] turns that geometry into change notifications against a
//! horizontal focus band, and a [`ChapterTracker`] picks the chapter with the largest
//! visible share from each batch of notifications.

use crate::constants::{CHAPTER_BAND_BOTTOM, CHAPTER_BAND_TOP, CHAPTER_THRESHOLDS};
use eframe::egui::Rect;
use std::collections::HashMap;

/// The part of the viewport that counts as "in focus".
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportBand {
    /// Fraction of the viewport height removed from the top
    pub top_margin: f32,
    /// Fraction of the viewport height removed from the bottom
    pub bottom_margin: f32,
}

impl Default for ViewportBand {
    fn default() -> Self {
        Self {
            top_margin: CHAPTER_BAND_TOP,
            bottom_margin: CHAPTER_BAND_BOTTOM,
        }
    }
}

impl ViewportBand {
    /// The band inside `viewport`.
    pub fn within(&self, viewport: Rect) -> Rect {
        let h = viewport.height();
        Rect::from_min_max(
            viewport.min + eframe::egui::vec2(0.0, h * self.top_margin),
            viewport.max - eframe::egui::vec2(0.0, h * self.bottom_margin),
        )
    }
}

/// Fraction of `target`'s area inside `band`, and whether the two touch at all.
pub fn intersection(target: Rect, band: Rect) -> (f32, bool) {
    let overlap = target.intersect(band);
    let intersecting = overlap.width() >= 0.0 && overlap.height() >= 0.0;
    if !intersecting {
        return (0.0, false);
    }
    let area = target.area();
    let ratio = if area > 0.0 {
        (overlap.area() / area).clamp(0.0, 1.0)
    } else {
        1.0
    };
    (ratio, true)
}

/// A change notification for one observed chapter.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionEntry {
    /// Chapter identifier
    pub target: String,
    /// Visible share of the chapter inside the band
    pub ratio: f32,
    /// True if the chapter touches the band
    pub is_intersecting: bool,
}

/// Reports chapters whose intersection with the band crossed a threshold.
#[derive(Debug, Clone)]
pub struct IntersectionObserver {
    band: ViewportBand,
    thresholds: Vec<f32>,
    last: HashMap<String, (usize, bool)>,
    attached: bool,
}

impl Default for IntersectionObserver {
    fn default() -> Self {
        Self::new(ViewportBand::default(), CHAPTER_THRESHOLDS.to_vec())
    }
}

impl IntersectionObserver {
    /// Creates an attached observer.
    pub fn new(band: ViewportBand, thresholds: Vec<f32>) -> Self {
        Self {
            band,
            thresholds,
            last: HashMap::new(),
            attached: true,
        }
    }

    /// True until [`IntersectionObserver::detach`] is called.
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Stops observing and forgets every target.
    pub fn detach(&mut self) {
        if self.attached {
            log::debug!("Chapter observer detached");
        }
        self.attached = false;
        self.last.clear();
    }

    fn bucket(&self, ratio: f32) -> usize {
        self.thresholds.iter().filter(|t| ratio >= **t).count()
    }

    /// Compares the current chapter geometry with the previous observation.
    ///
    /// Newly seen targets are always reported; known targets are reported when their
    /// threshold bucket or intersecting state changed. Targets no longer present are
    /// forgotten.
    pub fn observe(&mut self, viewport: Rect, targets: &[(String, Rect)]) -> Vec<IntersectionEntry> {
        if !self.attached {
            return Vec::new();
        }
        let band = self.band.within(viewport);
        let mut entries = Vec::new();
        let mut seen = HashMap::with_capacity(targets.len());

        for (id, rect) in targets {
            let (ratio, is_intersecting) = intersection(*rect, band);
            let state = (self.bucket(ratio), is_intersecting);
            if self.last.get(id) != Some(&state) {
                entries.push(IntersectionEntry {
                    target: id.clone(),
                    ratio,
                    is_intersecting,
                });
            }
            seen.insert(id.clone(), state);
        }
        self.last = seen;
        entries
    }
}

/// Which chapter currently drives the preview.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChapterTracker {
    active: Option<String>,
}

impl ChapterTracker {
    /// Creates a tracker with an initial active chapter.
    pub fn new(initial: Option<String>) -> Self {
        Self { active: initial }
    }

    /// The active chapter.
    pub fn active(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// Applies a batch of notifications.
    ///
    /// The intersecting entry with the greatest ratio wins; the first one wins ties.
    /// Without any intersecting entry the active chapter is kept. Returns true when
    /// the active chapter changed.
    pub fn on_entries(&mut self, entries: &[IntersectionEntry]) -> bool {
        let mut best: Option<&IntersectionEntry> = None;
        for entry in entries.iter().filter(|e| e.is_intersecting) {
            if best.map_or(true, |b| entry.ratio > b.ratio) {
                best = Some(entry);
            }
        }
        match best {
            Some(entry) if self.active.as_deref() != Some(entry.target.as_str()) => {
                log::debug!("Active chapter is now {}", entry.target);
                self.active = Some(entry.target.clone());
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use eframe::egui::{pos2, vec2};

    fn entry(target: &str, ratio: f32, is_intersecting: bool) -> IntersectionEntry {
        IntersectionEntry {
            target: target.into(),
            ratio,
            is_intersecting,
        }
    }

    fn viewport() -> Rect {
        Rect::from_min_size(pos2(0.0, 0.0), vec2(800.0, 1000.0))
    }

    #[test]
    fn band_is_the_upper_middle_of_the_viewport() {
        let band = ViewportBand::default().within(viewport());
        assert!((band.min.y - 200.0).abs() < 1e-3);
        assert!((band.max.y - 450.0).abs() < 1e-3);
        assert_eq!(band.width(), 800.0);
    }

    #[test]
    fn ratio_is_the_visible_share_of_the_target() {
        let band = Rect::from_min_max(pos2(0.0, 200.0), pos2(800.0, 450.0));
        let half = Rect::from_min_max(pos2(0.0, 100.0), pos2(800.0, 300.0));
        let (ratio, hit) = intersection(half, band);
        assert!(hit);
        assert!((ratio - 0.5).abs() < 1e-5);

        let below = Rect::from_min_max(pos2(0.0, 600.0), pos2(800.0, 900.0));
        assert_eq!(intersection(below, band), (0.0, false));
    }

    #[test]
    fn tracker_picks_the_highest_ratio() {
        let mut tracker = ChapterTracker::new(Some("a".into()));
        let changed = tracker.on_entries(&[
            entry("a", 0.2, true),
            entry("b", 0.8, true),
            entry("c", 0.5, true),
        ]);
        assert!(changed);
        assert_eq!(tracker.active(), Some("b"));
    }

    #[test]
    fn non_intersecting_entries_are_ignored() {
        let mut tracker = ChapterTracker::new(None);
        tracker.on_entries(&[entry("a", 0.9, false), entry("b", 0.3, true)]);
        assert_eq!(tracker.active(), Some("b"));
    }

    #[test]
    fn nothing_intersecting_keeps_the_previous_chapter() {
        let mut tracker = ChapterTracker::new(Some("b".into()));
        assert!(!tracker.on_entries(&[entry("a", 0.0, false), entry("c", 0.0, false)]));
        assert!(!tracker.on_entries(&[]));
        assert_eq!(tracker.active(), Some("b"));
    }

    #[test]
    fn ties_go_to_the_first_entry() {
        let mut tracker = ChapterTracker::new(None);
        tracker.on_entries(&[entry("x", 0.5, true), entry("y", 0.5, true)]);
        assert_eq!(tracker.active(), Some("x"));
    }

    #[test]
    fn observer_reports_only_threshold_crossings() {
        let mut observer = IntersectionObserver::default();
        let chapter = |id: &str, top: f32| {
            (
                id.to_string(),
                Rect::from_min_size(pos2(0.0, top), vec2(800.0, 200.0)),
            )
        };

        // First observation reports every target
        let first = observer.observe(viewport(), &[chapter("a", 200.0), chapter("b", 700.0)]);
        assert_eq!(first.len(), 2);
        assert!(first[0].is_intersecting && (first[0].ratio - 1.0).abs() < 1e-5);
        assert!(!first[1].is_intersecting);

        // Moving a little without crossing a threshold reports nothing
        let quiet = observer.observe(viewport(), &[chapter("a", 205.0), chapter("b", 700.0)]);
        assert!(quiet.is_empty());

        // Scrolling "a" half out of the band crosses several thresholds
        let moved = observer.observe(viewport(), &[chapter("a", 100.0), chapter("b", 700.0)]);
        assert_eq!(moved.len(), 1);
        assert_eq!(moved[0].target, "a");
        assert!((moved[0].ratio - 0.5).abs() < 1e-5);
    }

    #[test]
    fn detached_observer_reports_nothing() {
        let mut observer = IntersectionObserver::default();
        observer.detach();
        observer.detach();
        assert!(!observer.is_attached());
        let rect = Rect::from_min_size(pos2(0.0, 250.0), vec2(800.0, 100.0));
        assert!(observer.observe(viewport(), &[("a".into(), rect)]).is_empty());
    }

    #[test]
    fn observer_and_tracker_follow_scrolling() {
        let mut observer = IntersectionObserver::default();
        let mut tracker = ChapterTracker::new(Some("a".into()));
        let layout = |scroll: f32| -> Vec<(String, Rect)> {
            ["a", "b", "c"]
                .iter()
                .enumerate()
                .map(|(i, id)| {
                    let top = 200.0 + i as f32 * 300.0 - scroll;
                    (id.to_string(), Rect::from_min_size(pos2(0.0, top), vec2(800.0, 250.0)))
                })
                .collect()
        };

        tracker.on_entries(&observer.observe(viewport(), &layout(0.0)));
        assert_eq!(tracker.active(), Some("a"));

        tracker.on_entries(&observer.observe(viewport(), &layout(300.0)));
        assert_eq!(tracker.active(), Some("b"));

        // Scrolled far past every chapter: the last active chapter stays
        tracker.on_entries(&observer.observe(viewport(), &layout(5000.0)));
        assert_eq!(tracker.active(), Some("b"));
    }
}
