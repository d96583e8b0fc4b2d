//! Command palette state machine.
//!
//! The palette is either closed or open. Opening schedules a focus request for the
//! query field a short moment later; closing (from any path) clears the query.

use crate::constants::PALETTE_FOCUS_DELAY;
use crate::types::{Action, Effect};

/// Something that can carry out an [`Effect`].
pub trait EffectRunner {
    /// Performs the effect.
    fn run(&mut self, effect: &Effect);
}

/// Returns the actions whose label contains `query`, ignoring case.
///
/// The query is trimmed first; an empty query returns every action. Original order
/// is preserved.
pub fn filter_actions<'a>(actions: &'a [Action], query: &str) -> Vec<&'a Action> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return actions.iter().collect();
    }
    actions
        .iter()
        .filter(|a| a.label.to_lowercase().contains(&needle))
        .collect()
}

/// Visibility of the palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaletteState {
    /// Hidden
    Closed,
    /// Shown
    Open,
}

/// The command palette.
#[derive(Debug, Clone)]
pub struct CommandPalette {
    actions: Vec<Action>,
    query: String,
    state: PaletteState,
    focus_due_at: Option<f64>,
}

impl CommandPalette {
    /// Creates a closed palette over a fixed action list.
    pub fn new(actions: Vec<Action>) -> Self {
        Self {
            actions,
            query: String::new(),
            state: PaletteState::Closed,
            focus_due_at: None,
        }
    }

    /// Current visibility.
    pub fn state(&self) -> PaletteState {
        self.state
    }

    /// True while shown.
    pub fn is_open(&self) -> bool {
        self.state == PaletteState::Open
    }

    /// Every action, unfiltered.
    pub fn actions(&self) -> &[Action] {
        &self.actions
    }

    /// Current query text.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Mutable query text, for binding to a text field.
    pub fn query_mut(&mut self) -> &mut String {
        &mut self.query
    }

    /// Replaces the query text.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    /// Actions matching the current query.
    pub fn visible(&self) -> Vec<&Action> {
        filter_actions(&self.actions, &self.query)
    }

    /// Shows the palette at time `now` (seconds). Does nothing if already open.
    pub fn open(&mut self, now: f64) {
        if self.is_open() {
            return;
        }
        log::debug!("Command palette opened");
        self.state = PaletteState::Open;
        self.focus_due_at = Some(now + PALETTE_FOCUS_DELAY);
    }

    /// Hides the palette and resets the query.
    pub fn close(&mut self) {
        if self.is_open() {
            log::debug!("Command palette closed");
        }
        self.state = PaletteState::Closed;
        self.query.clear();
        self.focus_due_at = None;
    }

    /// Returns true exactly once, at the first call at or after the focus delay.
    pub fn take_focus_request(&mut self, now: f64) -> bool {
        match self.focus_due_at {
            Some(due) if self.is_open() && now >= due => {
                self.focus_due_at = None;
                true
            }
            _ => false,
        }
    }

    /// Seconds until the pending focus request fires, if one is pending.
    pub fn focus_pending_in(&self, now: f64) -> Option<f64> {
        self.focus_due_at.map(|due| (due - now).max(0.0))
    }

    /// Runs the `index`-th visible action, then closes the palette.
    ///
    /// Returns the label of the action that ran, or `None` for an out-of-range index
    /// (in which case the palette stays as it was).
    pub fn select(&mut self, index: usize, runner: &mut dyn EffectRunner) -> Option<String> {
        let action = self.visible().get(index).map(|a| (*a).clone())?;
        log::debug!("Command palette running \"{}\"", action.label);
        runner.run(&action.effect);
        self.close();
        Some(action.label)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    /// Records effects instead of performing them.
    #[derive(Debug, Default)]
    pub(crate) struct RecordingRunner {
        pub effects: Vec<Effect>,
    }

    impl EffectRunner for RecordingRunner {
        fn run(&mut self, effect: &Effect) {
            self.effects.push(effect.clone());
        }
    }

    fn actions() -> Vec<Action> {
        vec![
            Action::new(
                "Go to Projects",
                Effect::ScrollTo {
                    section: "projects".into(),
                },
            ),
            Action::new(
                "Open GitHub",
                Effect::OpenLink {
                    url: "https://github.com/".into(),
                },
            ),
        ]
    }

    fn labels(actions: &[&Action]) -> Vec<String> {
        actions.iter().map(|a| a.label.clone()).collect()
    }

    #[test]
    fn empty_query_returns_everything_in_order() {
        let all = actions();
        assert_eq!(labels(&filter_actions(&all, "")), vec!["Go to Projects", "Open GitHub"]);
        assert_eq!(filter_actions(&all, "   ").len(), 2);
    }

    #[test]
    fn matching_is_case_insensitive_substring() {
        let all = actions();
        assert_eq!(labels(&filter_actions(&all, "O")), vec!["Go to Projects", "Open GitHub"]);
        assert_eq!(labels(&filter_actions(&all, "gi")), vec!["Open GitHub"]);
        assert_eq!(labels(&filter_actions(&all, "GITHUB")), vec!["Open GitHub"]);
        assert_eq!(labels(&filter_actions(&all, " proj ")), vec!["Go to Projects"]);
    }

    #[test]
    fn no_match_is_an_empty_list() {
        assert!(filter_actions(&actions(), "zzz").is_empty());
    }

    #[test]
    fn open_is_idempotent_and_focuses_after_delay() {
        let mut palette = CommandPalette::new(actions());
        assert_eq!(palette.state(), PaletteState::Closed);

        palette.open(10.0);
        assert!(palette.is_open());
        assert!(!palette.take_focus_request(10.0));

        // A second open must not push the focus deadline back
        palette.open(10.04);
        assert!(palette.take_focus_request(10.06));
        assert!(!palette.take_focus_request(10.2));
    }

    #[test]
    fn close_resets_the_query() {
        let mut palette = CommandPalette::new(actions());
        palette.open(0.0);
        palette.set_query("git");
        assert_eq!(palette.visible().len(), 1);

        palette.close();
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
        assert!(!palette.take_focus_request(1.0));
    }

    #[test]
    fn select_runs_the_filtered_action_then_closes() {
        let mut palette = CommandPalette::new(actions());
        let mut runner = RecordingRunner::default();
        palette.open(0.0);
        palette.set_query("hub");

        assert_eq!(palette.select(0, &mut runner).as_deref(), Some("Open GitHub"));
        assert_eq!(
            runner.effects,
            vec![Effect::OpenLink {
                url: "https://github.com/".into()
            }]
        );
        assert!(!palette.is_open());
        assert_eq!(palette.query(), "");
    }

    #[test]
    fn select_out_of_range_does_nothing() {
        let mut palette = CommandPalette::new(actions());
        let mut runner = RecordingRunner::default();
        palette.open(0.0);
        palette.set_query("zzz");
        assert_eq!(palette.select(0, &mut runner), None);
        assert!(runner.effects.is_empty());
        assert!(palette.is_open());
    }
}
