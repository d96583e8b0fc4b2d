//! Global keyboard shortcuts.
//!
//! Key presses are normalized into combo strings such as `"ctrl+k"` or `"escape"`:
//! held modifiers in the fixed order ctrl, meta, shift, alt, followed by the
//! lower-cased key name, joined with `+`. Bindings are looked up by exact match.

use crate::lifecycle::{ListenerKind, ListenerSet};
use eframe::egui;
use std::collections::HashMap;

/// Separator between combo parts.
pub const COMBO_SEPARATOR: &str = "+";

/// A key-down event reduced to what combo normalization needs.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyPress {
    /// Key name as reported by the platform, e.g. "K" or "Escape"
    pub key: String,
    /// Control held
    pub ctrl: bool,
    /// Meta / Command held
    pub meta: bool,
    /// Shift held
    pub shift: bool,
    /// Alt / Option held
    pub alt: bool,
}

impl KeyPress {
    /// A key press without modifiers.
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Default::default()
        }
    }

    /// Adds the control modifier.
    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    /// Adds the meta modifier.
    pub fn meta(mut self) -> Self {
        self.meta = true;
        self
    }

    /// Adds the shift modifier.
    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Adds the alt modifier.
    pub fn alt(mut self) -> Self {
        self.alt = true;
        self
    }

    /// The normalized combo string for this press.
    pub fn combo(&self) -> String {
        let key = self.key.to_lowercase();
        let mut parts: Vec<&str> = Vec::with_capacity(5);
        if self.ctrl {
            parts.push("ctrl");
        }
        if self.meta {
            parts.push("meta");
        }
        if self.shift {
            parts.push("shift");
        }
        if self.alt {
            parts.push("alt");
        }
        parts.push(&key);
        parts.join(COMBO_SEPARATOR)
    }

    /// Converts an egui key-down event. Releases and other events yield `None`.
    pub fn from_egui(event: &egui::Event) -> Option<Self> {
        match event {
            egui::Event::Key {
                key,
                pressed: true,
                modifiers,
                ..
            } => Some(Self {
                key: key.name().to_string(),
                ctrl: modifiers.ctrl,
                meta: modifiers.mac_cmd,
                shift: modifiers.shift,
                alt: modifiers.alt,
            }),
            _ => None,
        }
    }
}

/// Exact-match table from combo strings to bound commands.
#[derive(Debug, Clone)]
pub struct HotkeyMap<T> {
    bindings: HashMap<String, T>,
}

impl<T> Default for HotkeyMap<T> {
    fn default() -> Self {
        Self {
            bindings: HashMap::new(),
        }
    }
}

impl<T> HotkeyMap<T> {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `combo` (already in normalized form, case-insensitive) to `command`,
    /// replacing any previous binding.
    pub fn bind(mut self, combo: &str, command: T) -> Self {
        self.bindings.insert(combo.to_lowercase(), command);
        self
    }

    /// The command bound to this key press, if any.
    pub fn lookup(&self, press: &KeyPress) -> Option<&T> {
        self.bindings.get(&press.combo())
    }

    /// Number of bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// True when no binding exists.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

/// Routes key-down events to a [`HotkeyMap`] while attached.
#[derive(Debug)]
pub struct HotkeyDispatcher<T> {
    map: HotkeyMap<T>,
    listeners: ListenerSet,
}

impl<T: Clone> HotkeyDispatcher<T> {
    /// Creates a detached dispatcher.
    pub fn new(map: HotkeyMap<T>) -> Self {
        Self {
            map,
            listeners: ListenerSet::new(),
        }
    }

    /// Starts listening for key presses.
    pub fn attach(&mut self) {
        if self.listeners.register(ListenerKind::KeyDown) {
            log::debug!("Hotkeys attached ({} bindings)", self.map.len());
        }
    }

    /// Stops listening. Safe to call repeatedly.
    pub fn detach(&mut self) {
        if !self.listeners.remove_all().is_empty() {
            log::debug!("Hotkeys detached");
        }
    }

    /// True while attached.
    pub fn is_attached(&self) -> bool {
        self.listeners.is_registered(ListenerKind::KeyDown)
    }

    /// Looks up a key press. Unbound presses and presses while detached yield `None`.
    pub fn dispatch(&self, press: &KeyPress) -> Option<T> {
        if !self.is_attached() {
            return None;
        }
        self.map.lookup(press).cloned()
    }

    /// Dispatches every key-down event of the current egui frame.
    ///
    /// Matched keys are consumed so that focused widgets do not also act on them.
    pub fn poll(&self, ctx: &egui::Context) -> Vec<T> {
        if !self.is_attached() {
            return Vec::new();
        }
        let matched: Vec<(T, egui::Modifiers, egui::Key)> = ctx.input(|i| {
            i.events
                .iter()
                .filter_map(|event| {
                    let press = KeyPress::from_egui(event)?;
                    let command = self.map.lookup(&press)?.clone();
                    match event {
                        egui::Event::Key { key, modifiers, .. } => {
                            Some((command, *modifiers, *key))
                        }
                        _ => None,
                    }
                })
                .collect()
        });

        if matched.is_empty() {
            return Vec::new();
        }
        ctx.input_mut(|i| {
            for (_, modifiers, key) in &matched {
                i.consume_key(*modifiers, *key);
            }
        });
        matched.into_iter().map(|(command, _, _)| command).collect()
    }
}

impl<T> Drop for HotkeyDispatcher<T> {
    fn drop(&mut self) {
        self.listeners.remove_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Command {
        Open,
        Close,
        Save,
    }

    fn map() -> HotkeyMap<Command> {
        HotkeyMap::new()
            .bind("ctrl+k", Command::Open)
            .bind("meta+k", Command::Open)
            .bind("escape", Command::Close)
            .bind("ctrl+shift+s", Command::Save)
    }

    #[test]
    fn combos_are_normalized() {
        assert_eq!(KeyPress::new("k").ctrl().combo(), "ctrl+k");
        assert_eq!(KeyPress::new("K").meta().combo(), "meta+k");
        assert_eq!(KeyPress::new("Escape").combo(), "escape");
    }

    #[test]
    fn modifier_order_is_fixed() {
        let press = KeyPress::new("X").alt().shift().meta().ctrl();
        assert_eq!(press.combo(), "ctrl+meta+shift+alt+x");
        let press = KeyPress::new("s").shift().ctrl();
        assert_eq!(press.combo(), "ctrl+shift+s");
    }

    #[test]
    fn lookup_is_exact() {
        let map = map();
        assert_eq!(map.lookup(&KeyPress::new("K").ctrl()), Some(&Command::Open));
        assert_eq!(map.lookup(&KeyPress::new("k").meta()), Some(&Command::Open));
        assert_eq!(map.lookup(&KeyPress::new("k")), None);
        assert_eq!(map.lookup(&KeyPress::new("k").ctrl().shift()), None);
        assert_eq!(
            map.lookup(&KeyPress::new("S").shift().ctrl()),
            Some(&Command::Save)
        );
    }

    #[test]
    fn dispatch_requires_attachment() {
        let mut dispatcher = HotkeyDispatcher::new(map());
        let press = KeyPress::new("Escape");
        assert_eq!(dispatcher.dispatch(&press), None);

        dispatcher.attach();
        assert_eq!(dispatcher.dispatch(&press), Some(Command::Close));
        assert_eq!(dispatcher.dispatch(&KeyPress::new("q")), None);

        dispatcher.detach();
        dispatcher.detach();
        assert!(!dispatcher.is_attached());
        assert_eq!(dispatcher.dispatch(&press), None);
    }

    #[test]
    fn egui_key_events_convert() {
        let event = egui::Event::Key {
            key: egui::Key::K,
            physical_key: None,
            pressed: true,
            repeat: false,
            modifiers: egui::Modifiers {
                ctrl: true,
                command: true,
                ..Default::default()
            },
        };
        assert_eq!(KeyPress::from_egui(&event).unwrap().combo(), "ctrl+k");

        let release = egui::Event::Key {
            key: egui::Key::K,
            physical_key: None,
            pressed: false,
            repeat: false,
            modifiers: egui::Modifiers::NONE,
        };
        assert!(KeyPress::from_egui(&release).is_none());
    }
}
