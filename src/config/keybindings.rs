//! Keybinding configuration and the shortcut lookup map.
//!
//! A single global accelerator (stop-capture, Ctrl+S by default) plus the
//! history shortcuts are configurable here. The embedding UI feeds key
//! events through [`ShortcutMap::lookup`]; a `Some` result means the chord
//! was consumed and the host's default handling should be suppressed.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Actions that can be bound to keyboard shortcuts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    /// End the capture window early.
    StopCapture,
    /// Step the history cursor back.
    Undo,
    /// Step the history cursor forward.
    Redo,
    /// Discard annotations and redraw the base print.
    Reset,
}

/// A key chord: the key name with modifier flags.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct KeyBinding {
    pub key: String,
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
}

impl KeyBinding {
    /// Parses a chord string like "Ctrl+S" or "Ctrl+Shift+Z".
    ///
    /// Modifiers may appear in any order; matching on the key itself is
    /// case-insensitive.
    pub fn parse(s: &str) -> Result<Self, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err("empty keybinding string".to_string());
        }

        let mut ctrl = false;
        let mut shift = false;
        let mut alt = false;
        let mut key = None;

        for part in s.split('+').map(str::trim) {
            match part.to_lowercase().as_str() {
                "ctrl" | "control" => ctrl = true,
                "shift" => shift = true,
                "alt" => alt = true,
                "" => return Err(format!("malformed keybinding: {s}")),
                _ => {
                    if key.replace(part.to_string()).is_some() {
                        return Err(format!("more than one key in: {s}"));
                    }
                }
            }
        }

        match key {
            Some(key) => Ok(Self {
                key,
                ctrl,
                shift,
                alt,
            }),
            None => Err(format!("no key specified in: {s}")),
        }
    }

    /// Whether this chord matches the given key and modifier state.
    pub fn matches(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> bool {
        self.key.eq_ignore_ascii_case(key)
            && self.ctrl == ctrl
            && self.shift == shift
            && self.alt == alt
    }
}

/// Compiled chord-to-action lookup.
#[derive(Debug, Clone)]
pub struct ShortcutMap {
    bindings: HashMap<KeyBinding, Action>,
}

impl ShortcutMap {
    /// Finds the action for the given key and modifier state.
    ///
    /// Returning `Some` means the chord is consumed; the embedder should
    /// suppress its default handling for the event.
    pub fn lookup(&self, key: &str, ctrl: bool, shift: bool, alt: bool) -> Option<Action> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(key, ctrl, shift, alt))
            .map(|(_, action)| *action)
    }
}

/// Keybinding configuration section.
///
/// Each action accepts multiple chords:
/// ```toml
/// [keybindings]
/// stop_capture = ["Ctrl+S"]
/// undo = ["Ctrl+Z"]
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeybindingsConfig {
    #[serde(default = "default_stop_capture")]
    pub stop_capture: Vec<String>,

    #[serde(default = "default_undo")]
    pub undo: Vec<String>,

    #[serde(default = "default_redo")]
    pub redo: Vec<String>,

    #[serde(default = "default_reset")]
    pub reset: Vec<String>,
}

impl Default for KeybindingsConfig {
    fn default() -> Self {
        Self {
            stop_capture: default_stop_capture(),
            undo: default_undo(),
            redo: default_redo(),
            reset: default_reset(),
        }
    }
}

impl KeybindingsConfig {
    /// Compiles the configured chords, rejecting duplicates.
    pub fn build_shortcut_map(&self) -> Result<ShortcutMap, String> {
        let mut bindings = HashMap::new();

        let mut insert = |chords: &[String], action: Action| -> Result<(), String> {
            for chord in chords {
                let binding = KeyBinding::parse(chord)?;
                if let Some(existing) = bindings.insert(binding, action) {
                    return Err(format!(
                        "duplicate keybinding '{chord}' assigned to both {existing:?} and {action:?}"
                    ));
                }
            }
            Ok(())
        };

        insert(&self.stop_capture, Action::StopCapture)?;
        insert(&self.undo, Action::Undo)?;
        insert(&self.redo, Action::Redo)?;
        insert(&self.reset, Action::Reset)?;

        Ok(ShortcutMap { bindings })
    }
}

fn default_stop_capture() -> Vec<String> {
    vec!["Ctrl+S".to_string()]
}

fn default_undo() -> Vec<String> {
    vec!["Ctrl+Z".to_string()]
}

fn default_redo() -> Vec<String> {
    vec!["Ctrl+Y".to_string()]
}

fn default_reset() -> Vec<String> {
    vec!["Ctrl+R".to_string()]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_handles_modifier_order_and_spacing() {
        let a = KeyBinding::parse("Ctrl+Shift+Z").unwrap();
        let b = KeyBinding::parse("shift + ctrl + z").unwrap();
        assert!(a.ctrl && a.shift && !a.alt);
        assert!(a.matches("z", true, true, false));
        assert!(b.matches("Z", true, true, false));
    }

    #[test]
    fn parse_rejects_garbage() {
        assert!(KeyBinding::parse("").is_err());
        assert!(KeyBinding::parse("Ctrl+").is_err());
        assert!(KeyBinding::parse("Ctrl+A+B").is_err());
    }

    #[test]
    fn matches_requires_exact_modifiers() {
        let binding = KeyBinding::parse("Ctrl+S").unwrap();
        assert!(binding.matches("s", true, false, false));
        assert!(!binding.matches("s", false, false, false));
        assert!(!binding.matches("s", true, true, false));
    }

    #[test]
    fn default_map_binds_stop_capture_to_ctrl_s() {
        let map = KeybindingsConfig::default().build_shortcut_map().unwrap();
        assert_eq!(map.lookup("s", true, false, false), Some(Action::StopCapture));
        assert_eq!(map.lookup("z", true, false, false), Some(Action::Undo));
        assert_eq!(map.lookup("y", true, false, false), Some(Action::Redo));
        assert_eq!(map.lookup("r", true, false, false), Some(Action::Reset));
        // Plain 's' is not consumed
        assert_eq!(map.lookup("s", false, false, false), None);
    }

    #[test]
    fn duplicate_bindings_are_rejected() {
        let config = KeybindingsConfig {
            stop_capture: vec!["Ctrl+Z".to_string()],
            ..KeybindingsConfig::default()
        };
        assert!(config.build_shortcut_map().is_err());
    }
}
