//! Keybindings for list mode: defaults, an optional override file, and key-to-action lookup.
//!
//! Only list (normal) mode goes through the keymap. Form input and dialogs read
//! raw keys, since every printable character there is text.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Semantic actions available while browsing the user list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    /// Exit the application.
    Quit,
    /// Move the selection up one row.
    MoveUp,
    /// Move the selection down one row.
    MoveDown,
    /// Jump one page up.
    PageUp,
    /// Jump one page down.
    PageDown,
    /// Move focus into the form.
    FocusForm,
    /// Copy the selected user into the edit form.
    EditSelected,
    /// Ask to delete the selected user.
    DeleteSelected,
    /// Re-fetch the whole list.
    Reload,
    /// Re-fetch only the selected user.
    RefreshSelected,
    /// Cycle to the next backend variant.
    SwitchBackend,
    /// Swallow the key.
    Ignore,
}

/// Mapping from `(KeyModifiers, KeyCode)` to [`KeyAction`].
#[derive(Clone, Debug)]
pub struct Keymap {
    bindings: HashMap<(KeyModifiers, KeyCode), KeyAction>,
}

impl Keymap {
    pub fn new_defaults() -> Self {
        use KeyCode::*;
        use KeyModifiers as M;
        let mut bindings = HashMap::new();
        bindings.insert((M::NONE, Char('q')), KeyAction::Quit);
        bindings.insert((M::CONTROL, Char('c')), KeyAction::Quit);
        bindings.insert((M::NONE, Esc), KeyAction::Ignore);

        bindings.insert((M::NONE, Up), KeyAction::MoveUp);
        bindings.insert((M::NONE, Down), KeyAction::MoveDown);
        bindings.insert((M::NONE, Char('k')), KeyAction::MoveUp);
        bindings.insert((M::NONE, Char('j')), KeyAction::MoveDown);
        bindings.insert((M::NONE, PageUp), KeyAction::PageUp);
        bindings.insert((M::NONE, PageDown), KeyAction::PageDown);

        bindings.insert((M::NONE, Char('n')), KeyAction::FocusForm);
        bindings.insert((M::NONE, Char('i')), KeyAction::FocusForm);
        bindings.insert((M::NONE, Char('e')), KeyAction::EditSelected);
        bindings.insert((M::NONE, Enter), KeyAction::EditSelected);
        bindings.insert((M::NONE, Char('d')), KeyAction::DeleteSelected);
        bindings.insert((M::NONE, Delete), KeyAction::DeleteSelected);
        bindings.insert((M::NONE, Char('r')), KeyAction::Reload);
        bindings.insert((M::NONE, Char('u')), KeyAction::RefreshSelected);
        bindings.insert((M::NONE, Char('b')), KeyAction::SwitchBackend);
        bindings.insert((M::NONE, Tab), KeyAction::SwitchBackend);

        Self { bindings }
    }

    /// Start from defaults and apply `Action = KeySpec` lines from `path`.
    ///
    /// Blank lines, `#` comments and lines that do not parse are skipped.
    pub fn from_file(path: &str) -> std::io::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(Self::from_config_str(&contents))
    }

    pub fn from_config_str(contents: &str) -> Self {
        let mut map = Self::default();
        for raw in contents.lines() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let Some((lhs, rhs)) = line.split_once('=') else {
                continue;
            };
            match (parse_action(lhs), parse_key(rhs)) {
                (Some(action), Some(key)) => {
                    map.bindings.insert(key, action);
                }
                _ => tracing::warn!(line, "ignoring unparsable keybinding"),
            }
        }
        map
    }

    pub fn resolve(&self, key: &KeyEvent) -> Option<KeyAction> {
        self.bindings.get(&(key.modifiers, key.code)).copied()
    }

    /// All keys bound to `action`, formatted and sorted.
    pub fn keys_for(&self, action: KeyAction) -> Vec<String> {
        let mut keys: Vec<String> = self
            .bindings
            .iter()
            .filter(|(_, a)| **a == action)
            .map(|((mods, code), _)| Self::format_key(*mods, *code))
            .collect();
        keys.sort();
        keys
    }

    /// Human-readable spec such as "Ctrl+c" or "PageDown".
    pub fn format_key(mods: KeyModifiers, code: KeyCode) -> String {
        use KeyCode::*;
        let base = match code {
            Enter => "Enter".to_string(),
            Delete => "Delete".to_string(),
            Esc => "Esc".to_string(),
            Tab => "Tab".to_string(),
            Up => "Up".to_string(),
            Down => "Down".to_string(),
            PageUp => "PageUp".to_string(),
            PageDown => "PageDown".to_string(),
            Char(c) => c.to_string(),
            _ => format!("{:?}", code),
        };
        if mods.contains(KeyModifiers::CONTROL) {
            format!("Ctrl+{}", base)
        } else {
            base
        }
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::new_defaults()
    }
}

fn parse_key(spec: &str) -> Option<(KeyModifiers, KeyCode)> {
    use KeyCode::*;
    let s = spec.trim();
    let (mut mods, rest) = match s.strip_prefix("Ctrl+") {
        Some(after) => (KeyModifiers::CONTROL, after),
        None => (KeyModifiers::NONE, s),
    };
    let code = match rest {
        "Enter" => Enter,
        "Delete" => Delete,
        "Esc" | "Escape" => Esc,
        "Tab" => Tab,
        "Up" => Up,
        "Down" => Down,
        "PageUp" => PageUp,
        "PageDown" => PageDown,
        _ => {
            let mut chars = rest.chars();
            match (chars.next(), chars.next()) {
                // crossterm reports capitals together with SHIFT
                (Some(c), None) if c.is_uppercase() => {
                    mods |= KeyModifiers::SHIFT;
                    Char(c)
                }
                (Some(c), None) => Char(c),
                _ => return None,
            }
        }
    };
    Some((mods, code))
}

fn parse_action(s: &str) -> Option<KeyAction> {
    match s.trim() {
        "Quit" => Some(KeyAction::Quit),
        "MoveUp" => Some(KeyAction::MoveUp),
        "MoveDown" => Some(KeyAction::MoveDown),
        "PageUp" => Some(KeyAction::PageUp),
        "PageDown" => Some(KeyAction::PageDown),
        "FocusForm" => Some(KeyAction::FocusForm),
        "EditSelected" => Some(KeyAction::EditSelected),
        "DeleteSelected" => Some(KeyAction::DeleteSelected),
        "Reload" => Some(KeyAction::Reload),
        "RefreshSelected" => Some(KeyAction::RefreshSelected),
        "SwitchBackend" => Some(KeyAction::SwitchBackend),
        "Ignore" => Some(KeyAction::Ignore),
        _ => None,
    }
}
