//! Key map: key+modifier combinations to navigation actions.
//!
//! [`KeyMap::with_defaults`] installs the tree-view bindings (arrows, Home/End,
//! Enter/Space). Bindings can also be written as strings like `"ctrl+down"`.

use std::collections::HashMap;
use std::fmt;

use super::input::{Key, KeyEvent, Modifiers};

// ---------------------------------------------------------------------------
// NavAction
// ---------------------------------------------------------------------------

/// What a key does to the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavAction {
    /// Focus the next visible node.
    Next,
    /// Focus the previous visible node.
    Previous,
    /// Focus the first visible node.
    First,
    /// Focus the last visible node.
    Last,
    /// Open the focused node, or step into its first child if already open.
    Expand,
    /// Close the focused node, or step out to its parent if already closed.
    Collapse,
    /// Toggle selection of the focused node.
    Activate,
}

// ---------------------------------------------------------------------------
// BindingError
// ---------------------------------------------------------------------------

/// Errors from parsing a binding string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("empty key binding")]
    Empty,
    #[error("unknown modifier `{0}`")]
    UnknownModifier(String),
    #[error("unknown key `{0}`")]
    UnknownKey(String),
}

/// Parse a binding string such as `"down"`, `"ctrl+shift+home"` or `"space"`.
///
/// Names are case-insensitive; a single character stands for itself.
pub fn parse_binding(spec: &str) -> Result<(Key, Modifiers), BindingError> {
    let spec = spec.trim();
    if spec.is_empty() {
        return Err(BindingError::Empty);
    }
    // "+" on its own (or as the last segment, "ctrl++") is the plus key.
    let (mods_part, key_part) = match spec.strip_suffix("++") {
        Some(prefix) => (Some(prefix), "+"),
        None if spec == "+" => (None, "+"),
        None => match spec.rsplit_once('+') {
            Some((prefix, key)) => (Some(prefix), key),
            None => (None, spec),
        },
    };

    let mut modifiers = Modifiers::NONE;
    if let Some(mods) = mods_part {
        for name in mods.split('+') {
            modifiers = modifiers
                | match name.trim().to_ascii_lowercase().as_str() {
                    "ctrl" | "control" => Modifiers::CTRL,
                    "shift" => Modifiers::SHIFT,
                    "alt" => Modifiers::ALT,
                    other => return Err(BindingError::UnknownModifier(other.to_owned())),
                };
        }
    }

    let key = parse_key(key_part.trim())?;
    Ok((key, modifiers))
}

fn parse_key(name: &str) -> Result<Key, BindingError> {
    let mut chars = name.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        return Ok(Key::Char(c));
    }
    let lower = name.to_ascii_lowercase();
    let key = match lower.as_str() {
        "" => return Err(BindingError::Empty),
        "space" => Key::Char(' '),
        "enter" | "return" => Key::Enter,
        "esc" | "escape" => Key::Escape,
        "tab" => Key::Tab,
        "backtab" => Key::BackTab,
        "backspace" => Key::Backspace,
        "delete" | "del" => Key::Delete,
        "left" => Key::Left,
        "right" => Key::Right,
        "up" => Key::Up,
        "down" => Key::Down,
        "home" => Key::Home,
        "end" => Key::End,
        "pageup" => Key::PageUp,
        "pagedown" => Key::PageDown,
        f if f.starts_with('f') => f[1..]
            .parse::<u8>()
            .map(Key::F)
            .map_err(|_| BindingError::UnknownKey(name.to_owned()))?,
        _ => return Err(BindingError::UnknownKey(name.to_owned())),
    };
    Ok(key)
}

// ---------------------------------------------------------------------------
// KeyMap
// ---------------------------------------------------------------------------

/// Registry of key bindings, mapping (Key, Modifiers) -> NavAction.
#[derive(Clone, Default)]
pub struct KeyMap {
    bindings: HashMap<(Key, Modifiers), NavAction>,
}

impl KeyMap {
    /// Create an empty key map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a key map with the standard tree-view bindings.
    ///
    /// Defaults:
    /// - `Down` / `Up` -> Next / Previous
    /// - `Right` / `Left` -> Expand / Collapse
    /// - `Home` / `End` -> First / Last
    /// - `Enter`, `Space` -> Activate
    pub fn with_defaults() -> Self {
        let mut map = Self::new();
        map.bind(Key::Down, Modifiers::NONE, NavAction::Next);
        map.bind(Key::Up, Modifiers::NONE, NavAction::Previous);
        map.bind(Key::Right, Modifiers::NONE, NavAction::Expand);
        map.bind(Key::Left, Modifiers::NONE, NavAction::Collapse);
        map.bind(Key::Home, Modifiers::NONE, NavAction::First);
        map.bind(Key::End, Modifiers::NONE, NavAction::Last);
        map.bind(Key::Enter, Modifiers::NONE, NavAction::Activate);
        map.bind(Key::Char(' '), Modifiers::NONE, NavAction::Activate);
        map
    }

    /// Register a binding, replacing any existing one for the same keys.
    pub fn bind(&mut self, key: Key, modifiers: Modifiers, action: NavAction) {
        self.bindings.insert((key, modifiers), action);
    }

    /// Register a binding written as a string (see [`parse_binding`]).
    pub fn bind_str(&mut self, spec: &str, action: NavAction) -> Result<(), BindingError> {
        let (key, modifiers) = parse_binding(spec)?;
        self.bind(key, modifiers, action);
        Ok(())
    }

    /// Remove a binding, returning its action.
    pub fn unbind(&mut self, key: Key, modifiers: Modifiers) -> Option<NavAction> {
        self.bindings.remove(&(key, modifiers))
    }

    /// Look up the action for a key event (exact modifier match).
    pub fn resolve(&self, event: &KeyEvent) -> Option<NavAction> {
        self.bindings.get(&(event.code, event.modifiers)).copied()
    }

    /// Number of registered bindings.
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    /// Whether the map has no bindings.
    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl fmt::Debug for KeyMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMap")
            .field("bindings", &self.bindings.len())
            .finish()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    // ── KeyMap ───────────────────────────────────────────────────────

    #[test]
    fn new_map_is_empty() {
        let map = KeyMap::new();
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);
    }

    #[test]
    fn defaults_cover_navigation() {
        let map = KeyMap::with_defaults();
        assert_eq!(map.len(), 8);
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Down)), Some(NavAction::Next));
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Up)), Some(NavAction::Previous));
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Right)), Some(NavAction::Expand));
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Left)), Some(NavAction::Collapse));
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Home)), Some(NavAction::First));
        assert_eq!(map.resolve(&KeyEvent::plain(Key::End)), Some(NavAction::Last));
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Enter)), Some(NavAction::Activate));
        assert_eq!(
            map.resolve(&KeyEvent::plain(Key::Char(' '))),
            Some(NavAction::Activate)
        );
    }

    #[test]
    fn modifiers_must_match_exactly() {
        let map = KeyMap::with_defaults();
        assert_eq!(map.resolve(&KeyEvent::new(Key::Down, Modifiers::SHIFT)), None);
    }

    #[test]
    fn bind_replaces_and_unbind_removes() {
        let mut map = KeyMap::with_defaults();
        map.bind(Key::Down, Modifiers::NONE, NavAction::Last);
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Down)), Some(NavAction::Last));
        assert_eq!(map.unbind(Key::Down, Modifiers::NONE), Some(NavAction::Last));
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Down)), None);
        assert_eq!(map.unbind(Key::Down, Modifiers::NONE), None);
    }

    #[test]
    fn bind_str_vim_keys() {
        let mut map = KeyMap::new();
        map.bind_str("j", NavAction::Next).unwrap();
        map.bind_str("k", NavAction::Previous).unwrap();
        map.bind_str("ctrl+shift+End", NavAction::Last).unwrap();
        assert_eq!(map.resolve(&KeyEvent::plain(Key::Char('j'))), Some(NavAction::Next));
        assert_eq!(
            map.resolve(&KeyEvent::new(Key::End, Modifiers::CTRL | Modifiers::SHIFT)),
            Some(NavAction::Last)
        );
    }

    // ── parse_binding ────────────────────────────────────────────────

    #[test]
    fn parse_named_keys() {
        assert_eq!(parse_binding("space"), Ok((Key::Char(' '), Modifiers::NONE)));
        assert_eq!(parse_binding("PageDown"), Ok((Key::PageDown, Modifiers::NONE)));
        assert_eq!(parse_binding("f12"), Ok((Key::F(12), Modifiers::NONE)));
        assert_eq!(parse_binding("alt+left"), Ok((Key::Left, Modifiers::ALT)));
    }

    #[test]
    fn parse_plus_key() {
        assert_eq!(parse_binding("+"), Ok((Key::Char('+'), Modifiers::NONE)));
        assert_eq!(parse_binding("ctrl++"), Ok((Key::Char('+'), Modifiers::CTRL)));
    }

    #[test]
    fn parse_errors() {
        assert_eq!(parse_binding("  "), Err(BindingError::Empty));
        assert_eq!(parse_binding("ctrl+"), Err(BindingError::Empty));
        assert_eq!(
            parse_binding("hyper+down"),
            Err(BindingError::UnknownModifier("hyper".into()))
        );
        assert_eq!(
            parse_binding("banana"),
            Err(BindingError::UnknownKey("banana".into()))
        );
        assert_eq!(
            parse_binding("fx"),
            Err(BindingError::UnknownKey("fx".into()))
        );
    }

    #[test]
    fn error_messages() {
        assert_eq!(BindingError::Empty.to_string(), "empty key binding");
        assert_eq!(
            BindingError::UnknownKey("banana".into()).to_string(),
            "unknown key `banana`"
        );
    }
}
