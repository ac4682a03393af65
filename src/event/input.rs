//! Key input types, decoupled from crossterm.
//!
//! Defines [`Key`], [`Modifiers`] and [`KeyEvent`]. Crossterm key events are
//! converted at the boundary so the navigator never depends on crossterm.

use std::ops::{BitAnd, BitOr};

// ---------------------------------------------------------------------------
// Key
// ---------------------------------------------------------------------------

/// Keyboard key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Tab,
    BackTab,
    Backspace,
    Delete,
    Left,
    Right,
    Up,
    Down,
    Home,
    End,
    PageUp,
    PageDown,
    F(u8),
}

// ---------------------------------------------------------------------------
// Modifiers
// ---------------------------------------------------------------------------

/// Modifier key bitmask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers(pub u8);

impl Modifiers {
    pub const NONE: Modifiers = Modifiers(0);
    pub const SHIFT: Modifiers = Modifiers(1);
    pub const CTRL: Modifiers = Modifiers(2);
    pub const ALT: Modifiers = Modifiers(4);

    /// Check whether `self` contains all the bits in `other`.
    pub fn contains(self, other: Modifiers) -> bool {
        (self.0 & other.0) == other.0
    }

    /// Check whether no modifier bits are set.
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl BitOr for Modifiers {
    type Output = Modifiers;
    fn bitor(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 | rhs.0)
    }
}

impl BitAnd for Modifiers {
    type Output = Modifiers;
    fn bitand(self, rhs: Self) -> Self::Output {
        Modifiers(self.0 & rhs.0)
    }
}

// ---------------------------------------------------------------------------
// KeyEvent
// ---------------------------------------------------------------------------

/// A key press with modifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Create a new key event.
    pub fn new(code: Key, modifiers: Modifiers) -> Self {
        Self { code, modifiers }
    }

    /// A key press without modifiers.
    pub fn plain(code: Key) -> Self {
        Self::new(code, Modifiers::NONE)
    }

    /// Convert a crossterm terminal event.
    ///
    /// Returns `None` for non-key events, key releases, and keys the tree has
    /// no use for (media keys, modifiers pressed alone, ...).
    pub fn from_crossterm(event: &crossterm::event::Event) -> Option<KeyEvent> {
        match event {
            crossterm::event::Event::Key(ke)
                if ke.kind != crossterm::event::KeyEventKind::Release =>
            {
                Some(KeyEvent {
                    code: convert_key_code(ke.code)?,
                    modifiers: convert_modifiers(ke.modifiers),
                })
            }
            _ => None,
        }
    }
}

impl From<Key> for KeyEvent {
    fn from(code: Key) -> Self {
        Self::plain(code)
    }
}

// ---------------------------------------------------------------------------
// crossterm conversions
// ---------------------------------------------------------------------------

/// Convert crossterm key modifiers to our `Modifiers`.
fn convert_modifiers(m: crossterm::event::KeyModifiers) -> Modifiers {
    let mut out = Modifiers::NONE;
    if m.contains(crossterm::event::KeyModifiers::SHIFT) {
        out = out | Modifiers::SHIFT;
    }
    if m.contains(crossterm::event::KeyModifiers::CONTROL) {
        out = out | Modifiers::CTRL;
    }
    if m.contains(crossterm::event::KeyModifiers::ALT) {
        out = out | Modifiers::ALT;
    }
    out
}

/// Convert a crossterm key code, dropping the ones we don't model.
fn convert_key_code(code: crossterm::event::KeyCode) -> Option<Key> {
    let key = match code {
        crossterm::event::KeyCode::Char(c) => Key::Char(c),
        crossterm::event::KeyCode::Enter => Key::Enter,
        crossterm::event::KeyCode::Esc => Key::Escape,
        crossterm::event::KeyCode::Tab => Key::Tab,
        crossterm::event::KeyCode::BackTab => Key::BackTab,
        crossterm::event::KeyCode::Backspace => Key::Backspace,
        crossterm::event::KeyCode::Delete => Key::Delete,
        crossterm::event::KeyCode::Left => Key::Left,
        crossterm::event::KeyCode::Right => Key::Right,
        crossterm::event::KeyCode::Up => Key::Up,
        crossterm::event::KeyCode::Down => Key::Down,
        crossterm::event::KeyCode::Home => Key::Home,
        crossterm::event::KeyCode::End => Key::End,
        crossterm::event::KeyCode::PageUp => Key::PageUp,
        crossterm::event::KeyCode::PageDown => Key::PageDown,
        crossterm::event::KeyCode::F(n) => Key::F(n),
        _ => return None,
    };
    Some(key)
}

// ===========================================================================
// Tests
// ===========================================================================
