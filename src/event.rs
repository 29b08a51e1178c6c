//! Key events and key sources.
//!
//! Widgets never call into crossterm directly for input; they pull from a
//! [`KeySource`]. The real terminal is `CrosstermKeys`; tests and demos can
//! replay a fixed sequence with [`ScriptedKeys`].

use std::io;

use crossterm::event::{self, Event, KeyCode, KeyEventKind};

/// A single keystroke, already collapsed to what the widgets care about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Char(char),
    Enter,
    Escape,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    F1,
}

/// Blocking source of key events.
///
/// Every widget loop suspends exactly here. Injecting the source keeps the
/// engines deterministic under test: a scripted sequence replays the same
/// interaction every time.
pub trait KeySource {
    /// Block until the next key the widgets understand.
    fn next_key(&mut self) -> io::Result<Key>;
}

/// Key source backed by the real terminal via crossterm.
///
/// Expects raw mode to be active (see `surface::AnsiSurface`). Unrecognized
/// events (mouse, resize, modifier-only) are skipped.
pub struct CrosstermKeys;

impl KeySource for CrosstermKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        loop {
            if let Event::Key(key_event) = event::read()? {
                // Kitty-protocol terminals report releases too; only act on presses.
                if key_event.kind == KeyEventKind::Release {
                    continue;
                }
                log::debug!(
                    "Key event: {:?} with modifiers {:?}",
                    key_event.code,
                    key_event.modifiers
                );
                let key = match key_event.code {
                    KeyCode::Char(c) => Key::Char(c),
                    KeyCode::Enter => Key::Enter,
                    KeyCode::Esc => Key::Escape,
                    KeyCode::Backspace => Key::Backspace,
                    KeyCode::Delete => Key::Delete,
                    KeyCode::Tab => Key::Tab,
                    KeyCode::Up => Key::Up,
                    KeyCode::Down => Key::Down,
                    KeyCode::Left => Key::Left,
                    KeyCode::Right => Key::Right,
                    KeyCode::F(1) => Key::F1,
                    _ => continue,
                };
                return Ok(key);
            }
        }
    }
}

/// Deterministic key source that replays a fixed sequence.
///
/// Running out of keys is an error: a widget asking for more input than the
/// script provides means the scenario under test diverged.
pub struct ScriptedKeys {
    keys: std::vec::IntoIter<Key>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect::<Vec<_>>().into_iter(),
        }
    }

    /// Convenience: printable characters from a string, e.g. `typed("ap")`.
    pub fn typed(text: &str) -> Vec<Key> {
        text.chars().map(Key::Char).collect()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> io::Result<Key> {
        self.keys.next().ok_or_else(|| {
            io::Error::new(io::ErrorKind::UnexpectedEof, "scripted key sequence exhausted")
        })
    }
}
