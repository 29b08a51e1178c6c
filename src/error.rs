//! Fail-fast construction errors.
//!
//! Widgets validate their inputs when built, not mid-render: an empty menu
//! or a zero-width bar is a programming error and surfaces immediately.

use std::fmt;

#[derive(Debug, PartialEq, Eq)]
pub enum BuildError {
    /// A menu was constructed with no options.
    EmptyOptions,
    /// A width or bar width of zero was requested.
    ZeroWidth,
    /// Two options, or an option and a shortcut, share the same key.
    DuplicateKey(char),
    /// A shortcut was bound to a digit, which is reserved for direct option
    /// selection.
    DigitShortcut(char),
}

impl fmt::Display for BuildError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BuildError::EmptyOptions => write!(f, "menu requires at least one option"),
            BuildError::ZeroWidth => write!(f, "width must be positive"),
            BuildError::DuplicateKey(key) => write!(f, "key '{key}' is bound more than once"),
            BuildError::DigitShortcut(key) => {
                write!(f, "shortcut key '{key}' collides with digit option selection")
            }
        }
    }
}

impl std::error::Error for BuildError {}
