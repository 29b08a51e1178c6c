//! termkit — stateful console widgets over direct cursor addressing.
//!
//! A menu selector, a text prompt with live autocomplete, a yes/no confirm,
//! a transient notification banner, a progress bar and a blocking help
//! modal, all drawing through one [`surface::Surface`] primitive and pulling
//! keystrokes from one [`event::KeySource`]. Both seams are injectable:
//! production uses crossterm, tests use an in-memory grid and scripted keys.
//!
//! Execution is single-threaded and fully synchronous; widgets nest but
//! never run in parallel, and each nested widget restores the ambient
//! cursor and color state on exit.

pub mod config;
pub mod console;
pub mod error;
pub mod event;
pub mod surface;
pub mod theme;
pub mod widgets;

pub use config::{ResolvedUi, UiConfig, load_config, resolve};
pub use console::{Console, Handler};
pub use error::BuildError;
pub use event::{CrosstermKeys, Key, KeySource, ScriptedKeys};
pub use surface::{AnsiSurface, Surface, TestSurface};
pub use theme::{BorderGlyphs, Severity, Theme};
pub use widgets::{
    HelpOverlay, Menu, MenuOption, Notification, NotifyMode, ProgressBar, TextPrompt,
    confirm_yes_no,
};
