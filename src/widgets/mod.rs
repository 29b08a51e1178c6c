//! The stateful console widgets.
//!
//! Each widget is modal: it borrows the console, loops on key events, and
//! returns when its interaction ends. Composition is nesting only — an
//! option handler may open another widget, never two at once.

pub mod confirm;
pub mod help;
pub mod menu;
pub mod notify;
pub mod progress;
pub mod prompt;

pub use confirm::confirm_yes_no;
pub use help::HelpOverlay;
pub use menu::{Menu, MenuOption};
pub use notify::{Notification, NotifyMode};
pub use progress::ProgressBar;
pub use prompt::{PromptState, TextPrompt};
