//! # Notification banner
//!
//! A transient 3-row banner over the top of whatever is on screen. The one
//! hard guarantee: after `show` returns, every cell the banner touched is
//! blank again and the cursor position and color state are exactly what they
//! were before the call.

use std::io;
use std::thread;
use std::time::Duration;

use unicode_width::UnicodeWidthStr;

use crate::console::Console;
use crate::event::KeySource;
use crate::surface::Surface;
use crate::theme::{Severity, Theme};
use crate::widgets::help::truncate_with_ellipsis;

/// How the banner is dismissed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotifyMode {
    /// Block the calling thread for the duration, then erase.
    Timed(Duration),
    /// Wait for one key event, then erase.
    Blocking,
}

pub struct Notification {
    message: String,
    severity: Severity,
    mode: NotifyMode,
    theme: Theme,
}

impl Notification {
    pub fn new(
        message: impl Into<String>,
        severity: Severity,
        mode: NotifyMode,
        theme: Theme,
    ) -> Self {
        Self {
            message: message.into(),
            severity,
            mode,
            theme,
        }
    }

    pub fn show<S: Surface, K: KeySource>(&self, console: &mut Console<S, K>) -> io::Result<()> {
        let (term_width, _) = console.size()?;

        let width = (term_width.saturating_sub(4))
            .min(((self.message.width() + 6) as u16).max(20));
        let left = (term_width.saturating_sub(width)) / 2;
        let interior = width.saturating_sub(2) as usize;

        let (saved_fg, saved_bg) = console.surface().colors();
        let saved_cursor = console.surface().cursor_position()?;
        let cursor_was_visible = console.surface().cursor_visible();

        let color = self.theme.severity_color(self.severity);
        let body = format!("{} {}", self.severity.icon(), self.message);
        let body = truncate_with_ellipsis(&body, interior);
        let pad = (interior.saturating_sub(body.width())) / 2;

        let surface = console.surface();
        surface.hide_cursor()?;
        surface.set_bg(color)?;
        surface.set_fg(self.theme.highlight_fg)?;

        let blank = " ".repeat(width as usize);
        surface.move_to(left, 0)?;
        surface.print(&blank)?;

        surface.move_to(left, 1)?;
        surface.print(&format!(
            " {}{}{} ",
            " ".repeat(pad),
            body,
            " ".repeat(interior.saturating_sub(pad + body.width()))
        ))?;

        surface.move_to(left, 2)?;
        match self.mode {
            NotifyMode::Blocking => {
                let prompt = "press any key";
                let pad = (interior.saturating_sub(prompt.width())) / 2;
                surface.print(&format!(
                    " {}{}{} ",
                    " ".repeat(pad),
                    prompt,
                    " ".repeat(interior.saturating_sub(pad + prompt.width()))
                ))?;
            }
            NotifyMode::Timed(_) => surface.print(&blank)?,
        }
        surface.flush()?;

        match self.mode {
            NotifyMode::Timed(duration) => thread::sleep(duration),
            NotifyMode::Blocking => {
                console.next_key()?;
            }
        }

        // Exact restoration: blank the region, then put colors, cursor
        // position and cursor visibility back the way the caller had them.
        let surface = console.surface();
        surface.reset_colors()?;
        surface.clear_region(left, 0, width, 3)?;
        surface.set_fg(saved_fg)?;
        surface.set_bg(saved_bg)?;
        surface.move_to(saved_cursor.0, saved_cursor.1)?;
        if cursor_was_visible {
            surface.show_cursor()?;
        }
        surface.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::{Key, ScriptedKeys};
    use crate::surface::TestSurface;
    use crossterm::style::Color;

    fn console(keys: impl IntoIterator<Item = Key>) -> Console<TestSurface, ScriptedKeys> {
        Console::new(TestSurface::new(80, 24), ScriptedKeys::new(keys))
    }

    #[test]
    fn timed_banner_restores_cursor_colors_and_cells() {
        let mut console = console([]);
        console.surface().set_fg(Color::Yellow).unwrap();
        console.surface().set_bg(Color::Blue).unwrap();
        console.surface().move_to(7, 12).unwrap();

        let note = Notification::new(
            "cache cleared",
            Severity::Success,
            NotifyMode::Timed(Duration::from_millis(1)),
            Theme::default(),
        );
        note.show(&mut console).unwrap();

        let (surface, _) = console.into_parts();
        assert_eq!(surface.cursor(), (7, 12));
        assert_eq!(surface.colors(), (Color::Yellow, Color::Blue));
        assert!(surface.region_blank(0, 0, 80, 3));
    }

    #[test]
    fn blocking_banner_waits_for_exactly_one_key() {
        let mut console = console([Key::Char(' ')]);
        let note = Notification::new(
            "npm install failed",
            Severity::Error,
            NotifyMode::Blocking,
            Theme::default(),
        );
        note.show(&mut console).unwrap();

        let (surface, mut keys) = console.into_parts();
        assert!(keys.next_key().is_err());
        assert!(surface.region_blank(0, 0, 80, 3));
        assert_eq!(surface.cursor(), (0, 0));
    }

    #[test]
    fn banner_over_hidden_cursor_leaves_it_hidden() {
        let mut console = console([]);
        console.surface().hide_cursor().unwrap();

        let note = Notification::new(
            "done",
            Severity::Info,
            NotifyMode::Timed(Duration::from_millis(1)),
            Theme::default(),
        );
        note.show(&mut console).unwrap();

        let (surface, _) = console.into_parts();
        assert!(!surface.cursor_visible());
    }

    #[test]
    fn banner_width_follows_the_bound() {
        // Message fits: width = max(len+6, 20), centered. Verify the cells
        // just outside the banner were never written.
        let mut console = console([]);
        // Paint the top rows so untouched cells are detectable.
        for row in 0..3 {
            console.surface().move_to(0, row).unwrap();
            console.surface().print(&"x".repeat(80)).unwrap();
        }
        let note = Notification::new(
            "hi",
            Severity::Info,
            NotifyMode::Timed(Duration::from_millis(1)),
            Theme::default(),
        );
        note.show(&mut console).unwrap();

        // width = max(2+6, 20) = 20, left = (80-20)/2 = 30
        let (surface, _) = console.into_parts();
        assert_eq!(surface.cell(29, 1).ch, 'x');
        assert_eq!(surface.cell(50, 1).ch, 'x');
        assert!(surface.region_blank(30, 0, 20, 3));
    }

    #[test]
    fn long_messages_are_clamped_to_terminal_width() {
        let mut console = Console::new(TestSurface::new(30, 5), ScriptedKeys::new([]));
        let note = Notification::new(
            "a message far longer than this terminal can show",
            Severity::Warning,
            NotifyMode::Timed(Duration::from_millis(1)),
            Theme::default(),
        );
        // Must not panic and must erase what it drew.
        note.show(&mut console).unwrap();
        let (surface, _) = console.into_parts();
        assert!(surface.region_blank(0, 0, 30, 3));
    }
}
