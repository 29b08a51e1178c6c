//! Single-line proportional progress bar, redrawn in place.

use std::io;
use std::time::Instant;

use crate::console::Console;
use crate::error::BuildError;
use crate::event::KeySource;
use crate::surface::Surface;
use crate::theme::Theme;

pub struct ProgressBar {
    label: String,
    total: u64,
    current: u64,
    bar_width: u16,
    status: String,
    started: Instant,
    /// Screen row the bar lives on, captured at the first draw.
    row: Option<u16>,
    completed: bool,
    theme: Theme,
}

impl ProgressBar {
    pub fn new(
        label: impl Into<String>,
        total: u64,
        bar_width: u16,
        theme: Theme,
    ) -> Result<Self, BuildError> {
        if bar_width == 0 {
            return Err(BuildError::ZeroWidth);
        }
        Ok(Self {
            label: label.into(),
            total,
            current: 0,
            bar_width,
            status: String::new(),
            started: Instant::now(),
            row: None,
            completed: false,
            theme,
        })
    }

    pub fn current(&self) -> u64 {
        self.current
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// Progress in percent; an empty task counts as done.
    pub fn percent(&self) -> u64 {
        if self.total == 0 {
            100
        } else {
            self.current * 100 / self.total
        }
    }

    /// Number of filled bar cells for the current state.
    pub fn filled(&self) -> u16 {
        if self.total == 0 {
            self.bar_width
        } else {
            (self.current * self.bar_width as u64 / self.total) as u16
        }
    }

    /// Set progress to `current` (clamped to `total`, never an error) and
    /// redraw. A `status` of `None` keeps the previous status text.
    pub fn update<S: Surface, K: KeySource>(
        &mut self,
        console: &mut Console<S, K>,
        current: u64,
        status: Option<&str>,
    ) -> io::Result<()> {
        self.current = current.min(self.total);
        if let Some(status) = status {
            self.status = status.to_string();
        }
        self.draw(console, false)
    }

    /// Advance by one step.
    pub fn increment<S: Surface, K: KeySource>(
        &mut self,
        console: &mut Console<S, K>,
        status: Option<&str>,
    ) -> io::Result<()> {
        self.update(console, self.current.saturating_add(1), status)
    }

    /// Force completion, draw once more with a success glyph, and release
    /// the line for subsequent output.
    pub fn complete<S: Surface, K: KeySource>(
        &mut self,
        console: &mut Console<S, K>,
        message: Option<&str>,
    ) -> io::Result<()> {
        self.current = self.total;
        self.completed = true;
        if let Some(message) = message {
            self.status = message.to_string();
        }
        self.draw(console, true)?;
        let row = self.row.unwrap_or(0);
        let surface = console.surface();
        surface.move_to(0, row + 1)?;
        surface.flush()
    }

    fn draw<S: Surface, K: KeySource>(
        &mut self,
        console: &mut Console<S, K>,
        with_glyph: bool,
    ) -> io::Result<()> {
        let row = match self.row {
            Some(row) => row,
            None => {
                let (_, row) = console.surface().cursor_position()?;
                self.row = Some(row);
                row
            }
        };

        let filled = self.filled() as usize;
        let empty = (self.bar_width as usize) - filled;
        let elapsed = format_elapsed(self.started.elapsed().as_secs());

        let surface = console.surface();
        // Clear the full line first so a shorter redraw leaves no artifacts.
        surface.clear_row(row)?;
        surface.move_to(0, row)?;
        surface.set_fg(self.theme.text)?;
        surface.print(&self.label)?;
        surface.print(" [")?;
        surface.set_fg(self.theme.info)?;
        surface.print(&"█".repeat(filled))?;
        surface.set_fg(self.theme.help)?;
        surface.print(&"·".repeat(empty))?;
        surface.set_fg(self.theme.text)?;
        surface.print(&format!("] {}%", self.percent()))?;
        if !self.status.is_empty() {
            surface.print(&format!(" - {}", self.status))?;
        }
        surface.print(&format!(" ({elapsed})"))?;
        if with_glyph {
            surface.set_fg(self.theme.success)?;
            surface.print(" ✔")?;
        }
        surface.reset_colors()?;
        surface.flush()
    }
}

fn format_elapsed(secs: u64) -> String {
    if secs >= 60 {
        format!("{}m {}s", secs / 60, secs % 60)
    } else {
        format!("{secs}s")
    }
}
