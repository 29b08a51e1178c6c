//! # Terminal surface
//!
//! The one primitive every widget draws through: cursor addressing, text
//! writes, color changes and region clears on a character grid.
//!
//! Two implementations:
//! - [`AnsiSurface`]: the real terminal, crossterm-backed. Commands are
//!   queued and written on [`Surface::flush`]. Owns raw mode for its
//!   lifetime.
//! - [`TestSurface`]: an in-memory grid with cell inspection helpers, so
//!   tests can assert exact screen contents without a terminal.

use std::io::{self, Stdout, Write, stdout};

use crossterm::cursor::{Hide, MoveTo, Show};
use crossterm::style::{Color, Print, ResetColor, SetBackgroundColor, SetForegroundColor};
use crossterm::terminal::{self, Clear, ClearType};
use crossterm::queue;
use log::info;
use unicode_width::UnicodeWidthChar;

/// Primitive drawing operations on a character grid.
///
/// Implementations track the colors they were last told to set, so widgets
/// can save the ambient color state on entry and restore it on exit.
pub trait Surface {
    /// Grid size as `(columns, rows)`.
    fn size(&self) -> io::Result<(u16, u16)>;

    /// Position the cursor; subsequent `print` starts here.
    fn move_to(&mut self, col: u16, row: u16) -> io::Result<()>;

    /// Write text at the cursor, advancing it.
    fn print(&mut self, text: &str) -> io::Result<()>;

    fn set_fg(&mut self, color: Color) -> io::Result<()>;
    fn set_bg(&mut self, color: Color) -> io::Result<()>;
    fn reset_colors(&mut self) -> io::Result<()>;

    /// Currently active `(foreground, background)` as last set through this
    /// surface. `Color::Reset` means terminal default.
    fn colors(&self) -> (Color, Color);

    /// Current cursor position as `(col, row)`.
    fn cursor_position(&mut self) -> io::Result<(u16, u16)>;

    fn clear_all(&mut self) -> io::Result<()>;

    /// Blank out a whole row.
    fn clear_row(&mut self, row: u16) -> io::Result<()>;

    fn show_cursor(&mut self) -> io::Result<()>;
    fn hide_cursor(&mut self) -> io::Result<()>;

    /// Whether the cursor is visible, as last set through this surface.
    /// Overlays use it to put visibility back the way the caller had it.
    fn cursor_visible(&self) -> bool;

    /// Make queued output visible.
    fn flush(&mut self) -> io::Result<()>;

    /// Blank out a rectangular region by overwriting it with spaces.
    ///
    /// Leaves the cursor at the end of the last cleared row; callers that
    /// care about cursor position restore it afterwards.
    fn clear_region(&mut self, col: u16, row: u16, width: u16, height: u16) -> io::Result<()> {
        let blanks = " ".repeat(width as usize);
        for r in row..row.saturating_add(height) {
            self.move_to(col, r)?;
            self.print(&blanks)?;
        }
        Ok(())
    }
}

/// Crossterm-backed surface writing to stdout.
///
/// Construction enables raw mode; dropping the surface disables it again,
/// resets colors and re-shows the cursor, so a panicking handler still
/// leaves the shell usable.
pub struct AnsiSurface {
    out: Stdout,
    fg: Color,
    bg: Color,
    cursor_visible: bool,
}

impl AnsiSurface {
    pub fn new() -> io::Result<Self> {
        terminal::enable_raw_mode()?;
        info!("Raw mode enabled");
        Ok(Self {
            out: stdout(),
            fg: Color::Reset,
            bg: Color::Reset,
            cursor_visible: true,
        })
    }
}

impl Drop for AnsiSurface {
    fn drop(&mut self) {
        let _ = queue!(self.out, ResetColor, Show);
        let _ = self.out.flush();
        let _ = terminal::disable_raw_mode();
    }
}

impl Surface for AnsiSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        terminal::size()
    }

    fn move_to(&mut self, col: u16, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(col, row))
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        queue!(self.out, Print(text))
    }

    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        self.fg = color;
        queue!(self.out, SetForegroundColor(color))
    }

    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        self.bg = color;
        queue!(self.out, SetBackgroundColor(color))
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        self.fg = Color::Reset;
        self.bg = Color::Reset;
        queue!(self.out, ResetColor)
    }

    fn colors(&self) -> (Color, Color) {
        (self.fg, self.bg)
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        // Requires a flush first so the query reflects queued moves.
        self.out.flush()?;
        crossterm::cursor::position()
    }

    fn clear_all(&mut self) -> io::Result<()> {
        queue!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    fn clear_row(&mut self, row: u16) -> io::Result<()> {
        queue!(self.out, MoveTo(0, row), Clear(ClearType::CurrentLine))
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = true;
        queue!(self.out, Show)
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = false;
        queue!(self.out, Hide)
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }
}

/// One cell of the in-memory grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub ch: char,
    pub fg: Color,
    pub bg: Color,
}

impl Cell {
    const BLANK: Cell = Cell {
        ch: ' ',
        fg: Color::Reset,
        bg: Color::Reset,
    };
}

/// In-memory surface for deterministic tests.
///
/// Writes land in a fixed-size grid; anything past the right edge is
/// dropped, matching a terminal that neither wraps nor scrolls.
pub struct TestSurface {
    width: u16,
    height: u16,
    cells: Vec<Cell>,
    cursor: (u16, u16),
    fg: Color,
    bg: Color,
    cursor_visible: bool,
}

impl TestSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![Cell::BLANK; width as usize * height as usize],
            cursor: (0, 0),
            fg: Color::Reset,
            bg: Color::Reset,
            cursor_visible: true,
        }
    }

    pub fn cell(&self, col: u16, row: u16) -> &Cell {
        &self.cells[row as usize * self.width as usize + col as usize]
    }

    /// Text of one row with trailing blanks trimmed.
    pub fn row_text(&self, row: u16) -> String {
        let start = row as usize * self.width as usize;
        let line: String = self.cells[start..start + self.width as usize]
            .iter()
            .map(|c| c.ch)
            .collect();
        line.trim_end().to_string()
    }

    /// True if `needle` appears anywhere on the grid.
    pub fn contains(&self, needle: &str) -> bool {
        (0..self.height).any(|row| self.row_text(row).contains(needle))
    }

    pub fn cursor(&self) -> (u16, u16) {
        self.cursor
    }

    /// True if every cell in the region is a blank with default colors.
    pub fn region_blank(&self, col: u16, row: u16, width: u16, height: u16) -> bool {
        (row..row + height)
            .flat_map(|r| (col..col + width).map(move |c| (c, r)))
            .all(|(c, r)| self.cell(c, r).ch == ' ')
    }
}

impl Surface for TestSurface {
    fn size(&self) -> io::Result<(u16, u16)> {
        Ok((self.width, self.height))
    }

    fn move_to(&mut self, col: u16, row: u16) -> io::Result<()> {
        self.cursor = (col.min(self.width.saturating_sub(1)), row.min(self.height.saturating_sub(1)));
        Ok(())
    }

    fn print(&mut self, text: &str) -> io::Result<()> {
        let (mut col, row) = self.cursor;
        for ch in text.chars() {
            let w = ch.width().unwrap_or(0) as u16;
            if col >= self.width || row >= self.height {
                break;
            }
            self.cells[row as usize * self.width as usize + col as usize] = Cell {
                ch,
                fg: self.fg,
                bg: self.bg,
            };
            col = col.saturating_add(w.max(1));
        }
        self.cursor = (col.min(self.width), row);
        Ok(())
    }

    fn set_fg(&mut self, color: Color) -> io::Result<()> {
        self.fg = color;
        Ok(())
    }

    fn set_bg(&mut self, color: Color) -> io::Result<()> {
        self.bg = color;
        Ok(())
    }

    fn reset_colors(&mut self) -> io::Result<()> {
        self.fg = Color::Reset;
        self.bg = Color::Reset;
        Ok(())
    }

    fn colors(&self) -> (Color, Color) {
        (self.fg, self.bg)
    }

    fn cursor_position(&mut self) -> io::Result<(u16, u16)> {
        Ok(self.cursor)
    }

    fn clear_all(&mut self) -> io::Result<()> {
        self.cells.fill(Cell::BLANK);
        self.cursor = (0, 0);
        Ok(())
    }

    fn clear_row(&mut self, row: u16) -> io::Result<()> {
        if row >= self.height {
            return Ok(());
        }
        let start = row as usize * self.width as usize;
        self.cells[start..start + self.width as usize].fill(Cell::BLANK);
        self.cursor = (0, row);
        Ok(())
    }

    fn show_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = true;
        Ok(())
    }

    fn hide_cursor(&mut self) -> io::Result<()> {
        self.cursor_visible = false;
        Ok(())
    }

    fn cursor_visible(&self) -> bool {
        self.cursor_visible
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
