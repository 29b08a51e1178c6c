//! Blocking keyboard-legend modal.
//!
//! Draws a centered bordered box of `(topic, description)` pairs, waits for
//! exactly one key, then erases precisely the rectangle it occupied and puts
//! the cursor back where it was.

use std::io;

use unicode_width::UnicodeWidthStr;

use crate::console::Console;
use crate::event::KeySource;
use crate::surface::Surface;
use crate::theme::Theme;

/// Interior padding on each side of the box.
const PADDING: u16 = 1;

pub struct HelpOverlay {
    title: String,
    items: Vec<(String, String)>,
    theme: Theme,
}

impl HelpOverlay {
    pub fn new(
        title: impl Into<String>,
        items: Vec<(String, String)>,
        theme: Theme,
    ) -> Self {
        Self {
            title: title.into(),
            items,
            theme,
        }
    }

    pub fn show<S: Surface, K: KeySource>(&self, console: &mut Console<S, K>) -> io::Result<()> {
        let (term_width, term_height) = console.size()?;

        let topic_width = self
            .items
            .iter()
            .map(|(topic, _)| topic.width())
            .max()
            .unwrap_or(0);
        let widest_line = self
            .items
            .iter()
            .map(|(_, desc)| topic_width + 2 + desc.width())
            .max()
            .unwrap_or(0)
            .max(self.title.width() + 2);

        let width = ((widest_line as u16) + 2 * (PADDING + 1)).min(term_width.saturating_sub(4));
        let height = self.items.len() as u16 + 2;
        let left = (term_width.saturating_sub(width)) / 2;
        let top = (term_height.saturating_sub(height)) / 2;
        let interior = width.saturating_sub(2 * (PADDING + 1)) as usize;

        let (saved_fg, saved_bg) = console.surface().colors();
        let saved_cursor = console.surface().cursor_position()?;
        let cursor_was_visible = console.surface().cursor_visible();

        let glyphs = self.theme.glyphs;
        let surface = console.surface();
        surface.hide_cursor()?;

        // Top border with embedded title
        surface.set_fg(self.theme.border)?;
        surface.move_to(left, top)?;
        let title = format!(" {} ", self.title);
        let bar_len = (width as usize).saturating_sub(2 + title.width());
        surface.print(&format!(
            "{}{}{}{}",
            glyphs.top_left,
            title,
            glyphs.horizontal.to_string().repeat(bar_len),
            glyphs.top_right
        ))?;

        for (i, (topic, desc)) in self.items.iter().enumerate() {
            let row = top + 1 + i as u16;
            surface.set_fg(self.theme.border)?;
            surface.move_to(left, row)?;
            surface.print(&glyphs.vertical.to_string())?;

            let line = format!("{:<topic_width$}  {}", topic, desc);
            let line = truncate_with_ellipsis(&line, interior);
            surface.move_to(left + 1 + PADDING, row)?;
            surface.set_fg(self.theme.text)?;
            surface.print(&format!("{:<interior$}", line))?;

            surface.set_fg(self.theme.border)?;
            surface.move_to(left + width - 1, row)?;
            surface.print(&glyphs.vertical.to_string())?;
        }

        surface.move_to(left, top + height - 1)?;
        surface.print(&format!(
            "{}{}{}",
            glyphs.bottom_left,
            glyphs.horizontal.to_string().repeat(width as usize - 2),
            glyphs.bottom_right
        ))?;
        surface.flush()?;

        console.next_key()?;

        let surface = console.surface();
        surface.reset_colors()?;
        surface.clear_region(left, top, width, height)?;
        surface.set_fg(saved_fg)?;
        surface.set_bg(saved_bg)?;
        surface.move_to(saved_cursor.0, saved_cursor.1)?;
        if cursor_was_visible {
            surface.show_cursor()?;
        }
        surface.flush()
    }
}

/// Truncate to `max_width` display columns, marking the cut with an ellipsis.
pub(crate) fn truncate_with_ellipsis(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }
    use unicode_width::UnicodeWidthChar;
    let mut out = String::new();
    let mut used = 0;
    for c in s.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width.saturating_sub(1) {
            break;
        }
        used += w;
        out.push(c);
    }
    out.push('…');
    out
}
