//! # Text prompt with live autocomplete
//!
//! ## Responsibilities
//!
//! - Capture a single line of text with cursor editing
//! - Maintain a suggestion overlay filtered from a candidate set
//! - Accept a suggestion via Tab or Enter, cycle with Up/Down
//! - Cancel via Escape (distinct from submitting an empty string)
//!
//! ## State Management
//!
//! All editing logic lives in [`PromptState`], which never touches the
//! terminal; `TextPrompt::prompt` drives it from a flat key loop and redraws
//! the input line and overlay after every mutation. Redraw is in place: the
//! input line is overwritten with one trailing blank to erase leftovers, and
//! the overlay is cleared down to the deepest extent it ever reached before
//! a shorter list is drawn.

use std::io;

use unicode_width::UnicodeWidthStr;

use crate::console::Console;
use crate::event::{Key, KeySource};
use crate::surface::Surface;
use crate::theme::Theme;

/// Upper bound on displayed suggestions.
pub const MAX_SUGGESTIONS: usize = 5;

fn prev_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos - 1;
    while !s.is_char_boundary(p) {
        p -= 1;
    }
    p
}

fn next_char_boundary(s: &str, pos: usize) -> usize {
    let mut p = pos + 1;
    while p < s.len() && !s.is_char_boundary(p) {
        p += 1;
    }
    p
}

/// Editable buffer, cursor and suggestion state.
///
/// Invariants, upheld by every mutation:
/// - `cursor` is a char boundary in `0..=buffer.len()`
/// - `suggestions` holds at most [`MAX_SUGGESTIONS`] candidates, each
///   containing `buffer` case-insensitively, in candidate order
/// - `suggestion_index` is `None` exactly when `suggestions` is empty
pub struct PromptState {
    pub buffer: String,
    /// Byte offset into `buffer`.
    pub cursor: usize,
    candidates: Vec<String>,
    pub suggestions: Vec<String>,
    pub suggestion_index: Option<usize>,
    pub overlay_visible: bool,
}

impl PromptState {
    pub fn new(candidates: Vec<String>) -> Self {
        let mut state = Self {
            buffer: String::new(),
            cursor: 0,
            candidates,
            suggestions: Vec::new(),
            suggestion_index: None,
            overlay_visible: true,
        };
        state.recompute_suggestions();
        state
    }

    /// Case-insensitive substring filter of the candidate set against the
    /// full buffer, truncated to the first matches in candidate order.
    pub fn recompute_suggestions(&mut self) {
        if !self.overlay_visible {
            self.suggestions.clear();
            self.suggestion_index = None;
            return;
        }
        let needle = self.buffer.to_lowercase();
        self.suggestions = self
            .candidates
            .iter()
            .filter(|c| c.to_lowercase().contains(&needle))
            .take(MAX_SUGGESTIONS)
            .cloned()
            .collect();
        self.suggestion_index = if self.suggestions.is_empty() {
            None
        } else {
            Some(0)
        };
    }

    pub fn insert_char(&mut self, c: char) {
        self.buffer.insert(self.cursor, c);
        self.cursor += c.len_utf8();
        self.recompute_suggestions();
    }

    pub fn backspace(&mut self) {
        if self.cursor > 0 {
            let prev = prev_char_boundary(&self.buffer, self.cursor);
            self.buffer.drain(prev..self.cursor);
            self.cursor = prev;
            self.recompute_suggestions();
        }
    }

    pub fn delete(&mut self) {
        if self.cursor < self.buffer.len() {
            let next = next_char_boundary(&self.buffer, self.cursor);
            self.buffer.drain(self.cursor..next);
            self.recompute_suggestions();
        }
    }

    /// Cursor movement does not affect suggestions.
    pub fn move_left(&mut self) {
        if self.cursor > 0 {
            self.cursor = prev_char_boundary(&self.buffer, self.cursor);
        }
    }

    pub fn move_right(&mut self) {
        if self.cursor < self.buffer.len() {
            self.cursor = next_char_boundary(&self.buffer, self.cursor);
        }
    }

    /// Cycle the highlighted suggestion, wrapping at both ends.
    pub fn cycle(&mut self, delta: i32) {
        let n = self.suggestions.len();
        if n == 0 {
            return;
        }
        let i = self.suggestion_index.unwrap_or(0) as i32;
        self.suggestion_index = Some((i + delta).rem_euclid(n as i32) as usize);
    }

    /// Replace the buffer with the highlighted suggestion (Tab).
    pub fn accept_suggestion(&mut self) {
        if let Some(i) = self.suggestion_index {
            self.buffer = self.suggestions[i].clone();
            self.cursor = self.buffer.len();
            self.recompute_suggestions();
        }
    }

    /// Toggle the overlay (F1). Toggling on recomputes; toggling off empties
    /// the suggestion state without touching the buffer.
    pub fn toggle_overlay(&mut self) {
        self.overlay_visible = !self.overlay_visible;
        self.recompute_suggestions();
    }
}

/// Modal line editor. `prompt()` blocks until Enter or Escape.
pub struct TextPrompt {
    label: String,
    candidates: Vec<String>,
    theme: Theme,
}

impl TextPrompt {
    pub fn new(label: impl Into<String>, candidates: Vec<String>, theme: Theme) -> Self {
        Self {
            label: label.into(),
            candidates,
            theme,
        }
    }

    /// Run the prompt. Returns `None` on Escape — cancellation, not an
    /// empty answer.
    pub fn prompt<S: Surface, K: KeySource>(
        &self,
        console: &mut Console<S, K>,
    ) -> io::Result<Option<String>> {
        let mut state = PromptState::new(self.candidates.clone());

        let (saved_fg, saved_bg) = console.surface().colors();
        let (_, anchor_row) = console.surface().cursor_position()?;
        // Deepest overlay extent drawn so far, for stale-row clearing.
        let mut max_overlay_rows = 0usize;

        let result = loop {
            self.render(console, &state, anchor_row, &mut max_overlay_rows)?;

            match console.next_key()? {
                Key::Char(c) => state.insert_char(c),
                Key::Backspace => state.backspace(),
                Key::Delete => state.delete(),
                Key::Left => state.move_left(),
                Key::Right => state.move_right(),
                Key::Up => state.cycle(-1),
                Key::Down => state.cycle(1),
                Key::Tab => state.accept_suggestion(),
                Key::F1 => state.toggle_overlay(),
                Key::Enter => {
                    if let Some(i) = state.suggestion_index {
                        state.buffer = state.suggestions[i].clone();
                    }
                    break Some(state.buffer);
                }
                Key::Escape => break None,
            }
        };

        // Erase the overlay and put the terminal back the way we found it.
        let (width, height) = console.size()?;
        let overlay_top = anchor_row + 1;
        let overlay_rows = (max_overlay_rows as u16).min(height.saturating_sub(overlay_top));
        let surface = console.surface();
        surface.reset_colors()?;
        surface.clear_region(0, overlay_top, width, overlay_rows)?;
        surface.set_fg(saved_fg)?;
        surface.set_bg(saved_bg)?;
        let label_width = self.label.width() as u16 + 2;
        surface.move_to(label_width + result.as_deref().unwrap_or("").width() as u16, anchor_row)?;
        surface.flush()?;

        Ok(result)
    }

    fn render<S: Surface, K: KeySource>(
        &self,
        console: &mut Console<S, K>,
        state: &PromptState,
        anchor_row: u16,
        max_overlay_rows: &mut usize,
    ) -> io::Result<()> {
        let surface = console.surface();

        // Input line, overwritten in place with one trailing blank so a
        // shorter buffer leaves no leftovers.
        surface.move_to(0, anchor_row)?;
        surface.set_fg(self.theme.title)?;
        surface.print(&self.label)?;
        surface.print(": ")?;
        surface.set_fg(self.theme.text)?;
        surface.print(&state.buffer)?;
        surface.print(" ")?;

        // Suggestion overlay on the rows below, cleared down to the deepest
        // previously drawn extent. Rows past the bottom of the screen are
        // never drawn; a prompt anchored on the last row simply shows no
        // overlay.
        let (_, term_height) = surface.size()?;
        let rows_now = state.suggestions.len();
        if rows_now > *max_overlay_rows {
            *max_overlay_rows = rows_now;
        }
        for i in 0..*max_overlay_rows {
            let row = anchor_row + 1 + i as u16;
            if row >= term_height {
                break;
            }
            surface.reset_colors()?;
            surface.clear_row(row)?;
            if let Some(suggestion) = state.suggestions.get(i) {
                surface.move_to(2, row)?;
                if state.suggestion_index == Some(i) {
                    surface.set_fg(self.theme.highlight_fg)?;
                    surface.set_bg(self.theme.highlight_bg)?;
                } else {
                    surface.set_fg(self.theme.help)?;
                }
                surface.print(suggestion)?;
                surface.reset_colors()?;
            }
        }

        // Hardware cursor tracks the edit position.
        let label_width = self.label.width() as u16 + 2;
        let cursor_col = label_width + state.buffer[..state.cursor].width() as u16;
        surface.move_to(cursor_col, anchor_row)?;
        surface.show_cursor()?;
        surface.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::ScriptedKeys;
    use crate::surface::TestSurface;

    fn fruits() -> Vec<String> {
        vec!["apple".into(), "apricot".into(), "banana".into()]
    }

    #[test]
    fn suggestions_filter_case_insensitively_in_candidate_order() {
        let mut state = PromptState::new(fruits());
        for c in "AP".chars() {
            state.insert_char(c);
        }
        assert_eq!(state.suggestions, vec!["apple", "apricot"]);
        assert_eq!(state.suggestion_index, Some(0));
    }

    #[test]
    fn suggestions_are_capped_at_five() {
        let candidates: Vec<String> = (0..8).map(|i| format!("script-{i}")).collect();
        let state = PromptState::new(candidates);
        assert_eq!(state.suggestions.len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn no_match_clears_index() {
        let mut state = PromptState::new(fruits());
        for c in "zzz".chars() {
            state.insert_char(c);
        }
        assert!(state.suggestions.is_empty());
        assert_eq!(state.suggestion_index, None);
    }

    #[test]
    fn backspace_and_delete_edit_around_cursor() {
        let mut state = PromptState::new(vec![]);
        for c in "abc".chars() {
            state.insert_char(c);
        }
        state.move_left();
        state.backspace(); // removes 'b'
        assert_eq!(state.buffer, "ac");
        assert_eq!(state.cursor, 1);
        state.delete(); // removes 'c'
        assert_eq!(state.buffer, "a");
        state.backspace(); // removes 'a'
        assert_eq!(state.buffer, "");
        assert_eq!(state.cursor, 0);

        // No-ops at the boundaries
        state.delete();
        state.move_left();
        state.backspace();
        assert_eq!(state.buffer, "");
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn cursor_movement_is_clamped() {
        let mut state = PromptState::new(vec![]);
        state.insert_char('x');
        state.move_right();
        assert_eq!(state.cursor, 1);
        state.move_left();
        state.move_left();
        assert_eq!(state.cursor, 0);
    }

    #[test]
    fn cycle_wraps_both_directions() {
        let mut state = PromptState::new(fruits());
        state.insert_char('a'); // all three match
        assert_eq!(state.suggestion_index, Some(0));
        state.cycle(-1);
        assert_eq!(state.suggestion_index, Some(2));
        state.cycle(1);
        assert_eq!(state.suggestion_index, Some(0));
    }

    #[test]
    fn tab_accepts_highlighted_suggestion() {
        let mut state = PromptState::new(fruits());
        for c in "ap".chars() {
            state.insert_char(c);
        }
        state.cycle(1);
        state.accept_suggestion();
        assert_eq!(state.buffer, "apricot");
        assert_eq!(state.cursor, "apricot".len());
    }

    #[test]
    fn toggle_overlay_off_clears_suggestions_only() {
        let mut state = PromptState::new(fruits());
        state.insert_char('a');
        state.toggle_overlay();
        assert!(!state.overlay_visible);
        assert!(state.suggestions.is_empty());
        assert_eq!(state.suggestion_index, None);
        assert_eq!(state.buffer, "a");

        state.toggle_overlay();
        assert_eq!(state.suggestions.len(), 3);
    }

    #[test]
    fn prompt_enter_returns_highlighted_suggestion() {
        // Scenario: type "ap", Down to apricot, Enter.
        let keys = ScriptedKeys::new(
            ScriptedKeys::typed("ap")
                .into_iter()
                .chain([Key::Down, Key::Enter]),
        );
        let mut console = Console::new(TestSurface::new(40, 10), keys);
        let prompt = TextPrompt::new("Script", fruits(), Theme::default());

        let answer = prompt.prompt(&mut console).unwrap();
        assert_eq!(answer.as_deref(), Some("apricot"));
    }

    #[test]
    fn prompt_escape_is_distinct_from_empty() {
        let keys = ScriptedKeys::new([Key::Escape]);
        let mut console = Console::new(TestSurface::new(40, 10), keys);
        let prompt = TextPrompt::new("Script", fruits(), Theme::default());
        assert_eq!(prompt.prompt(&mut console).unwrap(), None);
    }

    #[test]
    fn prompt_clears_overlay_on_exit() {
        let keys = ScriptedKeys::new(
            ScriptedKeys::typed("a")
                .into_iter()
                .chain([Key::Escape]),
        );
        let mut console = Console::new(TestSurface::new(40, 10), keys);
        let prompt = TextPrompt::new("Script", fruits(), Theme::default());
        prompt.prompt(&mut console).unwrap();

        let (surface, _) = console.into_parts();
        // Rows below the input line hold no stale suggestion text.
        for row in 1..6 {
            assert_eq!(surface.row_text(row), "", "row {row} not cleared");
        }
    }

    #[test]
    fn prompt_on_the_bottom_row_draws_no_overlay() {
        let keys = ScriptedKeys::new(ScriptedKeys::typed("z").into_iter().chain([Key::Enter]));
        let mut console = Console::new(TestSurface::new(40, 10), keys);
        console.surface().move_to(0, 9).unwrap();

        let prompt = TextPrompt::new("Script", fruits(), Theme::default());
        let answer = prompt.prompt(&mut console).unwrap();
        assert_eq!(answer.as_deref(), Some("z"));

        let (surface, _) = console.into_parts();
        // Overlay rows would fall past the bottom edge; the input line on
        // the last row is untouched by the suppressed overlay.
        assert!(surface.row_text(9).starts_with("Script: z"));
    }

    #[test]
    fn prompt_restores_ambient_colors() {
        use crossterm::style::Color;
        let keys = ScriptedKeys::new([Key::Escape]);
        let mut console = Console::new(TestSurface::new(40, 10), keys);
        console.surface().set_fg(Color::Magenta).unwrap();
        console.surface().set_bg(Color::Blue).unwrap();

        let prompt = TextPrompt::new("Script", fruits(), Theme::default());
        prompt.prompt(&mut console).unwrap();

        assert_eq!(
            console.surface().colors(),
            (Color::Magenta, Color::Blue)
        );
    }
}
