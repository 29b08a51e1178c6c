//! # Menu engine
//!
//! A bordered list of keyed options with one highlighted row. `show()` owns
//! the screen: it clears the terminal, draws header and box, then loops on
//! key events until a terminal option (key `'0'` by convention) runs.
//!
//! Every non-exiting transition redraws the whole menu from current state —
//! a deliberate simplicity trade-off over diff-based redraw. Rendering is a
//! single state-driven function called from a flat loop, so a redraw is
//! idempotent and testable apart from input handling.
//!
//! Handler errors are not caught here; they propagate to the caller of
//! `show()` and may leave the screen partially drawn.

use std::io;

use unicode_width::UnicodeWidthStr;

use crate::config::ResolvedUi;
use crate::console::{Console, Handler};
use crate::error::BuildError;
use crate::event::{Key, KeySource};
use crate::surface::Surface;
use crate::theme::Theme;
use crate::widgets::help::HelpOverlay;

/// One selectable entry: the literal key a user types to run it, the label
/// shown in the box, and the action itself.
pub struct MenuOption<S: Surface, K: KeySource> {
    pub key: char,
    pub label: String,
    handler: Handler<S, K>,
}

impl<S: Surface, K: KeySource> MenuOption<S, K> {
    pub fn new(
        key: char,
        label: impl Into<String>,
        handler: impl FnMut(&mut Console<S, K>) -> io::Result<()> + 'static,
    ) -> Self {
        Self {
            key,
            label: label.into(),
            handler: Box::new(handler),
        }
    }
}

struct Shortcut<S: Surface, K: KeySource> {
    key: char,
    description: String,
    handler: Handler<S, K>,
}

pub struct Menu<S: Surface, K: KeySource> {
    title: String,
    version: Option<String>,
    context: Option<String>,
    subtitle: Option<String>,
    options: Vec<MenuOption<S, K>>,
    shortcuts: Vec<Shortcut<S, K>>,
    help_text: String,
    width: u16,
    theme: Theme,
    selected: usize,
}

impl<S: Surface, K: KeySource> Menu<S, K> {
    /// Build a menu. Fails fast on an empty option list, a zero width, or
    /// two options sharing a key.
    pub fn new(
        title: impl Into<String>,
        options: Vec<MenuOption<S, K>>,
        ui: &ResolvedUi,
    ) -> Result<Self, BuildError> {
        if options.is_empty() {
            return Err(BuildError::EmptyOptions);
        }
        if ui.menu_width == 0 {
            return Err(BuildError::ZeroWidth);
        }
        for (i, option) in options.iter().enumerate() {
            if options[..i].iter().any(|o| o.key == option.key) {
                return Err(BuildError::DuplicateKey(option.key));
            }
        }
        Ok(Self {
            title: title.into(),
            version: None,
            context: None,
            subtitle: None,
            options,
            shortcuts: Vec::new(),
            help_text: "↑/↓ move · Enter select · Esc back · F1 help".to_string(),
            width: ui.menu_width,
            theme: ui.theme.clone(),
            selected: 0,
        })
    }

    /// Version suffix appended to the title, e.g. `v1.4.0`.
    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = Some(version.into());
        self
    }

    /// Working-context line under the title, e.g. the current directory.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = help_text.into();
        self
    }

    /// Bind a non-digit key to an extra action that keeps the menu open.
    pub fn with_shortcut(
        mut self,
        key: char,
        description: impl Into<String>,
        handler: impl FnMut(&mut Console<S, K>) -> io::Result<()> + 'static,
    ) -> Result<Self, BuildError> {
        if key.is_ascii_digit() {
            return Err(BuildError::DigitShortcut(key));
        }
        if self.options.iter().any(|o| o.key == key)
            || self.shortcuts.iter().any(|s| s.key == key)
        {
            return Err(BuildError::DuplicateKey(key));
        }
        self.shortcuts.push(Shortcut {
            key,
            description: description.into(),
            handler: Box::new(handler),
        });
        Ok(self)
    }

    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Run the menu until an option with key `'0'` is invoked (directly, via
    /// Enter on its row, or via Escape).
    pub fn show(&mut self, console: &mut Console<S, K>) -> io::Result<()> {
        loop {
            self.render(console)?;

            match console.next_key()? {
                Key::Char(c) => {
                    if let Some(i) = self.options.iter().position(|o| o.key == c) {
                        (self.options[i].handler)(console)?;
                        if c == '0' {
                            return Ok(());
                        }
                    } else if let Some(i) = self.shortcuts.iter().position(|s| s.key == c) {
                        (self.shortcuts[i].handler)(console)?;
                    } else {
                        self.flash_unknown_key(console, c)?;
                    }
                }
                Key::Up => self.selected = self.selected.saturating_sub(1),
                Key::Down => {
                    self.selected = (self.selected + 1).min(self.options.len() - 1);
                }
                Key::Enter => {
                    let key = self.options[self.selected].key;
                    (self.options[self.selected].handler)(console)?;
                    if key == '0' {
                        return Ok(());
                    }
                }
                Key::Escape => {
                    if let Some(i) = self.options.iter().position(|o| o.key == '0') {
                        (self.options[i].handler)(console)?;
                        return Ok(());
                    }
                }
                Key::F1 => self.show_help(console)?,
                // No menu binding for editing keys.
                Key::Tab | Key::Left | Key::Right | Key::Backspace | Key::Delete => {}
            }
        }
    }

    /// Row of the box's top border.
    fn box_top(&self) -> u16 {
        1 + u16::from(self.context.is_some()) + u16::from(self.subtitle.is_some()) + 1
    }

    /// Full redraw from current state: header, box, help line.
    fn render(&mut self, console: &mut Console<S, K>) -> io::Result<()> {
        let (term_width, _) = console.size()?;
        let width = self.width.min(term_width);
        let interior = width.saturating_sub(2) as usize;
        let glyphs = self.theme.glyphs;
        let box_top = self.box_top();

        let surface = console.surface();
        surface.clear_all()?;
        surface.hide_cursor()?;

        // Header
        surface.set_fg(self.theme.title)?;
        surface.move_to(0, 0)?;
        match &self.version {
            Some(version) => surface.print(&format!("{} v{}", self.title, version))?,
            None => surface.print(&self.title)?,
        }
        let mut row = 1;
        if let Some(context) = &self.context {
            surface.set_fg(self.theme.help)?;
            surface.move_to(0, row)?;
            surface.print(context)?;
            row += 1;
        }
        if let Some(subtitle) = &self.subtitle {
            surface.set_fg(self.theme.text)?;
            surface.move_to(0, row)?;
            surface.print(subtitle)?;
        }

        // Option box
        surface.set_fg(self.theme.border)?;
        surface.move_to(0, box_top)?;
        surface.print(&format!(
            "{}{}{}",
            glyphs.top_left,
            glyphs.horizontal.to_string().repeat(interior),
            glyphs.top_right
        ))?;

        for (i, option) in self.options.iter().enumerate() {
            let row = box_top + 1 + i as u16;
            surface.set_fg(self.theme.border)?;
            surface.move_to(0, row)?;
            surface.print(&glyphs.vertical.to_string())?;
            surface.move_to(width - 1, row)?;
            surface.print(&glyphs.vertical.to_string())?;

            let content = format!(" [{}] {}", option.key, option.label);
            let padding = interior.saturating_sub(content.width());
            surface.move_to(1, row)?;
            if i == self.selected {
                surface.set_fg(self.theme.highlight_fg)?;
                surface.set_bg(self.theme.highlight_bg)?;
            } else {
                surface.set_fg(self.theme.text)?;
            }
            surface.print(&content)?;
            surface.print(&" ".repeat(padding))?;
            surface.reset_colors()?;
        }

        surface.set_fg(self.theme.border)?;
        surface.move_to(0, box_top + 1 + self.options.len() as u16)?;
        surface.print(&format!(
            "{}{}{}",
            glyphs.bottom_left,
            glyphs.horizontal.to_string().repeat(interior),
            glyphs.bottom_right
        ))?;

        // Help line
        surface.set_fg(self.theme.help)?;
        surface.move_to(1, box_top + 2 + self.options.len() as u16)?;
        surface.print(&self.help_text)?;
        surface.reset_colors()?;
        surface.flush()
    }

    /// Transient inline error for a key bound to nothing; waits for an
    /// acknowledging keypress, then the next loop iteration redraws.
    fn flash_unknown_key(&mut self, console: &mut Console<S, K>, key: char) -> io::Result<()> {
        let row = self.box_top() + 3 + self.options.len() as u16;
        let surface = console.surface();
        surface.set_fg(self.theme.warning)?;
        surface.move_to(1, row)?;
        surface.print(&format!("Unknown option '{key}' — press any key"))?;
        surface.reset_colors()?;
        surface.flush()?;
        console.next_key()?;
        Ok(())
    }

    fn show_help(&self, console: &mut Console<S, K>) -> io::Result<()> {
        let mut items: Vec<(String, String)> = self
            .options
            .iter()
            .map(|o| (o.key.to_string(), o.label.clone()))
            .collect();
        for shortcut in &self.shortcuts {
            items.push((shortcut.key.to_string(), shortcut.description.clone()));
        }
        items.push(("↑/↓".to_string(), "Move selection".to_string()));
        items.push(("Enter".to_string(), "Run highlighted option".to_string()));
        items.push(("Esc".to_string(), "Back".to_string()));
        items.push(("F1".to_string(), "This overview".to_string()));

        HelpOverlay::new("Keyboard", items, self.theme.clone()).show(console)
    }
}
