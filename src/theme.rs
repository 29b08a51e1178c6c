//! # Theme
//!
//! Colors and border glyphs as one configuration value. There is a single
//! engine per widget; the theme is the only thing that varies between
//! "skins", so two differently-styled menus share all of their code.

use crossterm::style::Color;

/// Severity of a notification banner, mapped to a color and icon by the
/// theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Success,
    Warning,
    Error,
}

impl Severity {
    pub fn icon(self) -> &'static str {
        match self {
            Severity::Info => "i",
            Severity::Success => "✔",
            Severity::Warning => "!",
            Severity::Error => "✖",
        }
    }
}

/// The six box-drawing characters a bordered widget needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BorderGlyphs {
    pub top_left: char,
    pub top_right: char,
    pub bottom_left: char,
    pub bottom_right: char,
    pub horizontal: char,
    pub vertical: char,
}

impl BorderGlyphs {
    pub const ROUNDED: BorderGlyphs = BorderGlyphs {
        top_left: '╭',
        top_right: '╮',
        bottom_left: '╰',
        bottom_right: '╯',
        horizontal: '─',
        vertical: '│',
    };

    pub const SQUARE: BorderGlyphs = BorderGlyphs {
        top_left: '┌',
        top_right: '┐',
        bottom_left: '└',
        bottom_right: '┘',
        horizontal: '─',
        vertical: '│',
    };

    pub const DOUBLE: BorderGlyphs = BorderGlyphs {
        top_left: '╔',
        top_right: '╗',
        bottom_left: '╚',
        bottom_right: '╝',
        horizontal: '═',
        vertical: '║',
    };

    pub const ASCII: BorderGlyphs = BorderGlyphs {
        top_left: '+',
        top_right: '+',
        bottom_left: '+',
        bottom_right: '+',
        horizontal: '-',
        vertical: '|',
    };

    /// Look up a preset by its config-file name.
    pub fn from_name(name: &str) -> Option<BorderGlyphs> {
        match name {
            "rounded" => Some(Self::ROUNDED),
            "square" => Some(Self::SQUARE),
            "double" => Some(Self::DOUBLE),
            "ascii" => Some(Self::ASCII),
            _ => None,
        }
    }
}

/// Color tokens and glyphs shared by all widgets.
#[derive(Debug, Clone, PartialEq)]
pub struct Theme {
    pub border: Color,
    pub title: Color,
    pub text: Color,
    pub help: Color,
    /// Foreground of the highlighted row; rendered against `highlight_bg`.
    pub highlight_fg: Color,
    pub highlight_bg: Color,
    pub info: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
    pub glyphs: BorderGlyphs,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            border: Color::DarkGrey,
            title: Color::Cyan,
            text: Color::Grey,
            help: Color::DarkGrey,
            highlight_fg: Color::Black,
            highlight_bg: Color::Cyan,
            info: Color::Cyan,
            success: Color::Green,
            warning: Color::Yellow,
            error: Color::Red,
            glyphs: BorderGlyphs::ROUNDED,
        }
    }
}

impl Theme {
    pub fn severity_color(&self, severity: Severity) -> Color {
        match severity {
            Severity::Info => self.info,
            Severity::Success => self.success,
            Severity::Warning => self.warning,
            Severity::Error => self.error,
        }
    }
}

/// Parse a config-file color token: a named color or `#rrggbb`.
pub fn parse_color(token: &str) -> Option<Color> {
    if let Some(hex) = token.strip_prefix('#') {
        if hex.len() == 6 {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            return Some(Color::Rgb { r, g, b });
        }
        return None;
    }
    let color = match token {
        "black" => Color::Black,
        "red" => Color::Red,
        "green" => Color::Green,
        "yellow" => Color::Yellow,
        "blue" => Color::Blue,
        "magenta" => Color::Magenta,
        "cyan" => Color::Cyan,
        "white" => Color::White,
        "grey" | "gray" => Color::Grey,
        "dark_grey" | "dark_gray" => Color::DarkGrey,
        "dark_red" => Color::DarkRed,
        "dark_green" => Color::DarkGreen,
        "dark_yellow" => Color::DarkYellow,
        "dark_blue" => Color::DarkBlue,
        "dark_magenta" => Color::DarkMagenta,
        "dark_cyan" => Color::DarkCyan,
        "reset" | "default" => Color::Reset,
        _ => return None,
    };
    Some(color)
}
