//! # Configuration
//!
//! Display preferences for the widgets with a clear override hierarchy:
//! defaults → config file → env vars.
//!
//! Config lives at `~/.termkit/ui.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.
//! Color values are tokens (`"cyan"`, `"dark_grey"`, `"#aabbcc"`); unknown
//! tokens fall back to the default with a warning rather than failing.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;

use crate::theme::{BorderGlyphs, Theme, parse_color};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct UiConfig {
    #[serde(default)]
    pub menu: MenuConfig,
    #[serde(default)]
    pub colors: ColorConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct MenuConfig {
    pub width: Option<u16>,
    /// Border preset: "rounded", "square", "double" or "ascii".
    pub border_style: Option<String>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct ColorConfig {
    pub border: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub help: Option<String>,
    pub highlight_fg: Option<String>,
    pub highlight_bg: Option<String>,
    pub info: Option<String>,
    pub success: Option<String>,
    pub warning: Option<String>,
    pub error: Option<String>,
}

pub const DEFAULT_MENU_WIDTH: u16 = 60;

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedUi {
    pub theme: Theme,
    pub menu_width: u16,
}

impl Default for ResolvedUi {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            menu_width: DEFAULT_MENU_WIDTH,
        }
    }
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.termkit/ui.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".termkit").join("ui.toml"))
}

/// Load config from `~/.termkit/ui.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `UiConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<UiConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(UiConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(UiConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: UiConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r##"# termkit UI configuration
# All settings are optional — defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars.

# [menu]
# width = 60
# border_style = "rounded"   # "rounded", "square", "double", "ascii"

# Colors are named tokens or "#rrggbb" hex values.
# [colors]
# border = "dark_grey"
# title = "cyan"
# text = "grey"
# help = "dark_grey"
# highlight_fg = "black"
# highlight_bg = "cyan"
# info = "cyan"
# success = "green"
# warning = "yellow"
# error = "red"
"##;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final display preferences: defaults → config file → env.
///
/// Recognized env vars: `TERMKIT_BORDER` (glyph preset name) and
/// `TERMKIT_MENU_WIDTH`.
pub fn resolve(config: &UiConfig) -> ResolvedUi {
    let mut theme = Theme::default();

    let apply = |slot: &mut crossterm::style::Color, token: &Option<String>, name: &str| {
        if let Some(token) = token {
            match parse_color(token) {
                Some(color) => *slot = color,
                None => warn!("Unknown color token '{}' for {}, keeping default", token, name),
            }
        }
    };

    apply(&mut theme.border, &config.colors.border, "border");
    apply(&mut theme.title, &config.colors.title, "title");
    apply(&mut theme.text, &config.colors.text, "text");
    apply(&mut theme.help, &config.colors.help, "help");
    apply(&mut theme.highlight_fg, &config.colors.highlight_fg, "highlight_fg");
    apply(&mut theme.highlight_bg, &config.colors.highlight_bg, "highlight_bg");
    apply(&mut theme.info, &config.colors.info, "info");
    apply(&mut theme.success, &config.colors.success, "success");
    apply(&mut theme.warning, &config.colors.warning, "warning");
    apply(&mut theme.error, &config.colors.error, "error");

    // Border preset: env → config → default
    let border_style = std::env::var("TERMKIT_BORDER")
        .ok()
        .or_else(|| config.menu.border_style.clone());
    if let Some(name) = border_style {
        match BorderGlyphs::from_name(&name) {
            Some(glyphs) => theme.glyphs = glyphs,
            None => warn!("Unknown border style '{}', keeping default", name),
        }
    }

    // Menu width: env → config → default
    let menu_width = std::env::var("TERMKIT_MENU_WIDTH")
        .ok()
        .and_then(|v| v.parse().ok())
        .or(config.menu.width)
        .unwrap_or(DEFAULT_MENU_WIDTH);

    ResolvedUi { theme, menu_width }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::style::Color;

    #[test]
    fn default_config_resolves_to_default_theme() {
        let config = UiConfig::default();
        let resolved = resolve(&config);
        assert_eq!(resolved.theme, Theme::default());
        assert_eq!(resolved.menu_width, DEFAULT_MENU_WIDTH);
    }

    #[test]
    fn sparse_toml_parses() {
        // Only override one thing — everything else stays default
        let toml_str = r#"
[menu]
width = 44
"#;
        let config: UiConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.menu.width, Some(44));
        assert!(config.menu.border_style.is_none());
        assert!(config.colors.border.is_none());
    }

    #[test]
    fn config_values_override_defaults() {
        let toml_str = r##"
[menu]
width = 72
border_style = "double"

[colors]
border = "blue"
highlight_bg = "#336699"
"##;
        let config: UiConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config);
        assert_eq!(resolved.menu_width, 72);
        assert_eq!(resolved.theme.glyphs, BorderGlyphs::DOUBLE);
        assert_eq!(resolved.theme.border, Color::Blue);
        assert_eq!(
            resolved.theme.highlight_bg,
            Color::Rgb {
                r: 0x33,
                g: 0x66,
                b: 0x99
            }
        );
        // Untouched tokens keep their defaults
        assert_eq!(resolved.theme.title, Color::Cyan);
    }

    #[test]
    fn unknown_tokens_keep_defaults() {
        let toml_str = r#"
[menu]
border_style = "wavy"

[colors]
border = "not-a-color"
"#;
        let config: UiConfig = toml::from_str(toml_str).unwrap();
        let resolved = resolve(&config);
        assert_eq!(resolved.theme.glyphs, BorderGlyphs::ROUNDED);
        assert_eq!(resolved.theme.border, Color::DarkGrey);
    }
}
