//! Colour themes and the ANSI sequences built from them.
//!
//! Themes map the visual roles of the page to hex colours. Two Catppuccin
//! variants are compiled in; custom themes are loaded from TOML files.
//!
//! # Theme files
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#cba6f7"
//! heading_fg = "#89b4fa"
//! text_normal = "#cdd6f4"
//! text_dim = "#7f849c"
//! link_fg = "#94e2d5"
//! input_fg = "#f5e0dc"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! border = "#45475a"
//! overlay_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! ```
//!
//! `header_bg` and `overlay_bg` are optional.

use crate::domain::error::{PostboardError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named set of colours, one per visual role of the page.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colour for every visual role.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ThemeColors {
    /// Page heading.
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    /// Post titles.
    pub heading_fg: String,

    pub text_normal: String,
    /// Meta lines, footer hints, placeholders.
    pub text_dim: String,

    pub link_fg: String,
    pub input_fg: String,

    /// Keyboard focus.
    pub selection_fg: String,
    pub selection_bg: String,

    pub border: String,
    pub overlay_border: String,
    #[serde(default)]
    pub overlay_bg: Option<String>,

    /// Search term occurrences.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name (`catppuccin-mocha`, `catppuccin-latte`).
    ///
    /// # Example
    ///
    /// ```rust
    /// use postboard::ui::theme::Theme;
    ///
    /// let theme = Theme::from_name("catppuccin-latte").unwrap();
    /// assert_eq!(theme.name, "catppuccin-latte");
    /// assert!(Theme::from_name("solarized").is_none());
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`PostboardError::Theme`] if the file cannot be read or its
    /// content is not a valid theme.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path.as_ref()).map_err(|e| {
            PostboardError::Theme(format!("failed to read {}: {e}", path.as_ref().display()))
        })?;

        toml::from_str(&contents).map_err(|e| PostboardError::Theme(format!("invalid theme: {e}")))
    }

    /// Parses `#rrggbb`; malformed input yields white.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim().trim_start_matches('#');

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).unwrap_or(255);
        (channel(0..2), channel(2..4), channel(4..6))
    }

    /// 24-bit foreground colour sequence.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// 24-bit background colour sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    /// Bold text.
    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    /// Underlined text, used for links.
    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    /// Clears every colour and attribute.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    /// Catppuccin Mocha.
    ///
    /// # Panics
    ///
    /// Panics if the embedded theme fails to parse.
    fn default() -> Self {
        Self::from_name("catppuccin-mocha")
            .expect("Built-in catppuccin-mocha theme should always parse")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_themes_parse() {
        assert_eq!(Theme::default().name, "catppuccin-mocha");
        assert!(Theme::from_name("catppuccin-latte").is_some());
    }

    #[test]
    fn hex_colours_become_truecolor_sequences() {
        assert_eq!(Theme::fg("#ff0080"), "\u{1b}[38;2;255;0;128m");
        assert_eq!(Theme::bg("000000"), "\u{1b}[48;2;0;0;0m");
        assert_eq!(Theme::fg("bogus"), "\u{1b}[38;2;255;255;255m");
    }

    #[test]
    fn theme_file_round_trips_through_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let serialized = toml::to_string(&Theme::default()).unwrap();
        file.write_all(serialized.as_bytes()).unwrap();

        let loaded = Theme::from_file(file.path()).unwrap();
        assert_eq!(loaded.colors.link_fg, Theme::default().colors.link_fg);
    }

    #[test]
    fn missing_or_invalid_theme_file_is_a_theme_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Theme::from_file(&missing), Err(PostboardError::Theme(_))));

        let bad = dir.path().join("bad.toml");
        std::fs::write(&bad, "name = 3").unwrap();
        assert!(matches!(Theme::from_file(&bad), Err(PostboardError::Theme(_))));
    }
}
