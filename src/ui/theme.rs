//! Theme management and ANSI escape sequence generation.
//!
//! Colors for the terminal renderer, either built in or loaded from a TOML
//! file.
//!
//! # Built-in Themes
//!
//! - `gallery-dark`: Charcoal background tones with amber accents (default)
//! - `gallery-light`: Paper tones with ink-blue accents
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-theme"
//!
//! [colors]
//! header_fg = "#f2e9dc"
//! text_normal = "#e6e1d6"
//! text_dim = "#7d776c"
//! border = "#3a3631"
//! accent_fg = "#f0a63c"
//! active_filter_fg = "#1d1b18"
//! active_filter_bg = "#f0a63c"
//! match_highlight_fg = "#1d1b18"
//! match_highlight_bg = "#e8d48b"
//! dimmed_fg = "#5a554d"
//! empty_state_fg = "#8fb3d9"
//! ```
//!
//! # Example
//!
//! ```rust
//! use vitrine::ui::theme::Theme;
//!
//! let theme = Theme::from_name("gallery-light").unwrap();
//! println!("{}{}{}", Theme::fg(&theme.colors.accent_fg), theme.name, Theme::reset());
//! ```

use crate::domain::{GalleryError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Name of the theme used when none is configured.
pub const DEFAULT_THEME: &str = "gallery-dark";

/// Color scheme for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    /// Human-readable theme name.
    pub name: String,
    /// Color palette.
    pub colors: ThemeColors,
}

/// Hex color strings (e.g. `"#f2e9dc"`) for every styled element.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub text_normal: String,
    /// Secondary text: counters, captions, footer.
    pub text_dim: String,
    pub border: String,

    /// Centred carousel slide and viewer title.
    pub accent_fg: String,

    pub active_filter_fg: String,
    pub active_filter_bg: String,

    /// Query term highlight in titles.
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    /// Carousel slides dimmed by site search.
    pub dimmed_fg: String,

    pub empty_state_fg: String,
}

impl Theme {
    /// Loads a built-in theme by name.
    ///
    /// Returns `None` for unknown names.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "gallery-dark" => include_str!("../../themes/gallery-dark.toml"),
            "gallery-light" => include_str!("../../themes/gallery-light.toml"),
            _ => return None,
        };

        toml::from_str(toml_str).ok()
    }

    /// Loads a theme from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`GalleryError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path)
            .map_err(|e| GalleryError::Theme(format!("failed to read {}: {e}", path.display())))?;

        toml::from_str(&contents).map_err(|e| GalleryError::Theme(format!("failed to parse theme TOML: {e}")))
    }

    /// Plain palette used if the compiled-in default ever fails to parse.
    fn monochrome() -> Self {
        let white = || "#ffffff".to_string();
        let grey = || "#808080".to_string();
        let black = || "#000000".to_string();
        Self {
            name: "monochrome".to_string(),
            colors: ThemeColors {
                header_fg: white(),
                header_bg: None,
                text_normal: white(),
                text_dim: grey(),
                border: grey(),
                accent_fg: white(),
                active_filter_fg: black(),
                active_filter_bg: white(),
                match_highlight_fg: black(),
                match_highlight_bg: grey(),
                dimmed_fg: grey(),
                empty_state_fg: white(),
            },
        }
    }

    /// Converts a hex color to an RGB tuple, white on malformed input.
    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI 24-bit foreground color sequence.
    ///
    /// ```rust
    /// use vitrine::ui::theme::Theme;
    ///
    /// assert_eq!(Theme::fg("#ff8000"), "\u{1b}[38;2;255;128;0m");
    /// ```
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI 24-bit background color sequence.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    /// Clears all styling.
    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name(DEFAULT_THEME).unwrap_or_else(|| {
            tracing::debug!(theme = DEFAULT_THEME, "built-in theme failed to parse, using monochrome");
            Self::monochrome()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_builtin_themes_parse() {
        assert_eq!(Theme::from_name("gallery-dark").unwrap().name, "gallery-dark");
        assert_eq!(Theme::from_name("gallery-light").unwrap().name, "gallery-light");
        assert!(Theme::from_name("neon").is_none());
        assert_eq!(Theme::default().name, DEFAULT_THEME);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let dark = include_str!("../../themes/gallery-dark.toml").replace("gallery-dark", "custom");
        file.write_all(dark.as_bytes()).unwrap();

        let theme = Theme::from_file(file.path()).unwrap();
        assert_eq!(theme.name, "custom");
    }

    #[test]
    fn test_from_file_reports_theme_errors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"name = 3").unwrap();
        assert!(matches!(Theme::from_file(file.path()), Err(GalleryError::Theme(_))));
        assert!(matches!(Theme::from_file("/nonexistent/theme.toml"), Err(GalleryError::Theme(_))));
    }

    #[test]
    fn test_malformed_hex_falls_back_to_white() {
        assert_eq!(Theme::fg("oops"), "\u{1b}[38;2;255;255;255m");
    }
}
