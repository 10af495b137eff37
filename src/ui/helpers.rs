//! Shared rendering utilities.
//!
//! Text is measured in chars, not bytes, so titles with accents line up.

use crate::ui::theme::Theme;

/// Number of chars in `text`.
#[must_use]
pub fn width(text: &str) -> usize {
    text.chars().count()
}

/// Cuts `text` to at most `max` chars, ending in `…` when shortened.
///
/// ```rust
/// use vitrine::ui::helpers::truncate;
///
/// assert_eq!(truncate("Sunset Over Hills", 8), "Sunset …");
/// assert_eq!(truncate("Dusk", 8), "Dusk");
/// ```
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if width(text) <= max {
        return text.to_string();
    }
    if max == 0 {
        return String::new();
    }
    let mut out: String = text.chars().take(max - 1).collect();
    out.push('…');
    out
}

/// Left pads `text` so it sits centred in `cols`.
#[must_use]
pub fn centered(text: &str, cols: usize) -> String {
    let padding = cols.saturating_sub(width(text)) / 2;
    format!("{}{text}", " ".repeat(padding))
}

/// A full-width horizontal rule.
#[must_use]
pub fn rule(color: &str, cols: usize) -> String {
    format!("{}{}{}", Theme::fg(color), "─".repeat(cols), Theme::reset())
}

/// Renders `text` with the char ranges in `ranges` highlighted.
///
/// `ranges` must be sorted and disjoint; out-of-bounds ends are clamped.
/// After each highlight the `restore` sequence re-applies the surrounding
/// style.
#[must_use]
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, restore: &str) -> String {
    if ranges.is_empty() {
        return text.to_string();
    }

    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len() + ranges.len() * 32);
    let mut current = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current || start >= end {
            continue;
        }

        out.extend(&chars[current..start]);
        out.push_str(&Theme::fg(&theme.colors.match_highlight_fg));
        out.push_str(&Theme::bg(&theme.colors.match_highlight_bg));
        out.extend(&chars[start..end]);
        out.push_str(Theme::reset());
        out.push_str(restore);
        current = end;
    }

    out.extend(&chars[current..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_highlight_wraps_ranges_only() {
        let theme = Theme::default();
        let out = render_highlighted_text("abcdef", &[(1, 3)], &theme, "");
        assert!(out.starts_with('a'));
        assert!(out.ends_with("def"));
        assert!(out.contains("bc"));
        assert!(out.contains(&Theme::bg(&theme.colors.match_highlight_bg)));
    }

    #[test]
    fn test_highlight_clamps_bounds() {
        let theme = Theme::default();
        let out = render_highlighted_text("ab", &[(1, 10)], &theme, "");
        assert!(out.starts_with('a'));
        assert!(out.contains('b'));
    }

    #[test]
    fn test_truncate_counts_chars() {
        assert_eq!(truncate("café au lait", 5), "café…");
        assert_eq!(truncate("abc", 0), "");
    }

    #[test]
    fn test_centered() {
        assert_eq!(centered("ab", 6), "  ab");
    }
}
