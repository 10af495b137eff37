//! Header component: title, reveal counts and category buttons.

use crate::ui::helpers::{centered, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{FilterChip, HeaderInfo};

/// Renders the centred title line followed by the filter button line.
pub fn render_header(lines: &mut Vec<String>, header: &HeaderInfo, filters: &[FilterChip], theme: &Theme, cols: usize) {
    let mut title = String::new();
    title.push_str(Theme::bold());
    title.push_str(&Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        title.push_str(&Theme::bg(bg));
    }
    let text = format!("{}  ·  {}", header.title, header.counts);
    let line = centered(&text, cols);
    let fill = cols.saturating_sub(width(&line));
    title.push_str(&line);
    title.push_str(&" ".repeat(fill));
    title.push_str(Theme::reset());
    lines.push(title);

    let mut chips = String::from(" ");
    for chip in filters {
        if chip.active {
            chips.push_str(&Theme::fg(&theme.colors.active_filter_fg));
            chips.push_str(&Theme::bg(&theme.colors.active_filter_bg));
        } else {
            chips.push_str(&Theme::fg(&theme.colors.text_normal));
        }
        chips.push_str(&format!(" {} ", chip.label));
        chips.push_str(Theme::reset());
        chips.push(' ');
    }
    lines.push(chips);
}
