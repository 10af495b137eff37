//! Search bar component renderer.
//!
//! A one-line input box with the result counter right-aligned inside it.

use crate::ui::helpers::{truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders a bordered three-line search box labelled `label`.
///
/// ```text
/// [margin] ┌──────────────────────────┐
/// [margin] │ Search: sun    2 results │
/// [margin] └──────────────────────────┘
/// ```
///
/// The border takes the accent color while the input is focused.
pub fn render_search_bar(lines: &mut Vec<String>, label: &str, search: &SearchBarInfo, theme: &Theme, cols: usize) {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let margin = " ".repeat(SEARCH_BOX_MARGIN);
    let border = if search.focused {
        Theme::fg(&theme.colors.accent_fg)
    } else {
        Theme::fg(&theme.colors.border)
    };

    lines.push(format!("{margin}{border}┌{}┐{}", "─".repeat(inner_width), Theme::reset()));

    let stats = if search.stats.is_empty() {
        String::new()
    } else {
        format!("{} ", search.stats)
    };
    let query_room = inner_width.saturating_sub(width(label) + 3 + width(&stats));
    let text = format!(" {label}: {}", truncate(&search.query, query_room));
    let padding = inner_width.saturating_sub(width(&text) + width(&stats));

    lines.push(format!(
        "{margin}{border}│{}{text}{}{}{stats}{border}│{}",
        Theme::fg(&theme.colors.text_normal),
        " ".repeat(padding),
        Theme::fg(&theme.colors.text_dim),
        Theme::reset()
    ));

    lines.push(format!("{margin}{border}└{}┘{}", "─".repeat(inner_width), Theme::reset()));
}
