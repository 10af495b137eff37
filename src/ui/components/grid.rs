//! Grid component renderer.
//!
//! Revealed thumbnails are listed as rows of cards, `columns` per row, each
//! card showing its title (query terms highlighted) and a marker for whether
//! the image source has been assigned. The pagination control closes the grid.

use crate::ui::helpers::{self, truncate, width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{LoadMoreInfo, ThumbCard};

/// Marker of a card whose image has loaded.
const LOADED_MARK: &str = "■";
/// Marker of a placeholder still waiting for its source.
const PENDING_MARK: &str = "□";

/// Renders thumbnail cards and the "Load more" control.
pub fn render_grid(
    lines: &mut Vec<String>,
    thumbs: &[ThumbCard],
    load_more: &LoadMoreInfo,
    theme: &Theme,
    cols: usize,
    columns: usize,
) {
    let columns = columns.max(1);
    let cell_width = (cols / columns).max(8);
    let title_width = cell_width.saturating_sub(4);
    let normal = Theme::fg(&theme.colors.text_normal);

    for row in thumbs.chunks(columns) {
        let mut line = String::new();
        for card in row {
            let mark = if card.loaded { LOADED_MARK } else { PENDING_MARK };
            let title = truncate(&card.title, title_width);
            // Ranges past the truncation point are clamped by the highlighter.
            let rendered = helpers::render_highlighted_text(&title, &card.highlight_ranges, theme, &normal);

            line.push_str(&Theme::fg(&theme.colors.text_dim));
            line.push_str(&format!(" {mark} "));
            line.push_str(&normal);
            line.push_str(&rendered);
            line.push_str(&" ".repeat(cell_width.saturating_sub(width(&title) + 3)));
            line.push_str(Theme::reset());
        }
        lines.push(line);
    }

    let (style, label) = if load_more.enabled {
        (Theme::fg(&theme.colors.accent_fg), format!("[ {} ]", load_more.label))
    } else {
        (format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)), load_more.label.clone())
    };
    lines.push(format!("{style}{}{}", helpers::centered(&label, cols), Theme::reset()));
}
