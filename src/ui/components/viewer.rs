//! Viewer panel renderer.

use crate::ui::helpers::{centered, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ViewerPanel;

/// Renders the open viewer: image source, title, description, date and position.
pub fn render_viewer(lines: &mut Vec<String>, panel: &ViewerPanel, theme: &Theme, cols: usize) {
    let caption = &panel.caption;
    let dim = Theme::fg(&theme.colors.text_dim);
    let reset = Theme::reset();

    lines.push(format!("{dim}{}{reset}", centered(&format!("‹  {}  ›", panel.position), cols)));
    lines.push(format!(
        "{}{}{}{reset}",
        Theme::bold(),
        Theme::fg(&theme.colors.accent_fg),
        centered(&truncate(&caption.title, cols), cols)
    ));
    lines.push(format!("{dim}{}{reset}", centered(&truncate(&caption.image_url, cols), cols)));
    lines.push(String::new());
    lines.push(format!(
        "{}{}{reset}",
        Theme::fg(&theme.colors.text_normal),
        centered(&truncate(&caption.description, cols), cols)
    ));
    lines.push(format!("{dim}{}{reset}", centered(&caption.date_line, cols)));
}
