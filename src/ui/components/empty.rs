//! Empty state component renderer.

use crate::ui::helpers::centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centred two-line message in place of the grid.
pub fn render_empty_state(lines: &mut Vec<String>, empty: &EmptyState, theme: &Theme, cols: usize) {
    lines.push(String::new());
    lines.push(format!(
        "{}{}{}",
        Theme::fg(&theme.colors.empty_state_fg),
        centered(&empty.message, cols),
        Theme::reset()
    ));
    lines.push(format!(
        "{}{}{}{}",
        Theme::dim(),
        Theme::fg(&theme.colors.text_dim),
        centered(&empty.subtitle, cols),
        Theme::reset()
    ));
    lines.push(String::new());
}
