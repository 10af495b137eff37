//! Footer component: centred key hints.

use crate::ui::helpers::{centered, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

pub fn render_footer(lines: &mut Vec<String>, footer: &FooterInfo, theme: &Theme, cols: usize) {
    let help_text = truncate(&footer.keybindings, cols);
    lines.push(format!(
        "{}{}{}",
        Theme::fg(&theme.colors.text_dim),
        centered(&help_text, cols),
        Theme::reset()
    ));
}
