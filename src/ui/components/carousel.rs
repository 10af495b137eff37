//! Carousel component renderer.
//!
//! One line per carousel: edge arrows, then every slide title, the centred
//! slide emphasized and dimmed slides greyed out.

use crate::ui::helpers::truncate;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::CarouselRow;

const SLIDE_TITLE_WIDTH: usize = 14;

pub fn render_carousels(lines: &mut Vec<String>, rows: &[CarouselRow], theme: &Theme) {
    for row in rows {
        let arrow = |disabled: bool, glyph: &str| {
            if disabled {
                format!("{}{glyph}{}", Theme::fg(&theme.colors.dimmed_fg), Theme::reset())
            } else {
                format!("{}{glyph}{}", Theme::fg(&theme.colors.accent_fg), Theme::reset())
            }
        };

        let mut line = format!(
            " {}{}{}  {} ",
            Theme::bold(),
            row.group,
            Theme::reset(),
            arrow(row.left_disabled, "‹")
        );
        for slide in &row.slides {
            let title = truncate(&slide.title, SLIDE_TITLE_WIDTH);
            if slide.centered {
                line.push_str(Theme::bold());
                line.push_str(&Theme::fg(&theme.colors.accent_fg));
                line.push_str(&format!("[{title}]"));
            } else if slide.dimmed {
                line.push_str(&Theme::fg(&theme.colors.dimmed_fg));
                line.push_str(&format!(" {title} "));
            } else {
                line.push_str(&Theme::fg(&theme.colors.text_normal));
                line.push_str(&format!(" {title} "));
            }
            line.push_str(Theme::reset());
        }
        line.push(' ');
        line.push_str(&arrow(row.right_disabled, "›"));
        lines.push(line);
    }
}
