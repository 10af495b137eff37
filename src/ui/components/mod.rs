//! Composable UI component renderers.
//!
//! Each component appends its lines to a shared buffer; the layout functions
//! decide which components appear and in what order.
//!
//! # Components
//!
//! - [`header`]: Title, counts and category buttons
//! - [`search`]: Search input boxes with result counters
//! - [`grid`]: Thumbnail cards and the "Load more" control
//! - [`carousel`]: One line per carousel group
//! - [`viewer`]: The open viewer panel
//! - [`empty`]: Message shown in place of an empty grid
//! - [`footer`]: Key hints
//!
//! # Layout Modes
//!
//! - [`render_browse_mode`]: Header + Search + Grid + Carousels + Footer
//! - [`render_viewer_mode`]: Header + Viewer + Footer

mod carousel;
mod empty;
mod footer;
mod grid;
mod header;
mod search;
mod viewer;

use crate::ui::helpers::rule;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{GalleryViewModel, ViewerPanel};

use carousel::render_carousels;
use empty::render_empty_state;
use footer::render_footer;
use grid::render_grid;
use header::render_header;
use search::render_search_bar;
use viewer::render_viewer;

/// Renders the browsing layout.
///
/// ```text
/// [Header + filters]
/// [Border]
/// [Search bar - 3 lines]
/// [Grid rows | empty state]
/// [Load more]
/// [Border]
/// [Site search - 3 lines]
/// [Carousel lines]
/// [Border]
/// [Footer]
/// ```
pub fn render_browse_mode(lines: &mut Vec<String>, vm: &GalleryViewModel, theme: &Theme, cols: usize, columns: usize) {
    render_header(lines, &vm.header, &vm.filters, theme, cols);
    lines.push(rule(&theme.colors.border, cols));
    render_search_bar(lines, "Search", &vm.search_bar, theme, cols);

    match &vm.empty_state {
        Some(empty) => render_empty_state(lines, empty, theme, cols),
        None => render_grid(lines, &vm.thumbs, &vm.load_more, theme, cols, columns),
    }

    if !vm.carousels.is_empty() {
        lines.push(rule(&theme.colors.border, cols));
        render_search_bar(lines, "Site search", &vm.site_search, theme, cols);
        render_carousels(lines, &vm.carousels, theme);
    }

    lines.push(rule(&theme.colors.border, cols));
    render_footer(lines, &vm.footer, theme, cols);
}

/// Renders the viewer layout, which covers the grid while open.
pub fn render_viewer_mode(lines: &mut Vec<String>, vm: &GalleryViewModel, panel: &ViewerPanel, theme: &Theme, cols: usize) {
    render_header(lines, &vm.header, &vm.filters, theme, cols);
    lines.push(rule(&theme.colors.border, cols));
    render_viewer(lines, panel, theme, cols);
    lines.push(rule(&theme.colors.border, cols));
    render_footer(lines, &vm.footer, theme, cols);
}
