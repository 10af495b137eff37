//! Top-level rendering coordinator.
//!
//! Rendering is a two-step process:
//!
//! 1. **View Model Computation**: [`Gallery::compute_viewmodel`]
//! 2. **Component Rendering**: the layout for the current mode appends lines
//!
//! The result is returned as one ANSI-styled string; the host decides where it
//! goes.
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine::app::Gallery;
//! use vitrine::bus::EventBus;
//! use vitrine::lazy::LazyLoadScheduler;
//! use vitrine::ui::render;
//! use vitrine::Theme;
//!
//! let gallery = Gallery::new(Rc::new(EventBus::new()), LazyLoadScheduler::immediate(), Theme::default());
//! let frame = render(&gallery, 80, 4);
//! assert!(frame.contains("No items to show"));
//! ```

use crate::app::Gallery;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::GalleryViewModel;

/// Renders the gallery to a string `cols` wide, laying the grid out in `columns`.
#[must_use]
pub fn render(gallery: &Gallery, cols: usize, columns: usize) -> String {
    let viewmodel = gallery.compute_viewmodel();
    render_viewmodel(&viewmodel, &gallery.theme, cols, columns)
}

/// Renders a view model with the layout for its mode.
#[must_use]
pub fn render_viewmodel(vm: &GalleryViewModel, theme: &Theme, cols: usize, columns: usize) -> String {
    let mut lines = Vec::new();

    match &vm.viewer {
        Some(panel) => components::render_viewer_mode(&mut lines, vm, panel, theme, cols),
        None => components::render_browse_mode(&mut lines, vm, theme, cols, columns),
    }

    lines.join("\n")
}
