//! User interface rendering layer.
//!
//! Turns gallery state into ANSI-styled text for the terminal host. A browser
//! host would skip this layer and execute [`Action`](crate::app::Action)s
//! against its own DOM instead.
//!
//! ```text
//! Gallery → compute_viewmodel → GalleryViewModel → render → ANSI text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready view model types
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Component renderers and layouts
//! - [`helpers`]: Text measuring and highlighting
//! - [`theme`]: Color schemes and ANSI escape sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    CarouselRow, EmptyState, FilterChip, FooterInfo, GalleryViewModel, HeaderInfo, LoadMoreInfo,
    SearchBarInfo, ThumbCard, ViewerPanel,
};
