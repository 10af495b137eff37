//! Carousel groups and widgets.
//!
//! Each collection is rendered as one carousel. The [`CarouselDeck`] owns the
//! group sequences and runs site search over them; every [`CarouselWidget`]
//! listens on the [`EventBus`](crate::bus::EventBus) and re-derives its local
//! position when its group is reordered or the viewer moves.
//!
//! ```text
//! site search ──▶ CarouselDeck ──Reorder──▶ EventBus ──▶ CarouselWidget(s)
//! Viewer ────────────────────PositionSync──▶ EventBus ──▶ CarouselWidget(s)
//! ```

pub mod deck;
pub mod widget;

pub use deck::{CarouselDeck, SharedTrack};
pub use widget::{CarouselWidget, SlideState, TrackGeometry, DEFAULT_GAP};
