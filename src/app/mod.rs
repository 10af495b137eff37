//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between the host (a browser bridge, or the terminal shim in
//! `main.rs`) and the gallery core. It owns the [`Gallery`] context and the
//! event loop contract.
//!
//! # Architecture
//!
//! ```text
//! Host Input → Event → handle_event → Gallery mutations → Actions → Host
//!                                         │
//!                                         └──▶ EventBus ──▶ Carousel widgets
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands for the host
//! - [`handler`]: Event processing
//! - [`modes`]: Keyboard focus modes
//! - [`state`]: The gallery context object and view model computation
//!
//! # Example
//!
//! ```rust
//! use std::rc::Rc;
//! use vitrine::app::{handle_event, Event, Gallery};
//! use vitrine::bus::EventBus;
//! use vitrine::lazy::LazyLoadScheduler;
//! use vitrine::Theme;
//!
//! let mut gallery = Gallery::new(Rc::new(EventBus::new()), LazyLoadScheduler::immediate(), Theme::default());
//! let (_render, actions) = handle_event(&mut gallery, &Event::FragmentChanged("#dusk".into()))?;
//! assert!(actions.is_empty());
//! # Ok::<(), vitrine::GalleryError>(())
//! ```

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputFocus, SearchScope};
pub use state::{Gallery, GRID_GROUP};
