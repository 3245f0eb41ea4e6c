//! User interface rendering layer.
//!
//! ```text
//! AppState → compute_viewmodel → UIViewModel → render → ANSI Output
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing renderable UI state
//! - [`renderer`]: Top-level rendering coordinator
//! - [`components`]: Nav bar, boxes, lists, details, and footer renderers
//! - [`helpers`]: Cursor positioning, truncation, wrapping, and match highlighting
//! - [`theme`]: Color schemes and ANSI escape sequence generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::Theme;
pub use viewmodel::{
    DetailsView, FooterInfo, ListWindow, NavBarInfo, RatingView, ResultItem, ResultsView, SidePaneView,
    UIViewModel, WatchedItem, WatchedView,
};
