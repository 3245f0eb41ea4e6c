//! Application layer coordinating state, events, and actions.
//!
//! Sits between the plugin runtime (main.rs) and the domain, fetch, and worker
//! layers. Data flows one way:
//!
//! ```text
//! Key / WebRequestResult / CustomMessage → Event → handle_event → AppState → Vec<Action>
//!                                                       ↑                        ↓
//!                                                       └──── host & worker ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`bindings`]: Global key bindings mounted and unmounted by owners
//! - [`handler`]: Event processing and the per-focus key map
//! - [`modes`]: Focus and collapsible box state
//! - [`selection`]: Details view selection and the rating workflow
//! - [`state`]: Central application state and view model computation
//!
//! # Example
//!
//! ```rust
//! use popcorn::app::{handle_event, AppState, Event};
//! use popcorn::omdb::OmdbEndpoint;
//! use popcorn::ui::Theme;
//!
//! let mut state = AppState::new(OmdbEndpoint::default(), "watchedList", Theme::default());
//! let (render, _actions) = handle_event(&mut state, &Event::MoveDown)?;
//! assert!(render);
//! # Ok::<(), popcorn::domain::PopcornError>(())
//! ```

pub mod actions;
pub mod bindings;
pub mod handler;
pub mod modes;
pub mod selection;
pub mod state;

pub use actions::Action;
pub use bindings::{BindingGuard, BindingOwner, Key, KeyBindings};
pub use handler::{handle_event, Event};
pub use modes::{BoxState, Focus, PaneBox};
pub use selection::{SelectOutcome, Selection};
pub use state::{AppState, APP_TITLE};
