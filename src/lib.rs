//! Popcorn: a Zellij plugin for searching OMDb and keeping a rated watchlist.
//!
//! - Search-as-you-type over OMDb titles, starting at three characters
//! - A details pane with plot, cast, and a 1–10 star rating picker
//! - A watched list with averages, persisted as JSON by a background worker
//! - Catppuccin themes or a custom TOML theme

#![allow(clippy::multiple_crate_versions)]

//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │
//! │  - Event handling and key bindings                  │
//! │  - Selection and rating workflow                    │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ UI Layer      │   │ Fetch Layer   │   │ Worker Layer  │
//! │ (ui/)         │   │ (fetch/,omdb/)│   │ (worker/)     │
//! │ - Rendering   │   │ - Requests    │   │ - Load/save   │
//! │ - Theming     │   │ - Cancelling  │   │ - IPC bridge  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!                                                  │
//!                                         ┌───────────────┐
//!                                         │ Storage Layer │
//!                                         │ (storage/)    │
//!                                         └───────────────┘
//! ```
//!
//! # Modules
//!
//! - [`app`]: Application state machine with event/action model
//! - [`domain`]: Movies, ratings, watched entries, and errors
//! - [`omdb`]: OMDb URLs and payload parsing
//! - [`fetch`]: Search and details fetchers with cancellation
//! - [`storage`]: Key-value stores and the persisted list
//! - [`worker`]: Background worker owning the watched list on disk
//! - [`ui`]: Terminal rendering with theme support
//! - [`infrastructure`]: Platform paths
//! - `observability`: OpenTelemetry tracing to a local file
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/popcorn.wasm" {
//!         api_key "your-omdb-key"
//!         storage_key "watchedList"
//!         theme "catppuccin-mocha"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! # Example
//!
//! ```rust
//! use popcorn::{handle_event, initialize, Action, Config, Event};
//! use popcorn::app::Key;
//!
//! let config = Config {
//!     api_key: "k3y".to_string(),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let mut requests = 0;
//! for c in "alien".chars() {
//!     let (_render, actions) = handle_event(&mut state, &Event::Key(Key::Char(c)))?;
//!     requests += actions.iter().filter(|a| matches!(a, Action::WebRequest(_))).count();
//! }
//! assert_eq!(requests, 3);
//! # Ok::<(), popcorn::PopcornError>(())
//! ```

pub mod app;
pub mod domain;
pub mod fetch;
pub mod infrastructure;
pub mod omdb;
pub mod storage;
pub mod worker;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppState, Event};
pub use domain::{MovieDetails, MovieSummary, PopcornError, Rating, Result, WatchedEntry};
pub use ui::Theme;

use omdb::{OmdbEndpoint, DEFAULT_API_URL};
use std::collections::BTreeMap;
use storage::DEFAULT_STORAGE_KEY;

/// Plugin configuration parsed from the Zellij layout.
///
/// ```kdl
/// plugin location="file:/path/to/popcorn.wasm" {
///     api_key "your-omdb-key"
///     api_url "https://www.omdbapi.com/"
///     storage_key "watchedList"
///     theme "catppuccin-latte"
///     theme_file "/path/to/theme.toml"
///     trace_level "debug"
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// OMDb API key sent with every request.
    pub api_key: String,

    /// OMDb endpoint root. Default: `https://www.omdbapi.com/`
    pub api_url: String,

    /// Key under which the watched list is stored. Default: `watchedList`
    pub storage_key: String,

    /// Built-in theme name. Ignored if `theme_file` is set.
    pub theme_name: Option<String>,

    /// Path to a custom TOML theme file. See [`ui::theme`] for format.
    pub theme_file: Option<String>,

    /// Tracing filter such as `info` or `popcorn=debug`. Default: `info`
    pub trace_level: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            theme_name: None,
            theme_file: None,
            trace_level: None,
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// Blank values fall back to the defaults.
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use popcorn::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("api_key".to_string(), "k3y".to_string());
    /// map.insert("storage_key".to_string(), "  ".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.api_key, "k3y");
    /// assert_eq!(config.storage_key, "watchedList");
    /// assert_eq!(config.api_url, "https://www.omdbapi.com/");
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| {
            config
                .get(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        Self {
            api_key: get("api_key").unwrap_or(defaults.api_key),
            api_url: get("api_url").unwrap_or(defaults.api_url),
            storage_key: get("storage_key").unwrap_or(defaults.storage_key),
            theme_name: get("theme"),
            theme_file: get("theme_file"),
            trace_level: get("trace_level"),
        }
    }

    /// Checks the values OMDb requests depend on.
    ///
    /// # Errors
    ///
    /// Returns [`PopcornError::Config`] for a missing `api_key` or an
    /// `api_url` that is not http(s).
    pub fn validate(&self) -> Result<()> {
        if self.api_key.is_empty() {
            return Err(PopcornError::Config("api_key is not set, OMDb requests will be rejected".to_string()));
        }
        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(PopcornError::Config(format!("api_url must be http(s): {}", self.api_url)));
        }
        Ok(())
    }

    /// Endpoint built from `api_url` and `api_key`.
    #[must_use]
    pub fn endpoint(&self) -> OmdbEndpoint {
        OmdbEndpoint::new(self.api_url.clone(), self.api_key.clone())
    }

    /// Resolves the theme: `theme_file` first, then `theme`, then the default.
    #[must_use]
    pub fn resolve_theme(&self) -> Theme {
        if let Some(theme_file) = &self.theme_file {
            match Theme::from_file(infrastructure::expand_tilde(theme_file)) {
                Ok(theme) => return theme,
                Err(e) => tracing::warn!(theme_file = %theme_file, error = %e, "failed to load theme file, using default"),
            }
        }

        self.theme_name.as_ref().map_or_else(Theme::default, |theme_name| {
            Theme::from_name(theme_name).unwrap_or_else(|| {
                tracing::warn!(theme_name = %theme_name, "unknown theme, using default");
                Theme::default()
            })
        })
    }
}

/// Builds the initial application state from configuration.
///
/// Tracing is not installed here; the plugin shim does that before calling.
#[must_use]
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(storage_key = %config.storage_key, api_url = %config.api_url, "initializing popcorn plugin");

    if let Err(e) = config.validate() {
        tracing::warn!(error = %e, "configuration problem");
    }

    AppState::new(config.endpoint(), config.storage_key.clone(), config.resolve_theme())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_theme_falls_back_to_default() {
        let config = Config {
            theme_name: Some("solarized".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_theme().name, "catppuccin-mocha");
    }

    #[test]
    fn unreadable_theme_file_falls_back_to_named_theme() {
        let config = Config {
            theme_name: Some("catppuccin-frappe".to_string()),
            theme_file: Some("/nonexistent/theme.toml".to_string()),
            ..Default::default()
        };
        assert_eq!(config.resolve_theme().name, "catppuccin-frappe");
    }

    #[test]
    fn validate_rejects_missing_key_and_bad_url() {
        assert!(matches!(Config::default().validate(), Err(PopcornError::Config(_))));

        let config = Config {
            api_key: "k3y".to_string(),
            api_url: "ftp://omdb".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(PopcornError::Config(msg)) if msg.contains("ftp://omdb")));

        let config = Config {
            api_key: "k3y".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn initialize_uses_configured_storage_key() {
        let config = Config {
            storage_key: "myMovies".to_string(),
            ..Default::default()
        };
        let state = initialize(&config);
        assert_eq!(state.storage_key, "myMovies");
        assert_eq!(state.theme.name, "catppuccin-mocha");
    }
}
