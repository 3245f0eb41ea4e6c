//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the Popcorn library and Zellij: it maps
//! host events to library events, runs the handler, and turns the returned
//! actions into host calls.
//!
//! ```text
//! ┌─────────────────────────┐
//! │   Zellij Main Thread    │
//! │  ┌──────────────────┐   │        web_request
//! │  │  State (plugin)  │───┼──────────────────────▶ OMDb
//! │  └──────────────────┘   │◀─── WebRequestResult ──┘
//! │          │ IPC          │
//! │          ▼              │
//! │  ┌──────────────────┐   │
//! │  │  PopcornWorker   │   │  ← watched list on disk
//! │  └──────────────────┘   │
//! └─────────────────────────┘
//! ```
//!
//! # Event Mapping
//!
//! - `Key` → `Event::Key` (Shift+Tab becomes `Key::BackTab`)
//! - `WebRequestResult` → `Event::WebResponse`, routed by its request context
//! - `CustomMessage` from the worker → `Event::WorkerResponse`
//! - `Visible` → `Event::Visibility`
//!
//! # Actions
//!
//! - `WebRequest` → `web_request` with the request id and kind as context
//! - `PostToWorker` → `post_message_to`
//! - `SetPaneTitle` → `rename_plugin_pane`
//! - `CloseFocus` → `hide_self`

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;
use zellij_tile::shim::post_message_to;

use popcorn::app::Key;
use popcorn::fetch::{FetchRequest, FetchResponse};
use popcorn::worker::{PopcornWorker, WorkerMessage, WorkerResponse, WORKER_NAME};
use popcorn::{handle_event, Action, Config, Event};

register_plugin!(State);
register_worker!(PopcornWorker, popcorn_worker, POPCORN_WORKER);

struct State {
    app: popcorn::AppState,

    /// Web requests and pane renames are only possible once the user has granted permissions.
    permissions_granted: bool,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: popcorn::initialize(&Config::default()),
            permissions_granted: false,
        }
    }
}

impl ZellijPlugin for State {
    /// Parses configuration, requests permissions, and subscribes to events.
    ///
    /// The stored watched list is requested once permissions are granted.
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        popcorn::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(storage_key = %config.storage_key, theme = ?config.theme_name, "parsed configuration");
        self.app = popcorn::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ReadApplicationState,
            PermissionType::ChangeApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::CustomMessage,
            EventType::PermissionRequestResult,
            EventType::Visible,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match Self::map_key_event(key) {
                Some(key) => Event::Key(key),
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match FetchResponse::from_context(status, body, &context) {
                    Some(response) => Event::WebResponse(response),
                    None => {
                        tracing::debug!(status = status, "ignoring web response without popcorn context");
                        return false;
                    }
                }
            }
            zellij_tile::prelude::Event::CustomMessage(message, payload) => {
                match Self::map_custom_message_event(&message, &payload) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Visible(visible) => Event::Visibility(visible),
            zellij_tile::prelude::Event::PermissionRequestResult(permissions) => {
                return self.handle_permission_result(permissions);
            }
            _ => return false,
        };

        match handle_event(&mut self.app, &our_event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render = should_render, "event handled");
                for action in actions {
                    self.execute_action(&action);
                }
                should_render
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn render(&mut self, rows: usize, cols: usize) {
        popcorn::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::CustomMessage(msg, _) => format!("CustomMessage({msg})"),
            zellij_tile::prelude::Event::Visible(visible) => format!("Visible({visible})"),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    /// Maps a host key to a library key. Keys with Ctrl or Alt are not used.
    fn map_key_event(key: &KeyWithModifier) -> Option<Key> {
        if key.has_modifiers(&[KeyModifier::Ctrl]) || key.has_modifiers(&[KeyModifier::Alt]) {
            return None;
        }

        Some(match key.bare_key {
            BareKey::Tab if key.has_modifiers(&[KeyModifier::Shift]) => Key::BackTab,
            BareKey::Tab => Key::Tab,
            BareKey::Enter => Key::Enter,
            BareKey::Esc => Key::Escape,
            BareKey::Backspace => Key::Backspace,
            BareKey::Up => Key::Up,
            BareKey::Down => Key::Down,
            BareKey::Left => Key::Left,
            BareKey::Right => Key::Right,
            BareKey::Char(c) => Key::Char(c),
            _ => return None,
        })
    }

    /// Loads the stored list and issues any search typed while the dialog was open.
    fn handle_permission_result(&mut self, permissions: PermissionStatus) -> bool {
        match permissions {
            PermissionStatus::Granted => {
                tracing::debug!("permissions granted - loading watched list");
                self.permissions_granted = true;

                let mut actions = self.app.startup_actions();
                actions.extend(self.app.rerun_search());
                for action in actions {
                    self.execute_action(&action);
                }
                true
            }
            PermissionStatus::Denied => {
                tracing::warn!("permissions denied - searching and pane titles unavailable");
                self.app.deny_web_access();
                true
            }
        }
    }

    fn map_custom_message_event(message: &str, payload: &str) -> Option<Event> {
        if message != WORKER_NAME {
            tracing::debug!(message_name = %message, "ignoring custom message with unknown name");
            return None;
        }

        match serde_json::from_str::<WorkerResponse>(payload) {
            Ok(response) => Some(Event::WorkerResponse(response)),
            Err(e) => {
                tracing::warn!(error = %e, "failed to deserialize worker response");
                None
            }
        }
    }

    fn post_worker_message(message: &WorkerMessage) {
        match serde_json::to_string(message) {
            Ok(payload) => {
                tracing::debug!(payload_len = payload.len(), "posting message to worker");
                post_message_to(PluginMessage {
                    worker_name: Some(WORKER_NAME.to_string()),
                    name: WORKER_NAME.to_string(),
                    payload,
                });
            }
            Err(e) => tracing::warn!(error = %e, "failed to serialize worker message"),
        }
    }

    fn send_web_request(request: &FetchRequest) {
        tracing::debug!(request_id = request.id, kind = %request.kind, "issuing web request");
        web_request(&request.url, HttpVerb::Get, BTreeMap::new(), vec![], request.context());
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&self, action: &Action) {
        match action {
            Action::CloseFocus => {
                tracing::debug!("hiding plugin");
                hide_self();
            }
            Action::PostToWorker(message) => Self::post_worker_message(message),
            Action::WebRequest(request) => {
                if self.permissions_granted {
                    Self::send_web_request(request);
                } else {
                    tracing::debug!(request_id = request.id, "web request deferred until permissions are granted");
                }
            }
            Action::SetPaneTitle(title) => {
                if self.permissions_granted {
                    rename_plugin_pane(get_plugin_ids().plugin_id, title);
                }
            }
        }
    }
}
