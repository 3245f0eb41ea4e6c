//! Event handling and state transition logic.
//!
//! Raw keys arrive as [`Event::Key`]. They are first offered to the global
//! [`KeyBindings`](super::bindings::KeyBindings); if no binding claims the key,
//! it is interpreted according to the current [`Focus`]. Either way the key
//! turns into one or more semantic events, which are handled recursively.
//!
//! After every top-level event the pane title is compared with what the state
//! calls for, and a `SetPaneTitle` action is appended if it changed.
//!
//! # Event Types
//!
//! - **Keys**: `Key`
//! - **Search box**: `Char`, `Backspace`, `FocusSearch`, `EditQuery`, `LeaveSearch`
//! - **Navigation**: `MoveDown`, `MoveUp`, `FocusNext`, `FocusPrevious`, `ToggleBox`
//! - **Details**: `ToggleHighlighted`, `SelectMovie`, `CloseDetails`,
//!   `SetRating`, `RatingUp`, `RatingDown`, `ConfirmRating`
//! - **Watched list**: `DeleteHighlighted`, `DeleteWatched`
//! - **System**: `Visibility`, `WebResponse`, `WorkerResponse`, `CloseFocus`

use super::bindings::{DispatchContext, Key};
use super::modes::Focus;
use crate::app::{Action, AppState};
use crate::domain::error::Result;
use crate::domain::Rating;
use crate::fetch::{FetchResponse, RequestKind};
use crate::worker::WorkerResponse;

/// Events triggered by user input, host notifications, or worker responses.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// A raw key press, resolved through bindings and focus.
    Key(Key),

    /// Appends a character to the query.
    Char(char),
    /// Removes the last character of the query.
    Backspace,
    /// Focuses the search box and clears the query.
    FocusSearch,
    /// Focuses the search box keeping the query.
    EditQuery,
    /// Moves focus from the search box to the result list.
    LeaveSearch,

    MoveDown,
    MoveUp,
    FocusNext,
    FocusPrevious,
    /// Opens or collapses the box that has focus.
    ToggleBox,

    /// Selects (or deselects) the highlighted search result.
    ToggleHighlighted,
    /// Selects a title by id; selecting the open title closes it.
    SelectMovie(String),
    CloseDetails,
    /// Sets the pending rating; `0` means ten stars.
    SetRating(u8),
    RatingUp,
    RatingDown,
    /// Adds the viewed title with its pending rating to the watched list.
    ConfirmRating,

    /// Deletes the highlighted watched entry.
    DeleteHighlighted,
    /// Deletes every watched entry with this id.
    DeleteWatched(String),

    /// Hides the plugin pane.
    CloseFocus,

    /// The plugin pane became visible (`true`) or hidden (`false`).
    Visibility(bool),

    /// An HTTP response for one of our requests.
    WebResponse(FetchResponse),

    /// A response from the storage worker.
    WorkerResponse(WorkerResponse),
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(should_render, actions)`. Actions are executed in order by the plugin runtime.
///
/// # Errors
///
/// Reserved for handler failures; the current event set always succeeds.
///
/// # Example
///
/// ```rust
/// use popcorn::app::{handle_event, Action, AppState, Event};
/// use popcorn::app::bindings::Key;
/// use popcorn::omdb::OmdbEndpoint;
/// use popcorn::ui::Theme;
///
/// let mut state = AppState::new(OmdbEndpoint::default(), "watchedList", Theme::default());
/// for c in "matrix".chars() {
///     handle_event(&mut state, &Event::Key(Key::Char(c)))?;
/// }
/// assert_eq!(state.query, "matrix");
/// # Ok::<(), popcorn::domain::PopcornError>(())
/// ```
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = event_name(event)).entered();

    let (render, mut actions) = dispatch(state, event)?;

    if let Some(title) = state.take_title_change() {
        tracing::debug!(?title, "pane title changed");
        actions.push(title);
    }

    Ok((render, actions))
}

#[allow(clippy::too_many_lines)]
fn dispatch(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    match event {
        Event::Key(key) => {
            let mut render = false;
            let mut actions = vec![];
            for mapped in map_key(state, *key) {
                let (r, a) = dispatch(state, &mapped)?;
                render |= r;
                actions.extend(a);
            }
            Ok((render, actions))
        }
        Event::Char(c) => {
            let mut query = state.query.clone();
            query.push(*c);
            tracing::trace!(query_len = query.len(), "query extended");
            Ok((true, state.set_query(query)))
        }
        Event::Backspace => {
            if state.query.is_empty() {
                return Ok((false, vec![]));
            }
            let mut query = state.query.clone();
            query.pop();
            Ok((true, state.set_query(query)))
        }
        Event::FocusSearch => {
            tracing::debug!("focusing search box and clearing query");
            state.focus = Focus::SearchInput;
            Ok((true, state.set_query(String::new())))
        }
        Event::EditQuery => {
            state.focus = Focus::SearchInput;
            Ok((true, vec![]))
        }
        Event::LeaveSearch => {
            state.focus = Focus::Results;
            Ok((true, vec![]))
        }
        Event::MoveDown => {
            state.move_down();
            Ok((true, vec![]))
        }
        Event::MoveUp => {
            state.move_up();
            Ok((true, vec![]))
        }
        Event::FocusNext => {
            state.focus = state.focus.next();
            Ok((true, vec![]))
        }
        Event::FocusPrevious => {
            state.focus = state.focus.previous();
            Ok((true, vec![]))
        }
        Event::ToggleBox => {
            let Some(pane) = state.focused_box() else {
                return Ok((false, vec![]));
            };
            state.boxes.toggle(pane);
            tracing::debug!(?pane, open = state.boxes.is_open(pane), "box toggled");
            Ok((true, vec![]))
        }
        Event::ToggleHighlighted => {
            let Some(movie_id) = state.highlighted_result_id() else {
                return Ok((false, vec![]));
            };
            dispatch(state, &Event::SelectMovie(movie_id))
        }
        Event::SelectMovie(movie_id) => {
            tracing::debug!(movie_id = %movie_id, "movie selected");
            Ok((true, state.select_movie(movie_id)))
        }
        Event::CloseDetails => Ok((state.close_details(), vec![])),
        Event::SetRating(value) => {
            let stars = if *value == 0 { 10 } else { *value };
            let Some(rating) = Rating::new(stars) else {
                return Ok((false, vec![]));
            };
            Ok((state.set_pending_rating(rating), vec![]))
        }
        Event::RatingUp => Ok((state.step_pending_rating(true), vec![])),
        Event::RatingDown => Ok((state.step_pending_rating(false), vec![])),
        Event::ConfirmRating => {
            let actions = state.confirm_rating();
            Ok((true, actions))
        }
        Event::DeleteHighlighted => {
            let Some(movie_id) = state.highlighted_watched_id() else {
                return Ok((false, vec![]));
            };
            dispatch(state, &Event::DeleteWatched(movie_id))
        }
        Event::DeleteWatched(movie_id) => {
            tracing::debug!(movie_id = %movie_id, "deleting watched entry");
            let actions = state.delete_watched(movie_id);
            Ok((true, actions))
        }
        Event::CloseFocus => Ok((false, vec![Action::CloseFocus])),
        Event::Visibility(visible) => {
            if *visible == state.visible {
                return Ok((false, vec![]));
            }
            state.visible = *visible;

            if *visible {
                tracing::debug!("plugin shown, re-running current query");
                Ok((true, state.rerun_search()))
            } else {
                tracing::debug!("plugin hidden, cancelling in-flight search");
                state.search.cancel();
                Ok((false, vec![]))
            }
        }
        Event::WebResponse(response) => {
            let committed = match response.kind {
                RequestKind::Search => {
                    let committed = state.search.complete(response);
                    state.clamp_results_index();
                    committed
                }
                RequestKind::Details => state.details.complete(response),
            };
            Ok((committed, vec![]))
        }
        Event::WorkerResponse(response) => match response {
            WorkerResponse::WatchedLoaded { entries } => {
                tracing::debug!(count = entries.len(), "watched list loaded");
                let actions = state.apply_loaded(entries.clone());
                Ok((true, actions))
            }
            WorkerResponse::WatchedSaved { count } => {
                tracing::debug!(count = count, "watched list saved");
                if state.status.take().is_some() {
                    return Ok((true, vec![]));
                }
                Ok((false, vec![]))
            }
            WorkerResponse::Error { message } => {
                tracing::error!("Worker error: {}", message);
                state.status = Some(message.clone());
                Ok((true, vec![]))
            }
        },
    }
}

/// Turns a key into semantic events: global bindings first, then the focused area.
fn map_key(state: &AppState, key: Key) -> Vec<Event> {
    let ctx = DispatchContext {
        search_focused: state.focus == Focus::SearchInput,
    };

    let bound = state.bindings.dispatch(key, ctx);
    if !bound.is_empty() {
        return bound;
    }

    if state.focus == Focus::SearchInput {
        return match key {
            Key::Char(c) => vec![Event::Char(c)],
            Key::Backspace => vec![Event::Backspace],
            Key::Tab | Key::Down | Key::Enter | Key::Escape => vec![Event::LeaveSearch],
            Key::BackTab => vec![Event::FocusPrevious],
            _ => vec![],
        };
    }

    let focused = match (state.focus, state.selection.is_viewing()) {
        (Focus::Results, _) => match key {
            Key::Char('j') | Key::Down => Some(Event::MoveDown),
            Key::Char('k') | Key::Up => Some(Event::MoveUp),
            Key::Char(' ' | 'o') | Key::Right => Some(Event::ToggleHighlighted),
            _ => None,
        },
        (Focus::SidePane, true) => match key {
            Key::Char(c @ '0'..='9') => c.to_digit(10).and_then(|d| u8::try_from(d).ok()).map(Event::SetRating),
            Key::Char('h') | Key::Left => Some(Event::RatingDown),
            Key::Char('l') | Key::Right => Some(Event::RatingUp),
            Key::Char('a') => Some(Event::ConfirmRating),
            _ => None,
        },
        (Focus::SidePane, false) => match key {
            Key::Char('j') | Key::Down => Some(Event::MoveDown),
            Key::Char('k') | Key::Up => Some(Event::MoveUp),
            Key::Char('d' | 'x') => Some(Event::DeleteHighlighted),
            _ => None,
        },
        (Focus::SearchInput, _) => None,
    };

    if let Some(event) = focused {
        return vec![event];
    }

    match key {
        Key::Tab => vec![Event::FocusNext],
        Key::BackTab => vec![Event::FocusPrevious],
        Key::Char('t') => vec![Event::ToggleBox],
        Key::Char('/') => vec![Event::EditQuery],
        Key::Char('q') => vec![Event::CloseFocus],
        _ => vec![],
    }
}

/// Short event name for span fields, without payloads such as response bodies.
const fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Key(_) => "key",
        Event::Char(_) => "char",
        Event::Backspace => "backspace",
        Event::FocusSearch => "focus_search",
        Event::EditQuery => "edit_query",
        Event::LeaveSearch => "leave_search",
        Event::MoveDown => "move_down",
        Event::MoveUp => "move_up",
        Event::FocusNext => "focus_next",
        Event::FocusPrevious => "focus_previous",
        Event::ToggleBox => "toggle_box",
        Event::ToggleHighlighted => "toggle_highlighted",
        Event::SelectMovie(_) => "select_movie",
        Event::CloseDetails => "close_details",
        Event::SetRating(_) => "set_rating",
        Event::RatingUp => "rating_up",
        Event::RatingDown => "rating_down",
        Event::ConfirmRating => "confirm_rating",
        Event::DeleteHighlighted => "delete_highlighted",
        Event::DeleteWatched(_) => "delete_watched",
        Event::CloseFocus => "close_focus",
        Event::Visibility(_) => "visibility",
        Event::WebResponse(_) => "web_response",
        Event::WorkerResponse(_) => "worker_response",
    }
}
