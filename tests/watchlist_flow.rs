//! Drives the plugin's event handler from typing a query to a persisted
//! watched entry, with canned OMDb payloads standing in for the network.

use popcorn::app::{Focus, Key};
use popcorn::fetch::{FetchRequest, FetchResponse, RequestKind};
use popcorn::storage::JsonFileStore;
use popcorn::ui::{DetailsView, RatingView, ResultsView, SidePaneView};
use popcorn::worker::{PopcornWorker, WorkerMessage, WorkerResponse};
use popcorn::{handle_event, initialize, Action, AppState, Config, Event};

const SEARCH_BODY: &str = r#"{
    "Search": [
        {"Title": "Inception", "Year": "2010", "imdbID": "tt1375666", "Type": "movie", "Poster": "https://m.media-amazon.com/inception.jpg"},
        {"Title": "Inception: The Cobol Job", "Year": "2010", "imdbID": "tt5295894", "Type": "movie", "Poster": "N/A"}
    ],
    "totalResults": "2",
    "Response": "True"
}"#;

const DETAILS_BODY: &str = r#"{
    "Title": "Inception", "Year": "2010", "Released": "16 Jul 2010", "Runtime": "148 min",
    "Genre": "Action, Adventure, Sci-Fi", "Director": "Christopher Nolan",
    "Actors": "Leonardo DiCaprio, Joseph Gordon-Levitt, Elliot Page",
    "Plot": "A thief who steals corporate secrets through the use of dream-sharing technology.",
    "Poster": "https://m.media-amazon.com/inception.jpg", "imdbRating": "8.8",
    "imdbID": "tt1375666", "Response": "True"
}"#;

const NOT_FOUND_BODY: &str = r#"{"Response": "False", "Error": "Movie not found!"}"#;

fn state() -> AppState {
    initialize(&Config {
        api_key: "test-key".to_string(),
        ..Default::default()
    })
}

fn send(state: &mut AppState, event: Event) -> Vec<Action> {
    handle_event(state, &event).unwrap().1
}

fn press(state: &mut AppState, key: Key) -> Vec<Action> {
    send(state, Event::Key(key))
}

fn type_text(state: &mut AppState, text: &str) -> Vec<Action> {
    text.chars().flat_map(|c| press(state, Key::Char(c))).collect()
}

fn requests(actions: &[Action]) -> Vec<FetchRequest> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::WebRequest(request) => Some(request.clone()),
            _ => None,
        })
        .collect()
}

fn titles(actions: &[Action]) -> Vec<String> {
    actions
        .iter()
        .filter_map(|action| match action {
            Action::SetPaneTitle(title) => Some(title.clone()),
            _ => None,
        })
        .collect()
}

fn respond(request: &FetchRequest, status: u16, body: &str) -> Event {
    let response = FetchResponse::from_context(status, body.as_bytes().to_vec(), &request.context()).unwrap();
    Event::WebResponse(response)
}

fn result_titles(state: &AppState) -> Vec<String> {
    match state.compute_viewmodel(40, 120).results {
        ResultsView::Items(items) => items.into_iter().map(|item| item.title).collect(),
        other => panic!("expected result items, got {other:?}"),
    }
}

#[test]
fn search_rate_and_persist_a_movie() {
    let dir = tempfile::tempdir().unwrap();
    let mut worker = PopcornWorker::with_store(Box::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap()));
    let mut state = state();

    let startup = state.startup_actions();
    let Some(Action::PostToWorker(load)) = startup.first() else {
        panic!("expected load request first, got {startup:?}");
    };
    let loaded = worker.handle_message(load.clone());
    send(&mut state, Event::WorkerResponse(loaded));
    assert!(state.watched_loaded);

    let typed = requests(&type_text(&mut state, "inception"));
    assert_eq!(typed.len(), 7, "one request per keystroke from the third character on");
    assert!(typed.iter().all(|r| r.kind == RequestKind::Search));

    // an older response arriving late is ignored
    let (render, _) = handle_event(&mut state, &respond(&typed[0], 200, SEARCH_BODY)).unwrap();
    assert!(!render);
    assert!(state.search.is_loading());

    let latest = typed.last().unwrap();
    send(&mut state, respond(latest, 200, SEARCH_BODY));
    assert_eq!(result_titles(&state), vec!["Inception", "Inception: The Cobol Job"]);
    assert_eq!(state.compute_viewmodel(40, 120).nav.result_count, 2);

    press(&mut state, Key::Tab);
    assert_eq!(state.focus, Focus::Results);
    let opened = press(&mut state, Key::Char(' '));
    let details_request = requests(&opened).pop().unwrap();
    assert_eq!(details_request.kind, RequestKind::Details);
    assert!(details_request.url.contains("i=tt1375666"));

    let loaded = send(&mut state, respond(&details_request, 200, DETAILS_BODY));
    assert_eq!(titles(&loaded), vec!["Movie | Inception"]);

    press(&mut state, Key::Tab);
    assert_eq!(state.focus, Focus::SidePane);
    press(&mut state, Key::Char('5'));
    press(&mut state, Key::Char('7'));
    press(&mut state, Key::Char('7'));

    let confirmed = press(&mut state, Key::Char('a'));
    assert_eq!(titles(&confirmed), vec!["usePopcorn"]);
    let Some(Action::PostToWorker(save @ WorkerMessage::SaveWatched { entries, .. })) =
        confirmed.iter().find(|a| matches!(a, Action::PostToWorker(_)))
    else {
        panic!("expected a save, got {confirmed:?}");
    };
    let entry = &entries.entries()[0];
    assert_eq!(entry.user_rating.get(), 7);
    assert_eq!(entry.rating_revision_count, 2);
    assert_eq!(entry.runtime_minutes, Some(148));
    assert_eq!(entry.external_rating, Some(8.8));

    assert_eq!(worker.handle_message(save.clone()), WorkerResponse::WatchedSaved { count: 1 });

    let mut reopened = PopcornWorker::with_store(Box::new(JsonFileStore::new(dir.path().to_path_buf()).unwrap()));
    match reopened.handle_message(WorkerMessage::load_watched("watchedList".to_string())) {
        WorkerResponse::WatchedLoaded { entries } => {
            assert_eq!(entries.len(), 1);
            assert_eq!(entries.entries()[0].id, "tt1375666");
        }
        other => panic!("expected stored list, got {other:?}"),
    }
}

#[test]
fn watched_title_shows_read_only_rating() {
    let mut state = state();
    send(&mut state, Event::WorkerResponse(WorkerResponse::WatchedLoaded {
        entries: Default::default(),
    }));

    let request = requests(&send(&mut state, Event::SelectMovie("tt1375666".to_string()))).remove(0);
    send(&mut state, respond(&request, 200, DETAILS_BODY));
    state.focus = Focus::SidePane;
    press(&mut state, Key::Char('9'));
    press(&mut state, Key::Char('a'));
    assert_eq!(state.watched.len(), 1);

    let request = requests(&send(&mut state, Event::SelectMovie("tt1375666".to_string()))).remove(0);
    send(&mut state, respond(&request, 200, DETAILS_BODY));

    press(&mut state, Key::Char('3'));
    match state.compute_viewmodel(40, 120).side {
        SidePaneView::Details(DetailsView::Loaded { rating, .. }) => assert_eq!(rating, RatingView::ReadOnly(9)),
        other => panic!("expected loaded details, got {other:?}"),
    }
    assert!(press(&mut state, Key::Char('a')).is_empty());
    assert_eq!(state.watched.len(), 1);
}

#[test]
fn failures_surface_as_messages_and_keep_results() {
    let mut state = state();

    let request = requests(&type_text(&mut state, "inc")).remove(0);
    send(&mut state, respond(&request, 200, SEARCH_BODY));
    assert_eq!(result_titles(&state).len(), 2);

    let request = requests(&press(&mut state, Key::Char('x'))).remove(0);
    send(&mut state, respond(&request, 503, ""));
    assert_eq!(
        state.compute_viewmodel(40, 120).results,
        ResultsView::Error("Connection Lost...".to_string())
    );
    assert_eq!(state.search.results().len(), 2);

    let request = requests(&press(&mut state, Key::Char('z'))).remove(0);
    send(&mut state, respond(&request, 200, NOT_FOUND_BODY));
    assert_eq!(
        state.compute_viewmodel(40, 120).results,
        ResultsView::Error("Movies not found!".to_string())
    );
}

#[test]
fn enter_outside_search_box_starts_over() {
    let mut state = state();
    let request = requests(&type_text(&mut state, "alien")).pop().unwrap();
    send(&mut state, respond(&request, 200, SEARCH_BODY));

    press(&mut state, Key::Escape);
    assert_eq!(state.focus, Focus::Results);

    let actions = press(&mut state, Key::Enter);
    assert!(requests(&actions).is_empty());
    assert_eq!(state.focus, Focus::SearchInput);
    assert!(state.query.is_empty());
    assert!(state.search.results().is_empty());
}
