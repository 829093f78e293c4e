//! Application state: startup config plus the signals the UI renders from.

use std::sync::Arc;

use charscope_core::{Config, HttpLookup, SearchController, SearchHandle, SearchSnapshot};
use dioxus::prelude::*;

/// Everything needed to start a search session: created once at startup.
pub struct AppState {
    pub config: Config,
}

impl AppState {
    /// Load `.charscope.toml` from the current working directory, if any.
    pub fn from_cwd() -> Self {
        let config = match std::env::current_dir() {
            Ok(cwd) => Config::load(&cwd),
            Err(_) => Config::default(),
        };
        AppState { config }
    }

    /// Start the search controller. It stops when the last handle is dropped.
    pub fn spawn_search(&self) -> SearchHandle {
        let lookup = Arc::new(HttpLookup::new(&self.config.api));
        let (handle, _task) = SearchController::new(lookup, self.config.search.clone()).spawn();
        handle
    }
}

// ---------------------------------------------------------------------------
// Global signals
// ---------------------------------------------------------------------------

/// Text in the search box, updated on every keystroke
pub static QUERY: GlobalSignal<String> = Signal::global(String::new);

/// Latest snapshot published by the search controller
pub static SNAPSHOT: GlobalSignal<SearchSnapshot> = Signal::global(SearchSnapshot::default);
