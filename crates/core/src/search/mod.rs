//! Search state machine.
//!
//! [`SearchState`] holds the four pieces of session state (raw query, debounced
//! query, loading flag, result list) and changes only through [`SearchState::apply`].
//! Each event may hand back a [`Command`] for the driver to carry out: restart the
//! debounce timer, begin a fetch, or run a lookup. The driver lives in
//! [`controller`]; renderers read [`view`].

pub mod controller;
pub mod view;

pub use controller::{SearchController, SearchHandle};
pub use view::{CharacterRow, SearchView};

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::LookupError;
use crate::types::{Character, CharacterPage, SearchSnapshot};

/// Decides whether a settled term is worth a lookup.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FetchGate {
    /// Fetch only for a non-empty term. Whitespace counts as content.
    #[default]
    NonEmpty,
    /// Fetch for every settled term, including the empty one.
    Always,
}

impl FetchGate {
    pub fn allows(self, term: &str) -> bool {
        match self {
            FetchGate::NonEmpty => !term.is_empty(),
            FetchGate::Always => true,
        }
    }
}

/// Discrete inputs to the state machine.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// The user edited the text box.
    InputChanged(String),
    /// The debounce timer fired with this value.
    DebounceSettled(String),
    /// The driver is about to look up `term`.
    FetchStarted(String),
    FetchSucceeded { seq: u64, page: CharacterPage },
    FetchFailed { seq: u64, error: LookupError },
}

/// A lookup the driver must run. `seq` comes back with the outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub term: String,
}

/// Side effects requested by [`SearchState::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Restart the debounce timer with this value.
    Debounce(String),
    /// The gate passed; feed [`SearchEvent::FetchStarted`] back in.
    BeginFetch(String),
    /// Run the lookup and report back with the ticket's `seq`.
    Lookup(FetchTicket),
}

#[derive(Debug, Clone, Default)]
pub struct SearchState {
    query: String,
    debounced: Option<String>,
    loading: bool,
    results: Vec<Character>,
    gate: FetchGate,
    next_seq: u64,
    current: Option<u64>,
}

impl SearchState {
    pub fn new(gate: FetchGate) -> Self {
        Self { gate, ..Self::default() }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn debounced(&self) -> Option<&str> {
        self.debounced.as_deref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn results(&self) -> &[Character] {
        &self.results
    }

    pub fn gate(&self) -> FetchGate {
        self.gate
    }

    /// Sequence number of the fetch whose outcome is still awaited.
    pub fn current_fetch(&self) -> Option<u64> {
        self.current
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        SearchSnapshot {
            query: self.query.clone(),
            debounced: self.debounced.clone(),
            loading: self.loading,
            results: self.results.clone(),
            fetches: self.next_seq,
        }
    }

    pub fn apply(&mut self, event: SearchEvent) -> Option<Command> {
        match event {
            SearchEvent::InputChanged(text) => {
                self.query = text.clone();
                Some(Command::Debounce(text))
            }
            SearchEvent::DebounceSettled(term) => self.settle(term),
            SearchEvent::FetchStarted(term) => {
                self.next_seq += 1;
                let seq = self.next_seq;
                self.current = Some(seq);
                self.loading = true;
                self.results.clear();
                debug!(seq, term = term.as_str(), "Fetch started");
                Some(Command::Lookup(FetchTicket { seq, term }))
            }
            SearchEvent::FetchSucceeded { seq, page } => {
                if !self.is_current(seq) {
                    debug!(seq, "Ignoring stale fetch result");
                    return None;
                }
                debug!(seq, count = page.results.len(), "Fetch succeeded");
                self.current = None;
                self.loading = false;
                self.results = page.results;
                None
            }
            SearchEvent::FetchFailed { seq, error } => {
                if !self.is_current(seq) {
                    debug!(seq, "Ignoring stale fetch failure");
                    return None;
                }
                warn!(seq, "Character lookup failed: {error}");
                self.current = None;
                self.loading = false;
                self.results.clear();
                None
            }
        }
    }

    fn is_current(&self, seq: u64) -> bool {
        self.current == Some(seq)
    }

    /// Reaction rule: runs whenever the debounced term actually changes.
    fn settle(&mut self, term: String) -> Option<Command> {
        if self.debounced.as_deref() == Some(term.as_str()) {
            return None;
        }
        debug!(term = term.as_str(), "Debounced query changed");
        self.debounced = Some(term.clone());
        self.results.clear();
        // Whatever was in flight belongs to the old term.
        self.current = None;
        self.loading = false;

        if self.gate.allows(&term) {
            Some(Command::BeginFetch(term))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rick() -> CharacterPage {
        CharacterPage::from_results(vec![Character::new(1, "Rick Sanchez", "u1")])
    }

    /// Settle `term` and start its fetch, returning the ticket.
    fn settle_and_start(state: &mut SearchState, term: &str) -> FetchTicket {
        let cmd = state.apply(SearchEvent::DebounceSettled(term.into()));
        assert_eq!(cmd, Some(Command::BeginFetch(term.into())));
        match state.apply(SearchEvent::FetchStarted(term.into())) {
            Some(Command::Lookup(ticket)) => ticket,
            other => panic!("expected lookup, got {other:?}"),
        }
    }

    #[test]
    fn input_updates_query_and_restarts_debounce() {
        let mut state = SearchState::default();
        let cmd = state.apply(SearchEvent::InputChanged("ri".into()));
        assert_eq!(cmd, Some(Command::Debounce("ri".into())));
        assert_eq!(state.query(), "ri");
        assert_eq!(state.debounced(), None);
    }

    #[test]
    fn mount_settle_on_empty_counts_as_change() {
        let mut state = SearchState::new(FetchGate::Always);
        assert_eq!(
            state.apply(SearchEvent::DebounceSettled(String::new())),
            Some(Command::BeginFetch(String::new()))
        );
        assert_eq!(state.debounced(), Some(""));
    }

    #[test]
    fn non_empty_gate_skips_empty_term() {
        let mut state = SearchState::new(FetchGate::NonEmpty);
        assert_eq!(state.apply(SearchEvent::DebounceSettled(String::new())), None);
        assert!(!state.loading());
        assert!(state.results().is_empty());
    }

    #[test]
    fn whitespace_passes_non_empty_gate() {
        assert!(FetchGate::NonEmpty.allows(" "));
        assert!(!FetchGate::NonEmpty.allows(""));
        assert!(FetchGate::Always.allows(""));
    }

    #[test]
    fn success_fills_results_and_clears_loading() {
        let mut state = SearchState::default();
        let ticket = settle_and_start(&mut state, "rick");
        assert!(state.loading());
        assert_eq!(ticket.term, "rick");

        state.apply(SearchEvent::FetchSucceeded { seq: ticket.seq, page: rick() });
        assert!(!state.loading());
        assert_eq!(state.results(), rick().results.as_slice());
        assert_eq!(state.current_fetch(), None);
    }

    #[test]
    fn failure_clears_loading_and_leaves_list_empty() {
        let mut state = SearchState::default();
        let ticket = settle_and_start(&mut state, "rick");
        state.apply(SearchEvent::FetchFailed {
            seq: ticket.seq,
            error: LookupError::Network("connection refused".into()),
        });
        assert!(!state.loading());
        assert!(state.results().is_empty());
    }

    #[test]
    fn settling_same_term_does_not_refetch() {
        let mut state = SearchState::default();
        let ticket = settle_and_start(&mut state, "rick");
        state.apply(SearchEvent::FetchSucceeded { seq: ticket.seq, page: rick() });

        assert_eq!(state.apply(SearchEvent::DebounceSettled("rick".into())), None);
        assert_eq!(state.results().len(), 1, "results survive a no-op settle");
    }

    #[test]
    fn new_term_clears_stale_results_before_fetching() {
        let mut state = SearchState::default();
        let ticket = settle_and_start(&mut state, "rick");
        state.apply(SearchEvent::FetchSucceeded { seq: ticket.seq, page: rick() });

        state.apply(SearchEvent::DebounceSettled("morty".into()));
        assert!(state.results().is_empty());
    }

    #[test]
    fn late_result_for_superseded_term_is_ignored() {
        let mut state = SearchState::default();
        let old = settle_and_start(&mut state, "rick");
        let new = settle_and_start(&mut state, "morty");
        assert_ne!(old.seq, new.seq);

        let morty = CharacterPage::from_results(vec![Character::new(2, "Morty Smith", "u2")]);
        state.apply(SearchEvent::FetchSucceeded { seq: new.seq, page: morty.clone() });
        state.apply(SearchEvent::FetchSucceeded { seq: old.seq, page: rick() });
        assert_eq!(state.results(), morty.results.as_slice());
        assert!(!state.loading());
    }

    #[test]
    fn settling_to_gated_term_cancels_loading() {
        let mut state = SearchState::new(FetchGate::NonEmpty);
        let ticket = settle_and_start(&mut state, "rick");
        assert!(state.loading());

        assert_eq!(state.apply(SearchEvent::DebounceSettled(String::new())), None);
        assert!(!state.loading());

        state.apply(SearchEvent::FetchSucceeded { seq: ticket.seq, page: rick() });
        assert!(state.results().is_empty(), "cleared input must not show old results");
    }

    #[test]
    fn snapshot_counts_fetches() {
        let mut state = SearchState::default();
        settle_and_start(&mut state, "a");
        settle_and_start(&mut state, "ab");
        let snap = state.snapshot();
        assert_eq!(snap.fetches, 2);
        assert_eq!(snap.debounced.as_deref(), Some("ab"));
        assert!(snap.loading);
    }
}
