//! Async driver for [`SearchState`].
//!
//! One tokio task owns the state and reacts to three sources, one at a time:
//! input events from the handle, the debounce deadline, and finished lookups.
//! After every step the new snapshot is published on a `watch` channel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::{Id, JoinHandle, JoinSet};
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use super::{Command, FetchTicket, SearchEvent, SearchState};
use crate::config::SearchOptions;
use crate::debounce::Debouncer;
use crate::error::{LookupError, LookupResult};
use crate::lookup::CharacterLookup;
use crate::types::{CharacterPage, SearchSnapshot};

pub struct SearchController {
    lookup: Arc<dyn CharacterLookup>,
    options: SearchOptions,
}

impl SearchController {
    pub fn new(lookup: Arc<dyn CharacterLookup>, options: SearchOptions) -> Self {
        Self { lookup, options }
    }

    /// Start the controller on the current tokio runtime.
    ///
    /// The task stops once every [`SearchHandle`] clone is dropped; it resolves to
    /// the final snapshot.
    pub fn spawn(self) -> (SearchHandle, JoinHandle<SearchSnapshot>) {
        let (input_tx, input_rx) = mpsc::unbounded_channel();
        let (snap_tx, snap_rx) = watch::channel(SearchSnapshot::default());
        let task = tokio::spawn(self.run(input_rx, snap_tx));
        (SearchHandle { inputs: input_tx, snapshots: snap_rx }, task)
    }

    /// Drive the search session until `inputs` closes.
    async fn run(
        self,
        mut inputs: mpsc::UnboundedReceiver<Message>,
        snapshots: watch::Sender<SearchSnapshot>,
    ) -> SearchSnapshot {
        let mut session = Session {
            state: SearchState::new(self.options.gate),
            timer: Debouncer::new(self.options.delay),
            lookups: JoinSet::new(),
            tickets: HashMap::new(),
            idle_waiters: Vec::new(),
            lookup: self.lookup,
        };
        debug!(
            delay_ms = self.options.delay.as_millis() as u64,
            gate = ?self.options.gate,
            "Search session started"
        );

        // The initial empty query counts as a change from "no prior state".
        session.dispatch(SearchEvent::DebounceSettled(String::new()));
        publish(&snapshots, &session.state);

        loop {
            let deadline = session.timer.deadline();
            tokio::select! {
                message = inputs.recv() => match message {
                    Some(Message::Input(text)) => session.dispatch(SearchEvent::InputChanged(text)),
                    Some(Message::WaitIdle(reply)) => session.idle_waiters.push(reply),
                    None => break,
                },
                _ = sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
                    if let Some(term) = session.timer.poll(Instant::now()) {
                        session.dispatch(SearchEvent::DebounceSettled(term));
                    }
                }
                Some(joined) = session.lookups.join_next_with_id(), if !session.lookups.is_empty() => {
                    session.complete(joined);
                }
            }
            publish(&snapshots, &session.state);
            session.notify_if_idle();
        }

        session.teardown();
        session.state.snapshot()
    }
}

fn publish(snapshots: &watch::Sender<SearchSnapshot>, state: &SearchState) {
    let next = state.snapshot();
    snapshots.send_if_modified(|current| {
        if *current == next {
            return false;
        }
        *current = next;
        true
    });
}

type LookupOutcome = LookupResult<CharacterPage>;

/// Requests travelling from handles to the controller task, in order.
enum Message {
    Input(String),
    WaitIdle(oneshot::Sender<SearchSnapshot>),
}

struct Session {
    state: SearchState,
    timer: Debouncer<String>,
    lookups: JoinSet<(u64, LookupOutcome)>,
    tickets: HashMap<Id, u64>,
    idle_waiters: Vec<oneshot::Sender<SearchSnapshot>>,
    lookup: Arc<dyn CharacterLookup>,
}

impl Session {
    /// Apply `event` and carry out whatever commands follow from it.
    fn dispatch(&mut self, event: SearchEvent) {
        let mut next = Some(event);
        while let Some(event) = next.take() {
            next = match self.state.apply(event) {
                Some(Command::Debounce(text)) => {
                    self.timer.schedule(text, Instant::now());
                    None
                }
                Some(Command::BeginFetch(term)) => Some(SearchEvent::FetchStarted(term)),
                Some(Command::Lookup(ticket)) => {
                    self.start_lookup(ticket);
                    None
                }
                None => None,
            };
        }
    }

    fn start_lookup(&mut self, ticket: FetchTicket) {
        let lookup = Arc::clone(&self.lookup);
        let FetchTicket { seq, term } = ticket;
        let handle = self.lookups.spawn(async move {
            let outcome = lookup.fetch_characters(&term).await;
            (seq, outcome)
        });
        self.tickets.insert(handle.id(), seq);
    }

    fn complete(&mut self, joined: Result<(Id, (u64, LookupOutcome)), tokio::task::JoinError>) {
        let event = match joined {
            Ok((id, (seq, outcome))) => {
                self.tickets.remove(&id);
                match outcome {
                    Ok(page) => SearchEvent::FetchSucceeded { seq, page },
                    Err(error) => SearchEvent::FetchFailed { seq, error },
                }
            }
            Err(e) => {
                let Some(seq) = self.tickets.remove(&e.id()) else {
                    return;
                };
                warn!(seq, "Lookup task did not finish: {e}");
                SearchEvent::FetchFailed { seq, error: LookupError::Network(e.to_string()) }
            }
        };
        self.dispatch(event);
    }

    /// No debounce timer pending and no lookup the state still cares about.
    fn is_idle(&self) -> bool {
        !self.timer.is_pending() && self.state.current_fetch().is_none()
    }

    fn notify_if_idle(&mut self) {
        if self.idle_waiters.is_empty() || !self.is_idle() {
            return;
        }
        let snapshot = self.state.snapshot();
        for waiter in self.idle_waiters.drain(..) {
            let _ = waiter.send(snapshot.clone());
        }
    }

    fn teardown(&mut self) {
        self.timer.cancel();
        self.lookups.abort_all();
        self.tickets.clear();
        debug!("Search session stopped");
    }
}

/// Cloneable front door to a running [`SearchController`].
#[derive(Clone)]
pub struct SearchHandle {
    inputs: mpsc::UnboundedSender<Message>,
    snapshots: watch::Receiver<SearchSnapshot>,
}

impl SearchHandle {
    /// Report new raw text from the input widget. Returns false once the
    /// controller has stopped.
    pub fn input(&self, text: impl Into<String>) -> bool {
        self.inputs.send(Message::Input(text.into())).is_ok()
    }

    pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
        self.snapshots.clone()
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.snapshots.borrow().clone()
    }

    /// Wait until every input sent so far has settled and its lookup, if any,
    /// has finished. Returns the snapshot at that point.
    pub async fn wait_idle(&self) -> SearchSnapshot {
        let (tx, rx) = oneshot::channel();
        if self.inputs.send(Message::WaitIdle(tx)).is_err() {
            return self.snapshot();
        }
        match rx.await {
            Ok(snapshot) => snapshot,
            Err(_) => self.snapshot(),
        }
    }
}
