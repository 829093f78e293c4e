//! Test harness for controller and lookup integration tests.
//!
//! [`ScriptedLookup`] stands in for the HTTP API: it records every term it is
//! asked for and answers from a per-term script, optionally after a delay so
//! tests can observe the loading window under paused tokio time.

#![allow(dead_code)]

pub mod fixtures;

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use charscope_core::error::LookupResult;
use charscope_core::{
    CharacterLookup, CharacterPage, FetchGate, LookupError, SearchController, SearchHandle,
    SearchOptions, SearchSnapshot,
};
use tokio::task::JoinHandle;

pub const DELAY: Duration = Duration::from_millis(2000);

pub fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

#[derive(Default)]
pub struct ScriptedLookup {
    calls: Mutex<Vec<String>>,
    responses: HashMap<String, LookupResult<CharacterPage>>,
    delays: HashMap<String, Duration>,
}

impl ScriptedLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(mut self, term: &str, result: LookupResult<CharacterPage>) -> Self {
        self.responses.insert(term.to_string(), result);
        self
    }

    pub fn delay(mut self, term: &str, delay: Duration) -> Self {
        self.delays.insert(term.to_string(), delay);
        self
    }

    /// Terms looked up so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CharacterLookup for ScriptedLookup {
    async fn fetch_characters(&self, term: &str) -> LookupResult<CharacterPage> {
        self.calls.lock().unwrap().push(term.to_string());
        if let Some(delay) = self.delays.get(term) {
            tokio::time::sleep(*delay).await;
        }
        // The real API answers 404 when nothing matches.
        self.responses.get(term).cloned().unwrap_or(Err(LookupError::Status(404)))
    }
}

pub struct TestHarness {
    pub lookup: Arc<ScriptedLookup>,
    pub handle: SearchHandle,
    pub task: JoinHandle<SearchSnapshot>,
}

impl TestHarness {
    pub async fn start(lookup: ScriptedLookup, gate: FetchGate) -> Self {
        Self::start_with_delay(lookup, gate, DELAY).await
    }

    pub async fn start_with_delay(lookup: ScriptedLookup, gate: FetchGate, delay: Duration) -> Self {
        let lookup = Arc::new(lookup);
        let options = SearchOptions { delay, gate };
        let (handle, task) = SearchController::new(lookup.clone(), options).spawn();
        settle().await;
        TestHarness { lookup, handle, task }
    }

    /// Send raw text and let the controller process it.
    pub async fn type_text(&self, text: &str) {
        assert!(self.handle.input(text), "controller stopped unexpectedly");
        settle().await;
    }

    /// Move the paused clock forward and let every woken task run.
    pub async fn advance(&self, by: Duration) {
        tokio::time::advance(by).await;
        settle().await;
    }

    pub fn snapshot(&self) -> SearchSnapshot {
        self.handle.snapshot()
    }
}

/// Yield enough times for the controller and its lookup tasks to run to quiescence.
pub async fn settle() {
    for _ in 0..32 {
        tokio::task::yield_now().await;
    }
}
