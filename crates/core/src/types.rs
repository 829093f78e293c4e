//! Core types shared across charscope: character records as returned by the
//! lookup API, the page envelope around them, and the per-session search snapshot.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Character records
// ---------------------------------------------------------------------------

/// A single character as returned by the lookup API. Read-only to charscope.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Character {
    /// Unique key, used to identify rendered rows.
    pub id: u64,
    pub name: String,
    /// Portrait URL.
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub species: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gender: Option<String>,
}

impl Character {
    /// Build a character carrying only the three attributes the UI renders.
    pub fn new(id: u64, name: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            image: image.into(),
            status: None,
            species: None,
            gender: None,
        }
    }
}

/// Paging metadata from the API. Only the first page is ever requested.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    #[serde(default)]
    pub count: u64,
    #[serde(default)]
    pub pages: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub prev: Option<String>,
}

/// One response body from the character endpoint: `{ info, results }`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterPage {
    #[serde(default)]
    pub info: Option<PageInfo>,
    pub results: Vec<Character>,
}

impl CharacterPage {
    pub fn from_results(results: Vec<Character>) -> Self {
        Self { info: None, results }
    }

    /// Total matches reported by the API, falling back to the page length.
    pub fn total(&self) -> u64 {
        self.info.as_ref().map(|i| i.count).unwrap_or(self.results.len() as u64)
    }
}

// ---------------------------------------------------------------------------
// Search snapshot (published after every controller step)
// ---------------------------------------------------------------------------

/// Immutable copy of the search state, handed to renderers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SearchSnapshot {
    /// Raw text, updated on every input event.
    pub query: String,
    /// Last settled query. `None` until the first settle.
    pub debounced: Option<String>,
    pub loading: bool,
    pub results: Vec<Character>,
    /// Number of lookups issued so far in this session.
    pub fetches: u64,
}
