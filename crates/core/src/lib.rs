//! charscope: debounced character search.
//!
//! A user types into a single text box; once typing pauses for the configured
//! delay, the settled text is looked up against the Rick and Morty API and the
//! matching characters replace the displayed list.
//!
//! # Modules
//!
//! - [`debounce`]: Restart-on-change timer and the derived debounced value
//! - [`search`]: Search state machine, async controller, and view model
//! - [`lookup`]: `CharacterLookup` trait and the HTTP client
//! - [`config`]: `.charscope.toml` loading
//! - [`types`]: Character records and search snapshots
//! - [`error`]: Lookup and config errors

pub mod config;
pub mod debounce;
pub mod error;
pub mod lookup;
pub mod search;
pub mod types;

pub use config::{ApiConfig, Config, SearchOptions};
pub use error::{ConfigError, LookupError};
pub use lookup::{CharacterLookup, HttpLookup};
pub use search::{FetchGate, SearchController, SearchHandle, SearchView};
pub use types::{Character, CharacterPage, SearchSnapshot};
