//! Runtime configuration, loaded from `.charscope.toml` or defaults.

use std::path::Path;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, warn};

use crate::error::ConfigError;
use crate::search::FetchGate;

/// File name looked up in the working directory when no `--config` is given.
pub const CONFIG_FILE_NAME: &str = ".charscope.toml";

/// Public Rick and Morty API root.
pub const DEFAULT_API_BASE_URL: &str = "https://rickandmortyapi.com/api";

/// Quiet period before a typed query is searched.
pub const DEFAULT_DELAY: Duration = Duration::from_millis(2000);

const KNOWN_CONFIG_KEYS: &[&str] = &["delay_ms", "fetch_on_empty", "api_base_url"];

/// Behaviour of the debounced search flow.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SearchOptions {
    #[serde(rename = "delay_ms", serialize_with = "serialize_millis")]
    pub delay: Duration,
    pub gate: FetchGate,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self { delay: DEFAULT_DELAY, gate: FetchGate::NonEmpty }
    }
}

/// Where the character lookup goes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self { base_url: DEFAULT_API_BASE_URL.to_string() }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Config {
    pub search: SearchOptions,
    pub api: ApiConfig,
}

fn serialize_millis<S: serde::Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_u64(d.as_millis() as u64)
}

/// Simple Levenshtein edit distance for typo suggestions.
fn edit_distance(a: &str, b: &str) -> usize {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];
    for (i, &ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, &cb) in b.iter().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    prev[b.len()]
}

fn warn_unknown_keys(table: &toml::Table) {
    for key in table.keys() {
        if KNOWN_CONFIG_KEYS.contains(&key.as_str()) {
            continue;
        }
        let suggestion = KNOWN_CONFIG_KEYS.iter().min_by_key(|k| edit_distance(key, k));
        match suggestion {
            Some(s) if edit_distance(key, s) <= 3 => {
                warn!(key = key.as_str(), suggestion = *s, "Unknown config key, did you mean '{s}'?");
            }
            _ => {
                warn!(
                    key = key.as_str(),
                    "Unknown config key (known keys: {})",
                    KNOWN_CONFIG_KEYS.join(", ")
                );
            }
        }
    }
}

impl Config {
    /// Build a config from parsed TOML, keeping defaults for absent keys.
    pub fn from_table(table: &toml::Table) -> Self {
        warn_unknown_keys(table);
        let mut config = Config::default();

        if let Some(ms) = table.get("delay_ms").and_then(|v| v.as_integer()) {
            if ms < 0 {
                warn!(delay_ms = ms, "Negative delay_ms clamped to 0");
            }
            config.search.delay = Duration::from_millis(ms.max(0) as u64);
        }

        if let Some(on_empty) = table.get("fetch_on_empty").and_then(|v| v.as_bool()) {
            config.search.gate = if on_empty { FetchGate::Always } else { FetchGate::NonEmpty };
        }

        if let Some(url) = table.get("api_base_url").and_then(|v| v.as_str()) {
            config.api.base_url = url.trim_end_matches('/').to_string();
        }

        config
    }

    /// Load `.charscope.toml` from `dir`. A missing or broken file yields defaults.
    pub fn load(dir: &Path) -> Self {
        let path = dir.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Config::default();
        }
        debug!(path = %path.display(), "Loading config");
        match std::fs::read_to_string(&path).map(|c| c.parse::<toml::Table>()) {
            Ok(Ok(table)) => Config::from_table(&table),
            Ok(Err(e)) => {
                warn!(path = %path.display(), "Failed to parse config: {e}");
                Config::default()
            }
            Err(e) => {
                warn!(path = %path.display(), "Failed to read config: {e}");
                Config::default()
            }
        }
    }

    /// Load an explicitly requested file. Unlike [`Config::load`], failures are errors.
    pub fn load_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        let table = content.parse::<toml::Table>().map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Ok(Config::from_table(&table))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> Config {
        Config::from_table(&s.parse::<toml::Table>().unwrap())
    }

    #[test]
    fn empty_table_gives_defaults() {
        let config = parse("");
        assert_eq!(config, Config::default());
        assert_eq!(config.search.delay, Duration::from_millis(2000));
        assert_eq!(config.search.gate, FetchGate::NonEmpty);
        assert_eq!(config.api.base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn keys_override_defaults() {
        let config = parse(
            r#"
            delay_ms = 250
            fetch_on_empty = true
            api_base_url = "http://localhost:9000/api/"
            "#,
        );
        assert_eq!(config.search.delay, Duration::from_millis(250));
        assert_eq!(config.search.gate, FetchGate::Always);
        assert_eq!(config.api.base_url, "http://localhost:9000/api");
    }

    #[test]
    fn negative_delay_clamps_to_zero() {
        let config = parse("delay_ms = -5");
        assert_eq!(config.search.delay, Duration::ZERO);
    }

    #[test]
    fn unknown_keys_are_ignored() {
        let config = parse("dealy_ms = 10\ncolour = \"red\"");
        assert_eq!(config, Config::default());
    }

    #[test]
    fn edit_distance_suggests_close_keys() {
        assert_eq!(edit_distance("dealy_ms", "delay_ms"), 2);
        assert_eq!(edit_distance("delay_ms", "delay_ms"), 0);
    }

    #[test]
    fn load_missing_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()), Config::default());
    }

    #[test]
    fn load_broken_file_falls_back() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "delay_ms = [").unwrap();
        assert_eq!(Config::load(dir.path()), Config::default());
    }

    #[test]
    fn load_reads_file_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE_NAME), "delay_ms = 10").unwrap();
        assert_eq!(Config::load(dir.path()).search.delay, Duration::from_millis(10));
    }

    #[test]
    fn load_file_reports_errors() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(Config::load_file(&missing), Err(ConfigError::Read { .. })));

        let broken = dir.path().join("broken.toml");
        std::fs::write(&broken, "fetch_on_empty = ").unwrap();
        assert!(matches!(Config::load_file(&broken), Err(ConfigError::Parse { .. })));
    }
}
