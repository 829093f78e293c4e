//! Character lookup backends.
//!
//! The search controller only sees [`CharacterLookup`]. [`HttpLookup`] is the real
//! implementation against the Rick and Morty REST API.

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{LookupError, LookupResult};
use crate::types::CharacterPage;

/// Finds characters whose name matches a free-text filter.
#[async_trait]
pub trait CharacterLookup: Send + Sync {
    async fn fetch_characters(&self, term: &str) -> LookupResult<CharacterPage>;
}

/// `GET {base_url}/character/?name={term}`.
#[derive(Clone)]
pub struct HttpLookup {
    client: Client,
    base_url: String,
}

impl HttpLookup {
    pub fn new(api: &ApiConfig) -> Self {
        Self::with_client(Client::new(), api)
    }

    pub fn with_client(client: Client, api: &ApiConfig) -> Self {
        Self { client, base_url: api.base_url.trim_end_matches('/').to_string() }
    }

    pub fn endpoint(&self) -> String {
        format!("{}/character/", self.base_url)
    }
}

#[async_trait]
impl CharacterLookup for HttpLookup {
    async fn fetch_characters(&self, term: &str) -> LookupResult<CharacterPage> {
        let url = self.endpoint();
        debug!(url = url.as_str(), term, "Requesting characters");

        let response = self
            .client
            .get(&url)
            .query(&[("name", term)])
            .send()
            .await
            .map_err(|e| LookupError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body = response.bytes().await.map_err(|e| LookupError::Network(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| LookupError::Decode(e.to_string()))
    }
}
