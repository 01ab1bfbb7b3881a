//! Remote table sink
//!
//! Inserts one row per record through a PostgREST-style endpoint
//! (`POST {base_url}/rest/v1/{table}`), the interface Supabase exposes.

use super::{PersistenceError, ResultSink};
use crate::core::ResultRecord;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use std::time::Duration;

/// Table used when none is configured
pub const DEFAULT_TABLE: &str = "game_runs";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Posts records to a remote REST table
#[derive(Debug, Clone)]
pub struct RemoteSink {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl RemoteSink {
    /// Create a sink for `table` under `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Config`] if the URL, key or table is blank,
    /// or [`PersistenceError::Http`] if the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        table: impl Into<String>,
    ) -> Result<Self, PersistenceError> {
        let base_url = base_url.trim().trim_end_matches('/');
        let api_key = api_key.into().trim().to_string();
        let table = table.into().trim().to_string();

        if base_url.is_empty() {
            return Err(PersistenceError::Config {
                message: "remote store URL is not set".to_string(),
            });
        }
        if api_key.is_empty() {
            return Err(PersistenceError::Config {
                message: "remote store API key is not set".to_string(),
            });
        }
        if table.is_empty() {
            return Err(PersistenceError::Config {
                message: "remote table name is empty".to_string(),
            });
        }

        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| PersistenceError::Http {
                message: format!("failed to build HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            endpoint: format!("{base_url}/rest/v1/{table}"),
            api_key,
        })
    }

    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl ResultSink for RemoteSink {
    fn append(&self, record: &ResultRecord) -> Result<(), PersistenceError> {
        let body = serde_json::to_vec(record)?;

        let response = self
            .client
            .post(&self.endpoint)
            .header("apikey", &self.api_key)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .header(CONTENT_TYPE, "application/json")
            .header("Prefer", "return=minimal")
            .body(body)
            .send()
            .map_err(|e| PersistenceError::Http {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status.is_success() {
            log::debug!("inserted {} row via {}", record.outcome, self.endpoint);
            return Ok(());
        }

        let body = response.text().unwrap_or_default();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            log::warn!("remote store refused credentials for {}", self.endpoint);
        }
        Err(PersistenceError::Rejected {
            status: status.as_u16(),
            body,
        })
    }

    fn describe(&self) -> String {
        format!("remote table {}", self.endpoint)
    }
}
