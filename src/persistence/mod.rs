//! Result persistence
//!
//! Finished rounds are appended to a [`ResultSink`]. Two backends exist, a
//! local CSV file and a remote REST table; which one is used is a deployment
//! choice made through [`SinkConfig`].

mod csv;
mod remote;

pub use csv::{CSV_HEADER, CsvSink};
pub use remote::{DEFAULT_TABLE, RemoteSink};

use crate::core::ResultRecord;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while writing a result record
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {message}")]
    Http { message: String },

    /// The store answered with a non-success status
    #[error("store rejected the record ({status}): {body}")]
    Rejected { status: u16, body: String },

    #[error("serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("invalid sink configuration: {message}")]
    Config { message: String },
}

/// Append-only store for finished rounds
pub trait ResultSink {
    /// Append one record
    ///
    /// # Errors
    ///
    /// Returns a [`PersistenceError`] if the record could not be stored.
    fn append(&self, record: &ResultRecord) -> Result<(), PersistenceError>;

    /// Short description for logs and status lines
    fn describe(&self) -> String;
}

/// Deployment choice of backend
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkConfig {
    Csv {
        path: PathBuf,
    },
    Remote {
        base_url: String,
        api_key: String,
        table: String,
    },
}

impl SinkConfig {
    /// Build the configured backend
    ///
    /// # Errors
    ///
    /// Returns [`PersistenceError::Config`] for an unusable remote setup or
    /// [`PersistenceError::Http`] if the HTTP client cannot be created.
    pub fn build(self) -> Result<Box<dyn ResultSink>, PersistenceError> {
        match self {
            Self::Csv { path } => Ok(Box::new(CsvSink::new(path))),
            Self::Remote {
                base_url,
                api_key,
                table,
            } => Ok(Box::new(RemoteSink::new(&base_url, api_key, table)?)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn csv_config_builds_csv_sink() {
        let sink = SinkConfig::Csv {
            path: PathBuf::from("runs.csv"),
        }
        .build()
        .unwrap();
        assert!(sink.describe().contains("runs.csv"));
    }

    #[test]
    fn remote_config_requires_url_and_key() {
        let missing_key = SinkConfig::Remote {
            base_url: "https://example.supabase.co".to_string(),
            api_key: "  ".to_string(),
            table: DEFAULT_TABLE.to_string(),
        };
        assert!(matches!(
            missing_key.build(),
            Err(PersistenceError::Config { .. })
        ));

        let missing_url = SinkConfig::Remote {
            base_url: String::new(),
            api_key: "key".to_string(),
            table: DEFAULT_TABLE.to_string(),
        };
        assert!(matches!(
            missing_url.build(),
            Err(PersistenceError::Config { .. })
        ));
    }
}
