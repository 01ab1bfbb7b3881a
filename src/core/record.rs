//! Persisted summary of a finished round

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use std::fmt;

/// Alias stored when the player leaves the alias blank
pub const DEFAULT_ALIAS: &str = "Anónimo";

/// Final outcome of a round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Outcome {
    Win,
    Lose,
}

impl Outcome {
    /// Wire form, as stored by every sink
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Win => "WIN",
            Self::Lose => "LOSE",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One row per finished round. Never mutated after creation.
///
/// Field names on the wire follow the remote table's columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultRecord {
    #[serde(serialize_with = "serialize_played_at")]
    pub played_at: DateTime<Utc>,
    pub alias: String,
    #[serde(rename = "result")]
    pub outcome: Outcome,
    pub attempts_used: u32,
    pub max_attempts: u32,
    #[serde(rename = "secret_range_max")]
    pub range_max: u32,
    #[serde(rename = "difficulty")]
    pub difficulty_label: String,
}

impl ResultRecord {
    /// Timestamp as UTC ISO-8601 with a trailing `Z`
    #[must_use]
    pub fn played_at_iso(&self) -> String {
        iso_micros(self.played_at)
    }
}

fn iso_micros(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Every sink stores the same microsecond timestamp
fn serialize_played_at<S: Serializer>(
    at: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_micros(*at))
}

/// Trim an alias, falling back to [`DEFAULT_ALIAS`] when nothing is left
#[must_use]
pub fn normalize_alias(alias: &str) -> String {
    let trimmed = alias.trim();
    if trimmed.is_empty() {
        DEFAULT_ALIAS.to_string()
    } else {
        trimmed.to_string()
    }
}
