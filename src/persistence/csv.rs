//! Local append-only CSV sink

use super::{PersistenceError, ResultSink};
use crate::core::ResultRecord;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Header row, written once per file
pub const CSV_HEADER: &str =
    "fecha_utc,alias,resultado,intentos_usados,max_intentos,rango_max,dificultad";

/// Appends one row per record to a delimited file
#[derive(Debug, Clone)]
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl ResultSink for CsvSink {
    fn append(&self, record: &ResultRecord) -> Result<(), PersistenceError> {
        let needs_header = self.path.metadata().map_or(true, |meta| meta.len() == 0);

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;

        let mut out = String::new();
        if needs_header {
            out.push_str(CSV_HEADER);
            out.push('\n');
        }
        out.push_str(&format_row(record));
        out.push('\n');

        file.write_all(out.as_bytes())?;
        log::debug!("appended {} row to {}", record.outcome, self.path.display());
        Ok(())
    }

    fn describe(&self) -> String {
        format!("CSV file {}", self.path.display())
    }
}

/// Format a record as one CSV line, without the line terminator
fn format_row(record: &ResultRecord) -> String {
    [
        record.played_at_iso(),
        escape_field(&record.alias),
        record.outcome.to_string(),
        record.attempts_used.to_string(),
        record.max_attempts.to_string(),
        record.range_max.to_string(),
        escape_field(&record.difficulty_label),
    ]
    .join(",")
}

/// Quote a field if it contains a delimiter, a quote or a line break
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
