use crate::error::{CsvExtractError, Result};
use crate::extractor::ExtractionStats;
use crate::loader::SourceEncoding;
use crate::table::Table;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

/// The result of one successful load: the extracted table and where it came from.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionOutcome {
    pub source: PathBuf,
    pub encoding: SourceEncoding,
    pub stats: ExtractionStats,
    #[serde(skip)]
    pub table: Table,
    pub loaded_at: DateTime<Utc>,
}

/// Holds the current result. A successful load replaces it; failures leave it alone.
#[derive(Debug, Default)]
pub struct Session {
    current: Option<ExtractionOutcome>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn require_current(&self) -> Result<&ExtractionOutcome> {
        self.current.as_ref().ok_or(CsvExtractError::NoData)
    }

    pub fn replace(&mut self, outcome: ExtractionOutcome) -> &ExtractionOutcome {
        self.current.insert(outcome)
    }
}
