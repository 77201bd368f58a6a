//! CSV contact import.
//!
//! [`ContactCsvParser`] reads the upload into header-keyed rows and
//! [`map_row`] resolves each row into a [`ContactCandidate`] or a skip.
//! Persisting candidates is the caller's job.

mod csv_parser;
mod row_mapper;

pub use csv_parser::ContactCsvParser;
pub use row_mapper::{map_row, ContactCandidate};

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("CSV file is empty or invalid")]
    Empty,
}

/// One data row of an upload after mapping.
#[derive(Debug, Clone, PartialEq)]
pub enum ParsedRow {
    Contact {
        line: u64,
        candidate: ContactCandidate,
    },
    /// Neither a name nor a phone number could be resolved.
    Skipped { line: u64 },
}

impl ParsedRow {
    pub fn line(&self) -> u64 {
        match self {
            ParsedRow::Contact { line, .. } | ParsedRow::Skipped { line } => *line,
        }
    }
}
