//! Spreadsheet import and export for holidaylet.
//!
//! Bookings arrive as delimited text with fixed column positions and leave
//! as the corrected spreadsheet written by [`write_rows`].
//!
//! # Example
//!
//! ```rust,no_run
//! use holidaylet_importer::{write_rows_to_file, ImportConfig};
//! use std::path::Path;
//!
//! let config = ImportConfig::builder().has_header(true).build();
//! let result = config.import(Path::new("bookings.csv"))?;
//! for warning in &result.warnings {
//!     eprintln!("warning: {warning}");
//! }
//! // reconcile result.records, then:
//! // write_rows_to_file(Path::new("out.csv"), &rows)?;
//! # Ok::<(), anyhow::Error>(())
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod config;
pub mod csv_importer;
pub mod export;

use anyhow::Result;
use holidaylet_core::RawBookingInput;
use std::fmt;
use std::path::Path;

pub use config::{ColumnLayout, ImportConfig, ImportConfigBuilder};
pub use csv_importer::{BookingCsvReader, RowError};
pub use export::{write_rows, write_rows_to_file, EXPORT_HEADER};

/// A problem with a single input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportWarning {
    /// One-based row number in the input file.
    pub row: usize,
    /// Description of the problem.
    pub message: String,
}

impl ImportWarning {
    /// Create a warning for a row.
    pub fn new(row: usize, message: impl Into<String>) -> Self {
        Self {
            row,
            message: message.into(),
        }
    }
}

impl fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Row {}: {}", self.row, self.message)
    }
}

/// Result of an import operation.
#[derive(Debug, Clone, Default)]
pub struct ImportResult {
    /// Rows that passed validation.
    pub records: Vec<RawBookingInput>,
    /// Warnings encountered during import.
    pub warnings: Vec<ImportWarning>,
    /// Number of rows skipped because they failed validation.
    pub rejected: usize,
}

impl ImportResult {
    /// Create a new import result.
    pub const fn new(records: Vec<RawBookingInput>) -> Self {
        Self {
            records,
            warnings: Vec::new(),
            rejected: 0,
        }
    }

    /// Create an empty import result.
    pub const fn empty() -> Self {
        Self::new(Vec::new())
    }

    /// Add a warning to the result.
    pub fn with_warning(mut self, row: usize, warning: impl Into<String>) -> Self {
        self.warnings.push(ImportWarning::new(row, warning));
        self
    }
}

/// Read bookings from a file using the given configuration.
pub fn import_from_file(path: &Path, config: &ImportConfig) -> Result<ImportResult> {
    config.import(path)
}

/// Read bookings from file contents (useful for testing).
pub fn import_from_string(content: &str, config: &ImportConfig) -> Result<ImportResult> {
    config.import_from_string(content)
}
