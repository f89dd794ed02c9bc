//! Configuration for the booking spreadsheet importer.

use crate::csv_importer::BookingCsvReader;
use crate::ImportResult;
use anyhow::Result;
use std::path::Path;

/// Zero-based column positions of the booking spreadsheet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    /// Booking reference.
    pub reference: usize,
    /// Guest first name.
    pub first_name: usize,
    /// Guest last name.
    pub last_name: usize,
    /// Guest email.
    pub email: usize,
    /// Guest mobile.
    pub mobile: usize,
    /// Notes.
    pub notes: usize,
    /// Booking date.
    pub booking_date: usize,
    /// Source label.
    pub source: usize,
    /// Number of guests.
    pub party_size: usize,
    /// Gross amount.
    pub gross: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            reference: 0,
            first_name: 2,
            last_name: 3,
            email: 4,
            mobile: 5,
            notes: 6,
            booking_date: 7,
            source: 8,
            party_size: 10,
            gross: 11,
        }
    }
}

/// Configuration for reading a booking spreadsheet.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Column positions.
    pub columns: ColumnLayout,
    /// Whether the first row is a header to skip.
    pub has_header: bool,
    /// The field delimiter.
    pub delimiter: char,
    /// The booking date format (strftime-style).
    pub date_format: String,
    /// Map unknown source labels to the booking site instead of rejecting
    /// the row.
    pub lenient_sources: bool,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            columns: ColumnLayout::default(),
            has_header: false,
            delimiter: ',',
            date_format: "%Y-%m-%d".to_string(),
            lenient_sources: false,
        }
    }
}

impl ImportConfig {
    /// Start building an import configuration.
    pub fn builder() -> ImportConfigBuilder {
        ImportConfigBuilder::new()
    }

    /// Read bookings from a file.
    pub fn import(&self, path: &Path) -> Result<ImportResult> {
        BookingCsvReader::new(self.clone()).read_file(path)
    }

    /// Read bookings from string content.
    pub fn import_from_string(&self, content: &str) -> Result<ImportResult> {
        BookingCsvReader::new(self.clone()).read_str(content)
    }
}

/// Builder for [`ImportConfig`].
pub struct ImportConfigBuilder {
    config: ImportConfig,
}

impl ImportConfigBuilder {
    /// Create a builder with the default layout.
    pub fn new() -> Self {
        Self {
            config: ImportConfig::default(),
        }
    }

    /// Set the party size column index.
    pub const fn party_size_column(mut self, index: usize) -> Self {
        self.config.columns.party_size = index;
        self
    }

    /// Set the gross amount column index.
    pub const fn gross_column(mut self, index: usize) -> Self {
        self.config.columns.gross = index;
        self
    }

    /// Set the source label column index.
    pub const fn source_column(mut self, index: usize) -> Self {
        self.config.columns.source = index;
        self
    }

    /// Set the booking date column index.
    pub const fn booking_date_column(mut self, index: usize) -> Self {
        self.config.columns.booking_date = index;
        self
    }

    /// Replace the whole column layout.
    pub fn columns(mut self, columns: ColumnLayout) -> Self {
        self.config.columns = columns;
        self
    }

    /// Set whether the file has a header row.
    pub const fn has_header(mut self, has_header: bool) -> Self {
        self.config.has_header = has_header;
        self
    }

    /// Set the field delimiter.
    pub const fn delimiter(mut self, delimiter: char) -> Self {
        self.config.delimiter = delimiter;
        self
    }

    /// Set the booking date format.
    pub fn date_format(mut self, format: impl Into<String>) -> Self {
        self.config.date_format = format.into();
        self
    }

    /// Accept unknown source labels as booking-site bookings.
    pub const fn lenient_sources(mut self, lenient: bool) -> Self {
        self.config.lenient_sources = lenient;
        self
    }

    /// Build the configuration.
    pub fn build(self) -> ImportConfig {
        self.config
    }
}

impl Default for ImportConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
