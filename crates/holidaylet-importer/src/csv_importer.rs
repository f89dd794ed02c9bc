//! Booking spreadsheet reader.

use crate::config::{ColumnLayout, ImportConfig};
use crate::{ImportResult, ImportWarning};
use anyhow::{Context, Result};
use chrono::NaiveDate;
use holidaylet_core::{RawBookingInput, Services, Source};
use rust_decimal::Decimal;
use std::fs;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Why a single row was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RowError {
    /// The row has fewer columns than the layout needs.
    #[error("missing column {index} ({field})")]
    MissingColumn {
        /// Field name.
        field: &'static str,
        /// Expected column index.
        index: usize,
    },

    /// A field could not be parsed.
    #[error("invalid {field} '{value}': {reason}")]
    InvalidField {
        /// Field name.
        field: &'static str,
        /// Raw value.
        value: String,
        /// What was wrong with it.
        reason: String,
    },

    /// The source label is not one of the known labels.
    #[error("unknown source '{0}'")]
    UnknownSource(String),
}

/// Reads booking rows from delimited text.
pub struct BookingCsvReader {
    config: ImportConfig,
}

impl BookingCsvReader {
    /// Create a reader with the given configuration.
    pub const fn new(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Read bookings from a file.
    pub fn read_file(&self, path: &Path) -> Result<ImportResult> {
        let content =
            fs::read(path).with_context(|| format!("Failed to open file: {}", path.display()))?;
        self.read_bytes(&content)
    }

    /// Read bookings from string content.
    pub fn read_str(&self, content: &str) -> Result<ImportResult> {
        self.read_bytes(content.as_bytes())
    }

    /// Read bookings from raw file contents.
    ///
    /// Rows that fail validation, including rows that are not valid UTF-8,
    /// are skipped and reported as warnings.
    pub fn read_bytes(&self, content: &[u8]) -> Result<ImportResult> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(self.config.has_header)
            .delimiter(self.config.delimiter as u8)
            .flexible(true)
            .from_reader(content);

        let mut result = ImportResult::empty();
        let first_row = if self.config.has_header { 2 } else { 1 };

        for (i, record) in reader.records().enumerate() {
            // The reader skips blank lines, so the record count is not the line.
            let fallback = first_row + i;
            let record = match record {
                Ok(r) => r,
                Err(e) => {
                    let row = e.position().map_or(fallback, line_number);
                    result.warnings.push(ImportWarning::new(row, format!("parse error: {e}")));
                    result.rejected += 1;
                    continue;
                }
            };
            let row = record.position().map_or(fallback, line_number);
            if record.iter().all(|field| field.trim().is_empty()) {
                continue;
            }

            match self.parse_row(&record) {
                Ok((input, warning)) => {
                    if let Some(message) = warning {
                        result.warnings.push(ImportWarning::new(row, message));
                    }
                    result.records.push(input);
                }
                Err(e) => {
                    tracing::warn!("row {row} rejected: {e}");
                    result.warnings.push(ImportWarning::new(row, e.to_string()));
                    result.rejected += 1;
                }
            }
        }

        Ok(result)
    }

    fn parse_row(
        &self,
        record: &csv::StringRecord,
    ) -> Result<(RawBookingInput, Option<String>), RowError> {
        let columns: &ColumnLayout = &self.config.columns;
        let text = |field: &'static str, index: usize| -> Result<String, RowError> {
            record
                .get(index)
                .map(|s| s.trim().to_string())
                .ok_or(RowError::MissingColumn { field, index })
        };

        let reference = text("reference", columns.reference)?;
        if reference.is_empty() {
            return Err(RowError::InvalidField {
                field: "reference",
                value: reference,
                reason: "empty".to_string(),
            });
        }

        let date_str = text("booking date", columns.booking_date)?;
        let booking_date = NaiveDate::parse_from_str(&date_str, &self.config.date_format)
            .map_err(|e| RowError::InvalidField {
                field: "booking date",
                value: date_str.clone(),
                reason: e.to_string(),
            })?;

        let label = text("source", columns.source)?;
        let mut warning = None;
        let source = match Source::from_label(&label) {
            Some(source) => source,
            None if self.config.lenient_sources => {
                warning = Some(format!(
                    "unknown source '{label}', assuming {}",
                    Source::BookingSite
                ));
                Source::BookingSite
            }
            None => return Err(RowError::UnknownSource(label)),
        };

        let size_str = text("party size", columns.party_size)?;
        let party_size = match size_str.parse::<u32>() {
            Ok(n) if n >= 1 => n,
            Ok(_) => {
                return Err(RowError::InvalidField {
                    field: "party size",
                    value: size_str,
                    reason: "must be at least 1".to_string(),
                })
            }
            Err(e) => {
                return Err(RowError::InvalidField {
                    field: "party size",
                    value: size_str,
                    reason: e.to_string(),
                })
            }
        };

        let gross_str = text("gross", columns.gross)?;
        let gross = match parse_money_string(&gross_str) {
            Some(g) if !g.is_sign_negative() || g.is_zero() => g,
            Some(_) => {
                return Err(RowError::InvalidField {
                    field: "gross",
                    value: gross_str,
                    reason: "must not be negative".to_string(),
                })
            }
            None => {
                return Err(RowError::InvalidField {
                    field: "gross",
                    value: gross_str,
                    reason: "not a number".to_string(),
                })
            }
        };

        let input = RawBookingInput::new(reference, source, party_size, gross, booking_date)
            .with_guest(
                text("first name", columns.first_name)?,
                text("last name", columns.last_name)?,
            )
            .with_contact(text("email", columns.email)?, text("mobile", columns.mobile)?)
            .with_notes(text("notes", columns.notes)?)
            .with_services(Services::ALL);

        Ok((input, warning))
    }
}

fn line_number(position: &csv::Position) -> usize {
    position.line() as usize
}

/// Parse a money string, handling currency symbols and thousands separators.
fn parse_money_string(s: &str) -> Option<Decimal> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    let cleaned: String = s
        .chars()
        .filter(|c| !matches!(c, '£' | '$' | '€' | ',' | ' '))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    Decimal::from_str(&cleaned).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn read(content: &str) -> ImportResult {
        ImportConfig::default().import_from_string(content).unwrap()
    }

    #[test]
    fn test_parse_money_string() {
        assert_eq!(parse_money_string("100.00"), Some(dec!(100)));
        assert_eq!(parse_money_string("£1,234.56"), Some(dec!(1234.56)));
        assert_eq!(parse_money_string("-50"), Some(dec!(-50)));
        assert_eq!(parse_money_string(""), None);
        assert_eq!(parse_money_string("N/A"), None);
        assert_eq!(parse_money_string("12abc"), None);
    }

    #[test]
    fn test_read_row() {
        let result = read(
            "6ASJUN1719,x,Ada,Lovelace,ada@example.com,07700 900000,late arrival,2017-05-20,airbnb,y,4,\"1,250.00\"\n",
        );
        assert!(result.warnings.is_empty());
        assert_eq!(result.records.len(), 1);

        let input = &result.records[0];
        assert_eq!(input.reference, "6ASJUN1719");
        assert_eq!(input.first_name, "Ada");
        assert_eq!(input.last_name, "Lovelace");
        assert_eq!(input.notes, "late arrival");
        assert_eq!(input.source, Source::AirBnb);
        assert_eq!(input.party_size, 4);
        assert_eq!(input.gross, dec!(1250.00));
        assert_eq!(input.services, Services::ALL);
        assert_eq!(
            input.booking_date,
            NaiveDate::from_ymd_opt(2017, 5, 20).unwrap()
        );
    }

    #[test]
    fn test_bad_rows_become_warnings() {
        let content = "\
6ASJUN1719,,A,B,,,,2017-05-20,email,,two,100
6ASJUN1719,,A,B,,,,2017-05-20,email,,2,lots
6ASJUN1719,,A,B,,,,20/05/2017,email,,2,100
6ASJUN1719,,A,B,,,,2017-05-20,email,,2,100
";
        let result = read(content);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.rejected, 3);
        assert_eq!(result.warnings.len(), 3);
        assert_eq!(result.warnings[0].row, 1);
        assert!(result.warnings[0].message.starts_with("invalid party size 'two'"));
        assert!(result.warnings[1].message.starts_with("invalid gross 'lots'"));
        assert!(result.warnings[2].message.starts_with("invalid booking date"));
    }

    #[test]
    fn test_empty_party_rejected() {
        let result = read("6ASJUN1719,,A,B,,,,2017-05-20,email,,0,100\n");
        assert!(result.records.is_empty());
        assert_eq!(
            result.warnings[0].message,
            "invalid party size '0': must be at least 1"
        );
    }

    #[test]
    fn test_missing_column() {
        let result = read("6ASJUN1719,,A,B,,,,2017-05-20,email,,2\n");
        assert!(result.records.is_empty());
        assert_eq!(result.warnings[0].message, "missing column 11 (gross)");
    }

    #[test]
    fn test_unknown_source_rejected_by_default() {
        let result = read("6ASJUN1719,,A,B,,,,2017-05-20,fax,,2,100\n");
        assert!(result.records.is_empty());
        assert_eq!(result.warnings[0].message, "unknown source 'fax'");
    }

    #[test]
    fn test_unknown_source_lenient() {
        let config = ImportConfig::builder().lenient_sources(true).build();
        let result = config
            .import_from_string("6ASJUN1719,,A,B,,,,2017-05-20,fax,,2,100\n")
            .unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].source, Source::BookingSite);
        assert_eq!(result.rejected, 0);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_header_and_custom_columns() {
        let config = ImportConfig::builder()
            .has_header(true)
            .party_size_column(11)
            .gross_column(12)
            .delimiter(';')
            .build();
        let content = "\
ref;id;first;last;email;mobile;notes;date;source;a;b;people;gross
1AMDEC1703;9;A;B;;;;2012-05-20;phone;;;3;600
";
        let result = config.import_from_string(content).unwrap();
        assert!(result.warnings.is_empty());
        assert_eq!(result.records[0].party_size, 3);
        assert_eq!(result.records[0].gross, dec!(600));
        assert_eq!(result.records[0].source, Source::Phone);
    }

    #[test]
    fn test_row_numbers_count_blank_lines() {
        let content = "\
6ASJUN1719,,A,B,,,,2017-05-20,email,,2,100

6ASJUN1719,,A,B,,,,2017-05-20,email,,x,100
";
        let result = read(content);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.warnings[0].row, 3);
        assert!(result.warnings[0]
            .to_string()
            .starts_with("Row 3: invalid party size 'x'"));
    }

    #[test]
    fn test_row_numbers_after_header() {
        let config = ImportConfig::builder().has_header(true).build();
        let content = "\
ref,id,first,last,email,mobile,notes,date,source,x,people,gross

6ASJUN1719,,A,B,,,,2017-05-20,email,,0,100
";
        let result = config.import_from_string(content).unwrap();
        assert_eq!(result.warnings[0].row, 3);
    }

    #[test]
    fn test_unreadable_record_is_rejected() {
        let mut content = b"6ASJUN1719,,A,B,,,,2017-05-20,email,,2,100\n".to_vec();
        content.extend_from_slice(b"6ASJUN1719,,\xff\xfe,B,,,,2017-05-20,email,,2,100\n");
        let config = ImportConfig::default();
        let result = BookingCsvReader::new(config).read_bytes(&content).unwrap();
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.rejected, 1);
        assert_eq!(result.warnings[0].row, 2);
        assert!(result.warnings[0].message.starts_with("parse error"));
    }

    #[test]
    fn test_blank_lines_skipped() {
        let result = read(",,,,,,,,,,,\n6ASJUN1719,,A,B,,,,2017-05-20,email,,2,100\n");
        assert_eq!(result.records.len(), 1);
        assert!(result.warnings.is_empty());
    }
}
