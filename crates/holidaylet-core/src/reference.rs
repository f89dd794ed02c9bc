//! Booking reference encoding and decoding.
//!
//! A booking reference packs the stay into a short string:
//!
//! ```text
//! 6  AS  JUN  17  19
//! |  |   |    |   +-- departure day
//! |  |   |    +------ arrival day
//! |  |   +----------- arrival month
//! |  +--------------- property short code
//! +------------------ years since the business epoch (any number of digits)
//! ```
//!
//! A departure day less than or equal to the arrival day means the guests
//! leave in the following month.

use crate::catalog::{is_valid_short_code, CatalogError, PropertyCatalog};
use crate::config::BusinessConfig;
use crate::month::{month_abbrev_of, month_from_abbrev};
use crate::property::PropertyConfig;
use chrono::{Datelike, NaiveDate};
use thiserror::Error;

/// Characters following the year prefix: code, month, two days.
const LAYOUT_LEN: usize = 2 + 3 + 2 + 2;

/// Errors decoding or encoding a booking reference.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The reference contains non-ASCII characters.
    #[error("booking reference '{0}' contains non-ASCII characters")]
    NotAscii(String),

    /// Fewer characters than the layout needs after the year prefix.
    #[error("booking reference '{reference}' is too short: expected {expected} characters after the year prefix, found {found}")]
    TooShort {
        /// The reference.
        reference: String,
        /// Characters required after the prefix.
        expected: usize,
        /// Characters present after the prefix.
        found: usize,
    },

    /// More characters than the layout allows after the year prefix.
    #[error("booking reference '{reference}' is too long: expected {expected} characters after the year prefix, found {found}")]
    TooLong {
        /// The reference.
        reference: String,
        /// Characters required after the prefix.
        expected: usize,
        /// Characters present after the prefix.
        found: usize,
    },

    /// The year prefix does not fit a calendar year.
    #[error("year offset '{0}' in booking reference is out of range")]
    YearOutOfRange(String),

    /// The property code is not two letters.
    #[error("invalid property code '{0}' in booking reference")]
    InvalidPropertyCode(String),

    /// The month abbreviation is not one of `JAN`..`DEC`.
    #[error("unknown month in booking reference: {0}")]
    UnknownMonth(String),

    /// A day field is not two digits.
    #[error("invalid {field} day '{value}' in booking reference")]
    InvalidDay {
        /// `arrival` or `departure`.
        field: &'static str,
        /// The raw two characters.
        value: String,
    },

    /// The fields do not form a real calendar date.
    #[error("{field} date {year:04}-{month:02}-{day:02} does not exist")]
    InvalidDate {
        /// `arrival` or `departure`.
        field: &'static str,
        /// Year.
        year: i32,
        /// Month.
        month: u32,
        /// Day.
        day: u32,
    },

    /// The reference names a property that is not in the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// Arrival falls before the business epoch year, so no offset exists.
    #[error("arrival year {year} is before the business epoch year {epoch_year}")]
    BeforeEpoch {
        /// Arrival year.
        year: i32,
        /// Epoch year.
        epoch_year: i32,
    },

    /// The stay has no nights: departure is on or before arrival.
    #[error("departure {departure} must be after arrival {arrival}")]
    EmptyStay {
        /// Arrival date.
        arrival: NaiveDate,
        /// Departure date.
        departure: NaiveDate,
    },

    /// Departure is later than the same day of the month after arrival,
    /// which a single departure day cannot express.
    #[error("stay from {arrival} to {departure} is too long for a booking reference")]
    StayTooLong {
        /// Arrival date.
        arrival: NaiveDate,
        /// Departure date.
        departure: NaiveDate,
    },
}

/// The fields packed into a booking reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DecodedReference {
    /// Years elapsed since the business epoch.
    pub year_offset: u32,
    /// How many digits the year offset used.
    pub prefix_len: usize,
    /// Calendar year of arrival.
    pub year: i32,
    /// Property short code.
    pub property_code: String,
    /// Arrival date.
    pub arrival: NaiveDate,
    /// Departure date.
    pub departure: NaiveDate,
}

impl DecodedReference {
    /// Number of nights between arrival and departure.
    #[must_use]
    pub fn nights(&self) -> i64 {
        (self.departure - self.arrival).num_days()
    }
}

/// Encoder/decoder for booking references, bound to a business epoch.
#[derive(Debug, Clone, Copy)]
pub struct ReferenceCodec<'a> {
    config: &'a BusinessConfig,
}

impl<'a> ReferenceCodec<'a> {
    /// Create a codec for the given business configuration.
    #[must_use]
    pub const fn new(config: &'a BusinessConfig) -> Self {
        Self { config }
    }

    /// Decode a booking reference.
    ///
    /// An unknown month abbreviation is logged as a warning and returned as
    /// [`ReferenceError::UnknownMonth`] so callers can reject the row.
    ///
    /// # Examples
    ///
    /// ```
    /// use holidaylet_core::{BusinessConfig, ReferenceCodec};
    ///
    /// let config = BusinessConfig::default();
    /// let decoded = ReferenceCodec::new(&config).decode("6ASJUN1719").unwrap();
    /// assert_eq!(decoded.year, 2017);
    /// assert_eq!(decoded.property_code, "AS");
    /// assert_eq!(decoded.nights(), 2);
    /// ```
    pub fn decode(&self, reference: &str) -> Result<DecodedReference, ReferenceError> {
        if !reference.is_ascii() {
            return Err(ReferenceError::NotAscii(reference.to_string()));
        }

        let prefix_len = reference.bytes().take_while(u8::is_ascii_digit).count();
        let (prefix, rest) = reference.split_at(prefix_len);

        if rest.len() != LAYOUT_LEN {
            let (expected, found) = (LAYOUT_LEN, rest.len());
            let reference = reference.to_string();
            return Err(if found < expected {
                ReferenceError::TooShort {
                    reference,
                    expected,
                    found,
                }
            } else {
                ReferenceError::TooLong {
                    reference,
                    expected,
                    found,
                }
            });
        }

        let year_offset: u32 = if prefix.is_empty() {
            0
        } else {
            prefix
                .parse()
                .map_err(|_| ReferenceError::YearOutOfRange(prefix.to_string()))?
        };
        let year = i32::try_from(year_offset)
            .ok()
            .and_then(|offset| self.config.epoch_year().checked_add(offset))
            .ok_or_else(|| ReferenceError::YearOutOfRange(prefix.to_string()))?;

        let (code, rest) = rest.split_at(2);
        if !code.bytes().all(|b| b.is_ascii_alphabetic()) {
            return Err(ReferenceError::InvalidPropertyCode(code.to_string()));
        }

        let (month_str, rest) = rest.split_at(3);
        let Some(month) = month_from_abbrev(month_str) else {
            tracing::warn!("unknown month in booking reference: {}", month_str);
            return Err(ReferenceError::UnknownMonth(month_str.to_string()));
        };

        let (arrival_day, departure_day) = rest.split_at(2);
        let arrival_day = parse_day("arrival", arrival_day)?;
        let departure_day = parse_day("departure", departure_day)?;

        let arrival = date("arrival", year, month, arrival_day)?;
        let departure = departure_date(arrival, departure_day)?;

        Ok(DecodedReference {
            year_offset,
            prefix_len,
            year,
            property_code: code.to_string(),
            arrival,
            departure,
        })
    }

    /// Decode a reference and resolve its property in the catalog.
    pub fn decode_with<'c>(
        &self,
        reference: &str,
        catalog: &'c PropertyCatalog,
    ) -> Result<(DecodedReference, &'c PropertyConfig), ReferenceError> {
        let decoded = self.decode(reference)?;
        let property = catalog.resolve(&decoded.property_code)?;
        Ok((decoded, property))
    }

    /// Encode a stay as a booking reference.
    ///
    /// Only the departure day is written; decoding recovers the month from
    /// whether that day falls after the arrival day. Stays with no nights,
    /// or ending after the same day of the following month, are rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use holidaylet_core::{BusinessConfig, NaiveDate, ReferenceCodec};
    ///
    /// let config = BusinessConfig::default();
    /// let arrival = NaiveDate::from_ymd_opt(2012, 12, 17).unwrap();
    /// let departure = NaiveDate::from_ymd_opt(2013, 1, 3).unwrap();
    /// let reference = ReferenceCodec::new(&config).encode("AM", arrival, departure).unwrap();
    /// assert_eq!(reference, "1AMDEC1703");
    /// ```
    pub fn encode(
        &self,
        property_code: &str,
        arrival: NaiveDate,
        departure: NaiveDate,
    ) -> Result<String, ReferenceError> {
        if !is_valid_short_code(property_code) {
            return Err(ReferenceError::InvalidPropertyCode(property_code.to_string()));
        }
        if departure <= arrival {
            return Err(ReferenceError::EmptyStay { arrival, departure });
        }
        if departure_date(arrival, departure.day()).ok() != Some(departure) {
            return Err(ReferenceError::StayTooLong { arrival, departure });
        }

        let epoch_year = self.config.epoch_year();
        let offset = arrival.year() - epoch_year;
        if offset < 0 {
            return Err(ReferenceError::BeforeEpoch {
                year: arrival.year(),
                epoch_year,
            });
        }

        Ok(format!(
            "{offset}{property_code}{}{:02}{:02}",
            month_abbrev_of(arrival),
            arrival.day(),
            departure.day()
        ))
    }
}

/// The departure a reference denotes: the next date after `arrival` that
/// falls on `departure_day`, in the arrival month or the one after.
fn departure_date(arrival: NaiveDate, departure_day: u32) -> Result<NaiveDate, ReferenceError> {
    let (year, month) = (arrival.year(), arrival.month());
    let (dep_year, dep_month) = if departure_day <= arrival.day() {
        if month == 12 {
            (year + 1, 1)
        } else {
            (year, month + 1)
        }
    } else {
        (year, month)
    };
    date("departure", dep_year, dep_month, departure_day)
}

fn parse_day(field: &'static str, value: &str) -> Result<u32, ReferenceError> {
    if value.len() == 2 && value.bytes().all(|b| b.is_ascii_digit()) {
        value.parse().map_err(|_| ReferenceError::InvalidDay {
            field,
            value: value.to_string(),
        })
    } else {
        Err(ReferenceError::InvalidDay {
            field,
            value: value.to_string(),
        })
    }
}

fn date(field: &'static str, year: i32, month: u32, day: u32) -> Result<NaiveDate, ReferenceError> {
    NaiveDate::from_ymd_opt(year, month, day).ok_or(ReferenceError::InvalidDate {
        field,
        year,
        month,
        day,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::sync::{Arc, Mutex};

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    fn decode(reference: &str) -> Result<DecodedReference, ReferenceError> {
        ReferenceCodec::new(&BusinessConfig::default()).decode(reference)
    }

    #[test]
    fn test_prefix_length() {
        assert_eq!(decode("AMJUN1719").unwrap().prefix_len, 0);
        assert_eq!(decode("1AMJUN1719").unwrap().prefix_len, 1);
        assert_eq!(decode("11AMJUN1719").unwrap().prefix_len, 2);
        assert_eq!(decode("111AMJUN1719").unwrap().prefix_len, 3);
    }

    #[test]
    fn test_year_from_offset() {
        assert_eq!(decode("AMJUN1719").unwrap().year, 2011);
        assert_eq!(decode("6ASJUN1719").unwrap().year, 2017);
        assert_eq!(decode("123ASJUN1719").unwrap().year, 2134);
    }

    #[test]
    fn test_decode_same_month() {
        let decoded = decode("6ASJUN1719").unwrap();
        assert_eq!(decoded.property_code, "AS");
        assert_eq!(decoded.arrival, date(2017, 6, 17));
        assert_eq!(decoded.departure, date(2017, 6, 19));
    }

    #[test]
    fn test_departure_rolls_into_next_year() {
        let decoded = decode("1ASDEC3103").unwrap();
        assert_eq!(decoded.arrival, date(2012, 12, 31));
        assert_eq!(decoded.departure, date(2013, 1, 3));
    }

    #[test]
    fn test_same_day_means_next_month() {
        let decoded = decode("1ASMAR1010").unwrap();
        assert_eq!(decoded.departure, date(2012, 4, 10));
        assert_eq!(decoded.nights(), 31);
    }

    #[test]
    fn test_unknown_month() {
        assert_eq!(
            decode("1ASJUB1719").unwrap_err(),
            ReferenceError::UnknownMonth("JUB".to_string())
        );
    }

    #[test]
    fn test_lowercase_month_rejected() {
        assert!(matches!(
            decode("1ASJun1719"),
            Err(ReferenceError::UnknownMonth(_))
        ));
    }

    #[test]
    fn test_too_short() {
        assert_eq!(
            decode("1ASJUN17").unwrap_err(),
            ReferenceError::TooShort {
                reference: "1ASJUN17".to_string(),
                expected: 9,
                found: 7,
            }
        );
        assert!(matches!(decode(""), Err(ReferenceError::TooShort { .. })));
    }

    #[test]
    fn test_too_long() {
        assert!(matches!(
            decode("1ASJUN171922"),
            Err(ReferenceError::TooLong { found: 11, .. })
        ));
    }

    #[test]
    fn test_non_ascii() {
        assert!(matches!(
            decode("1ÅSJUN1719"),
            Err(ReferenceError::NotAscii(_))
        ));
    }

    #[test]
    fn test_bad_days() {
        assert_eq!(
            decode("1ASJUN1x19").unwrap_err(),
            ReferenceError::InvalidDay {
                field: "arrival",
                value: "1x".to_string(),
            }
        );
        assert!(matches!(
            decode("1ASFEB3001"),
            Err(ReferenceError::InvalidDate { field: "arrival", .. })
        ));
        // 31st of the month after January 31st does not exist.
        assert!(matches!(
            decode("1ASJAN3131"),
            Err(ReferenceError::InvalidDate { field: "departure", .. })
        ));
    }

    #[test]
    fn test_property_code_must_be_letters() {
        assert_eq!(
            decode("1A-JUN1719").unwrap_err(),
            ReferenceError::InvalidPropertyCode("A-".to_string())
        );
    }

    #[test]
    fn test_year_offset_overflow() {
        assert!(matches!(
            decode("99999999999ASJUN1719"),
            Err(ReferenceError::YearOutOfRange(_))
        ));
    }

    #[test]
    fn test_encode() {
        let config = BusinessConfig::default();
        let codec = ReferenceCodec::new(&config);
        assert_eq!(
            codec
                .encode("AM", date(2012, 12, 17), date(2013, 1, 3))
                .unwrap(),
            "1AMDEC1703"
        );
        assert_eq!(
            codec
                .encode("AS", date(2017, 6, 17), date(2017, 6, 19))
                .unwrap(),
            "6ASJUN1719"
        );
        assert_eq!(
            codec
                .encode("AS", date(2011, 6, 1), date(2011, 6, 9))
                .unwrap(),
            "0ASJUN0109"
        );
    }

    #[test]
    fn test_encode_before_epoch() {
        let config = BusinessConfig::default();
        assert_eq!(
            ReferenceCodec::new(&config)
                .encode("AS", date(2010, 6, 1), date(2010, 6, 9))
                .unwrap_err(),
            ReferenceError::BeforeEpoch {
                year: 2010,
                epoch_year: 2011,
            }
        );
    }

    #[test]
    fn test_encode_rejects_empty_stay() {
        let config = BusinessConfig::default();
        let codec = ReferenceCodec::new(&config);
        assert_eq!(
            codec
                .encode("AM", date(2012, 6, 17), date(2012, 6, 17))
                .unwrap_err(),
            ReferenceError::EmptyStay {
                arrival: date(2012, 6, 17),
                departure: date(2012, 6, 17),
            }
        );
        assert!(matches!(
            codec.encode("AM", date(2012, 6, 17), date(2012, 6, 10)),
            Err(ReferenceError::EmptyStay { .. })
        ));
    }

    #[test]
    fn test_encode_rejects_long_stay() {
        let config = BusinessConfig::default();
        let codec = ReferenceCodec::new(&config);
        assert_eq!(
            codec
                .encode("AM", date(2012, 6, 1), date(2012, 7, 11))
                .unwrap_err(),
            ReferenceError::StayTooLong {
                arrival: date(2012, 6, 1),
                departure: date(2012, 7, 11),
            }
        );
        assert!(matches!(
            codec.encode("AM", date(2012, 6, 17), date(2012, 8, 10)),
            Err(ReferenceError::StayTooLong { .. })
        ));
        // The same day of the next month is the longest stay a reference holds.
        assert_eq!(
            codec
                .encode("AM", date(2012, 6, 17), date(2012, 7, 17))
                .unwrap(),
            "1AMJUN1717"
        );
        assert_eq!(
            codec
                .encode("AM", date(2012, 1, 31), date(2012, 2, 29))
                .unwrap(),
            "1AMJAN3129"
        );
    }

    #[test]
    fn test_encode_rejects_bad_property_code() {
        let config = BusinessConfig::default();
        let codec = ReferenceCodec::new(&config);
        for code in ["1A", "A", "ABC", ""] {
            assert_eq!(
                codec
                    .encode(code, date(2012, 6, 17), date(2012, 6, 19))
                    .unwrap_err(),
                ReferenceError::InvalidPropertyCode(code.to_string())
            );
        }
    }

    #[test]
    fn test_encoded_reference_decodes_to_same_stay() {
        let config = BusinessConfig::default();
        let codec = ReferenceCodec::new(&config);
        let reference = codec
            .encode("AM", date(2012, 1, 31), date(2012, 2, 29))
            .unwrap();
        let decoded = codec.decode(&reference).unwrap();
        assert_eq!(decoded.arrival, date(2012, 1, 31));
        assert_eq!(decoded.departure, date(2012, 2, 29));
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_unknown_month_logs_warning() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::WARN)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || decode("1ASJUB1719"));

        assert_eq!(
            result.unwrap_err(),
            ReferenceError::UnknownMonth("JUB".to_string())
        );
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("WARN"));
        assert!(output.contains("unknown month in booking reference: JUB"));
    }

    #[test]
    fn test_custom_epoch() {
        let config = BusinessConfig::with_epoch(date(2020, 3, 1));
        let decoded = ReferenceCodec::new(&config).decode("2ASJUN1719").unwrap();
        assert_eq!(decoded.arrival, date(2022, 6, 17));
    }
}
