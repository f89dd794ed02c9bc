//! Three-letter month abbreviations used in booking references.

use chrono::{Datelike, NaiveDate};

/// Abbreviations indexed by `month - 1`.
const ABBREVIATIONS: [&str; 12] = [
    "JAN", "FEB", "MAR", "APR", "MAY", "JUN", "JUL", "AUG", "SEP", "OCT", "NOV", "DEC",
];

/// Map an uppercase abbreviation to its month number (1..=12).
///
/// Matching is case-sensitive: `"Jun"` is not a month.
#[must_use]
pub fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    ABBREVIATIONS
        .iter()
        .position(|a| *a == abbrev)
        .map(|i| i as u32 + 1)
}

/// The abbreviation for month number `month` (1..=12).
#[must_use]
pub fn month_abbrev(month: u32) -> Option<&'static str> {
    let index = usize::try_from(month).ok()?.checked_sub(1)?;
    ABBREVIATIONS.get(index).copied()
}

/// The abbreviation for the month a date falls in.
#[must_use]
pub fn month_abbrev_of(date: NaiveDate) -> &'static str {
    ABBREVIATIONS[date.month0() as usize]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_month_roundtrips() {
        for month in 1..=12 {
            let abbrev = month_abbrev(month).unwrap();
            assert_eq!(month_from_abbrev(abbrev), Some(month));
        }
    }

    #[test]
    fn test_case_sensitive() {
        assert_eq!(month_from_abbrev("Jun"), None);
        assert_eq!(month_from_abbrev("JUB"), None);
    }

    #[test]
    fn test_abbrev_of_date() {
        let date = NaiveDate::from_ymd_opt(2012, 12, 31).unwrap();
        assert_eq!(month_abbrev_of(date), "DEC");
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(month_abbrev(0), None);
        assert_eq!(month_abbrev(13), None);
    }
}
