//! Booking channels.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The channel a booking came through.
///
/// Ordinals (1..=6) and labels are stable: they appear in import and export
/// spreadsheets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Source {
    /// The booking site (`booking.com`).
    BookingSite,
    /// `airbnb`.
    AirBnb,
    /// Booked by email.
    Email,
    /// Booked by phone.
    Phone,
    /// Walk-in booking at the office (`visit`).
    WalkIn,
    /// Anything else.
    Other,
}

/// Fixed label table, indexed by `ordinal - 1`.
const LABELS: [(Source, &str); 6] = [
    (Source::BookingSite, "booking.com"),
    (Source::AirBnb, "airbnb"),
    (Source::Email, "email"),
    (Source::Phone, "phone"),
    (Source::WalkIn, "visit"),
    (Source::Other, "other"),
];

/// Error returned when a label does not name a known source.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown booking source '{0}'")]
pub struct UnknownSource(pub String);

impl Source {
    /// All sources in ordinal order.
    pub const ALL: [Self; 6] = [
        Self::BookingSite,
        Self::AirBnb,
        Self::Email,
        Self::Phone,
        Self::WalkIn,
        Self::Other,
    ];

    /// The spreadsheet label for this source.
    #[must_use]
    pub const fn label(self) -> &'static str {
        LABELS[self.ordinal() as usize - 1].1
    }

    /// Stable ordinal, starting at 1.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        match self {
            Self::BookingSite => 1,
            Self::AirBnb => 2,
            Self::Email => 3,
            Self::Phone => 4,
            Self::WalkIn => 5,
            Self::Other => 6,
        }
    }

    /// Look a source up by its ordinal.
    #[must_use]
    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        Self::ALL.get(usize::from(ordinal).checked_sub(1)?).copied()
    }

    /// Look a source up by its exact spreadsheet label.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        LABELS
            .iter()
            .find(|(_, l)| *l == label)
            .map(|(source, _)| *source)
    }
}

impl FromStr for Source {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| UnknownSource(s.to_string()))
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl Serialize for Source {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.label())
    }
}

impl<'de> Deserialize<'de> for Source {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let label = String::deserialize(deserializer)?;
        label.parse().map_err(serde::de::Error::custom)
    }
}
