//! Business-wide constants for a single batch run.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Immutable business configuration shared by the reference codec and the
/// fee calculator.
///
/// Built once per run (usually from the settings file) and passed by
/// reference; nothing in the workspace keeps process-wide state.
///
/// # Examples
///
/// ```
/// use holidaylet_core::BusinessConfig;
/// use chrono::Datelike;
///
/// let config = BusinessConfig::default();
/// assert_eq!(config.epoch.year(), 2011);
/// assert_eq!(config.epoch_year(), 2011);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessConfig {
    /// The date the business started trading. Year offsets in booking
    /// references count from this date's year.
    pub epoch: NaiveDate,
    /// Commission rate applied to bookings made through the booking site,
    /// overriding the property's own booking commission.
    pub booking_site_commission: Decimal,
    /// Minimum house-owner fee charged per booking.
    pub house_owner_fee_floor: Decimal,
}

impl BusinessConfig {
    /// Default business epoch, 2011-01-01.
    pub const DEFAULT_EPOCH: (i32, u32, u32) = (2011, 1, 1);

    /// Create a configuration with an explicit epoch and the default rates.
    #[must_use]
    pub fn with_epoch(epoch: NaiveDate) -> Self {
        Self {
            epoch,
            ..Self::default()
        }
    }

    /// The calendar year of the business epoch.
    #[must_use]
    pub fn epoch_year(&self) -> i32 {
        chrono::Datelike::year(&self.epoch)
    }
}

impl Default for BusinessConfig {
    fn default() -> Self {
        let (y, m, d) = Self::DEFAULT_EPOCH;
        Self {
            epoch: NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN),
            booking_site_commission: Decimal::new(15, 2),
            house_owner_fee_floor: Decimal::from(35),
        }
    }
}
