//! Settings document layout.

use chrono::NaiveDate;
use holidaylet_core::BusinessConfig;
use rust_decimal::Decimal;
use serde::Deserialize;

/// The raw settings document.
#[derive(Debug, Clone, Deserialize)]
pub struct SettingsDocument {
    /// Business-wide settings; every field is optional.
    #[serde(default)]
    pub business: BusinessSection,
    /// Property records in catalog order.
    pub properties: Vec<PropertyRecord>,
}

/// Optional overrides for [`BusinessConfig`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BusinessSection {
    /// Business epoch date, `YYYY-MM-DD`.
    pub epoch: Option<NaiveDate>,
    /// Booking-site commission rate.
    pub booking_site_commission: Option<Decimal>,
    /// Minimum house-owner fee.
    pub house_owner_fee_floor: Option<Decimal>,
}

impl BusinessSection {
    /// Fill missing fields from the defaults.
    pub fn into_config(self) -> BusinessConfig {
        let defaults = BusinessConfig::default();
        BusinessConfig {
            epoch: self.epoch.unwrap_or(defaults.epoch),
            booking_site_commission: self
                .booking_site_commission
                .unwrap_or(defaults.booking_site_commission),
            house_owner_fee_floor: self
                .house_owner_fee_floor
                .unwrap_or(defaults.house_owner_fee_floor),
        }
    }
}

/// One property as written in the settings file.
#[derive(Debug, Clone, Deserialize)]
pub struct PropertyRecord {
    /// Display name.
    pub long_name: String,
    /// Two-letter reference code.
    pub short_name: String,
    /// Calendar identifier.
    #[serde(default)]
    pub calendar: String,
    /// Management commission rate.
    pub commission: Decimal,
    /// Booking commission rate.
    pub booking_commission: Decimal,
    /// House-owner commission rate.
    pub house_owner_commission: Decimal,
    /// Greeting price.
    pub greeting: Decimal,
    /// Laundry prices by party size; must have six entries.
    pub laundry: Vec<Decimal>,
    /// Cleaning price.
    pub cleaning: Decimal,
    /// Consumables prices by party size; must have six entries.
    pub consumables: Vec<Decimal>,
}
