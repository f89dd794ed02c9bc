//! Settings loader for holidaylet.
//!
//! Reads the JSON settings document describing every property and the
//! business-wide constants, and turns it into a validated
//! [`PropertyCatalog`] plus a [`BusinessConfig`].
//!
//! # Example
//!
//! ```
//! use holidaylet_loader::parse_settings;
//!
//! let settings = parse_settings(r#"{
//!   "properties": [
//!     { "long_name": "FooBarBaz", "short_name": "FB", "calendar": "calendar@mycalendar.com",
//!       "commission": 0.1, "booking_commission": 0.0, "house_owner_commission": 0.1,
//!       "greeting": 15, "laundry": [10,10,15,15,25,25], "cleaning": 35,
//!       "consumables": [15,15,25,25,35,35] }
//!   ]
//! }"#).unwrap();
//!
//! assert_eq!(settings.catalog.len(), 1);
//! assert_eq!(settings.business.epoch_year(), 2011);
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod settings;

pub use settings::{BusinessSection, PropertyRecord, SettingsDocument};

use holidaylet_core::{
    BusinessConfig, CatalogError, PriceTier, PropertyCatalog, PropertyConfig, TIER_SIZE,
};
use rust_decimal::Decimal;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur loading settings. All of them end the run.
#[derive(Debug, Error)]
pub enum LoadError {
    /// IO error reading the settings file.
    #[error("failed to read settings file {path}: {source}")]
    Io {
        /// The path that failed to read.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid settings JSON.
    #[error("invalid settings JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A price tier does not have one entry per party size.
    #[error("property {property}: {tier} must have {expected} prices, found {found}")]
    TierLength {
        /// Short code of the property.
        property: String,
        /// `laundry` or `consumables`.
        tier: &'static str,
        /// Required length.
        expected: usize,
        /// Actual length.
        found: usize,
    },

    /// The properties do not form a valid catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

/// Loaded settings for a run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// Business-wide constants.
    pub business: BusinessConfig,
    /// Every configured property.
    pub catalog: PropertyCatalog,
}

/// Load settings from a JSON file.
pub fn load_settings(path: &Path) -> Result<Settings, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let settings = parse_settings(&content)?;
    tracing::debug!(
        "loaded {} properties from {}",
        settings.catalog.len(),
        path.display()
    );
    Ok(settings)
}

/// Parse settings from a JSON string.
pub fn parse_settings(content: &str) -> Result<Settings, LoadError> {
    let document: SettingsDocument = serde_json::from_str(content)?;
    build_settings(document)
}

/// Validate a parsed settings document.
pub fn build_settings(document: SettingsDocument) -> Result<Settings, LoadError> {
    let properties = document
        .properties
        .into_iter()
        .map(property_config)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Settings {
        business: document.business.into_config(),
        catalog: PropertyCatalog::new(properties)?,
    })
}

fn property_config(record: PropertyRecord) -> Result<PropertyConfig, LoadError> {
    let laundry = tier(&record.short_name, "laundry", record.laundry)?;
    let consumables = tier(&record.short_name, "consumables", record.consumables)?;

    Ok(PropertyConfig {
        short_code: record.short_name,
        long_name: record.long_name,
        calendar: record.calendar,
        commission: record.commission,
        booking_commission: record.booking_commission,
        house_owner_commission: record.house_owner_commission,
        greeting: record.greeting,
        laundry,
        cleaning: record.cleaning,
        consumables,
    })
}

fn tier(property: &str, name: &'static str, prices: Vec<Decimal>) -> Result<PriceTier, LoadError> {
    let found = prices.len();
    prices.try_into().map_err(|_| LoadError::TierLength {
        property: property.to_string(),
        tier: name,
        expected: TIER_SIZE,
        found,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    const TWO_PROPERTIES: &str = r#"{ "properties": [
      { "long_name" : "FooBarBaz", "short_name" : "FB", "calendar" : "calendar@mycalendar.com",
        "commission" : 0.1, "booking_commission" : 0.0, "house_owner_commission" : 0.1,
        "greeting" : 15, "laundry" : [10,10,15,15,25,25], "cleaning" : 35,
        "consumables" : [15,15,25,25,35,35] },
      { "long_name" : "WibbleWobbleWoo", "short_name" : "WW", "calendar" : "calendar2@mycalendar.com",
        "commission" : 0.2, "booking_commission" : 0.1, "house_owner_commission" : 0.3,
        "greeting" : 25, "laundry" : [15,15,20,20,35,35], "cleaning" : 35,
        "consumables" : [15,15,25,25,35,35] }
    ]}"#;

    #[test]
    fn test_parse_properties() {
        let settings = parse_settings(TWO_PROPERTIES).unwrap();
        assert_eq!(settings.catalog.len(), 2);

        let ww = settings.catalog.get("WW").unwrap();
        assert_eq!(ww.long_name, "WibbleWobbleWoo");
        assert_eq!(ww.house_owner_commission, dec!(0.3));
        assert_eq!(ww.laundry[4], dec!(35));
        assert_eq!(ww.calendar, "calendar2@mycalendar.com");
    }

    #[test]
    fn test_business_defaults() {
        let settings = parse_settings(TWO_PROPERTIES).unwrap();
        assert_eq!(settings.business, BusinessConfig::default());
    }

    #[test]
    fn test_business_overrides() {
        let json = TWO_PROPERTIES.replacen(
            "{ \"properties\"",
            "{ \"business\": { \"epoch\": \"2014-04-01\", \"house_owner_fee_floor\": 40 }, \"properties\"",
            1,
        );
        let settings = parse_settings(&json).unwrap();
        assert_eq!(settings.business.epoch_year(), 2014);
        assert_eq!(settings.business.house_owner_fee_floor, dec!(40));
        assert_eq!(settings.business.booking_site_commission, dec!(0.15));
    }

    #[test]
    fn test_short_tier_rejected() {
        let json = TWO_PROPERTIES.replacen("[10,10,15,15,25,25]", "[10,10,15]", 1);
        let err = parse_settings(&json).unwrap_err();
        assert!(matches!(
            err,
            LoadError::TierLength {
                tier: "laundry",
                found: 3,
                ..
            }
        ));
        assert_eq!(
            err.to_string(),
            "property FB: laundry must have 6 prices, found 3"
        );
    }

    #[test]
    fn test_no_properties_is_fatal() {
        let err = parse_settings(r#"{ "properties": [] }"#).unwrap_err();
        assert!(matches!(err, LoadError::Catalog(CatalogError::Empty)));
    }

    #[test]
    fn test_invalid_json() {
        assert!(matches!(
            parse_settings("{ not json"),
            Err(LoadError::Json(_))
        ));
    }
}
