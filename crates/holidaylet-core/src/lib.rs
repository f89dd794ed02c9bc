//! Core types for holidaylet
//!
//! This crate provides the building blocks shared by the rest of the
//! workspace:
//!
//! - [`BusinessConfig`] - Epoch date and business-wide rates for a run
//! - [`PropertyConfig`] - Per-property commissions and service prices
//! - [`PropertyCatalog`] - Validated lookup of properties by short code
//! - [`Source`] - The channel a booking came through
//! - [`RawBookingInput`] - An unreconciled booking
//! - [`ReferenceCodec`] - Decoding and encoding of booking references
//!
//! # Example
//!
//! ```
//! use holidaylet_core::{BusinessConfig, NaiveDate, ReferenceCodec};
//!
//! let config = BusinessConfig::default();
//! let codec = ReferenceCodec::new(&config);
//!
//! let decoded = codec.decode("1ASDEC3103").unwrap();
//! assert_eq!(decoded.arrival, NaiveDate::from_ymd_opt(2012, 12, 31).unwrap());
//! assert_eq!(decoded.departure, NaiveDate::from_ymd_opt(2013, 1, 3).unwrap());
//!
//! let again = codec
//!     .encode(&decoded.property_code, decoded.arrival, decoded.departure)
//!     .unwrap();
//! assert_eq!(again, "1ASDEC3103");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod booking;
pub mod catalog;
pub mod config;
pub mod month;
pub mod property;
pub mod reference;
pub mod source;

pub use booking::{RawBookingInput, Services};
pub use catalog::{CatalogError, PropertyCatalog};
pub use config::BusinessConfig;
pub use month::{month_abbrev, month_abbrev_of, month_from_abbrev};
pub use property::{PriceTier, PropertyConfig, TIER_SIZE};
pub use reference::{DecodedReference, ReferenceCodec, ReferenceError};
pub use source::{Source, UnknownSource};

// Re-export commonly used external types
pub use chrono::NaiveDate;
pub use rust_decimal::Decimal;
