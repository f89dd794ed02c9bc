//! Holidaylet CLI tools.
//!
//! This crate provides command-line tools for reconciling holiday-rental
//! booking spreadsheets:
//!
//! - `holidaylet-fix`: Recompute every booking in a spreadsheet against the
//!   property settings and write the corrected sheet
//! - `holidaylet-ref`: Decode or encode a single booking reference
//!
//! # Example Usage
//!
//! ```bash
//! holidaylet-fix bookings.csv --settings settings.json --output out.csv
//! holidaylet-ref decode 6ASJUN1719 --settings settings.json
//! holidaylet-ref encode --property AM --arrival 2012-12-17 --departure 2013-01-03
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cmd;
