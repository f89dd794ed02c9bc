//! Holidaylet fee engine.
//!
//! This crate provides:
//! - Commission and service-fee calculation ([`compute_fees`])
//! - Assembly of a priced booking from a raw input ([`assemble`])
//! - Reconciliation of spreadsheet rows to the current charging rules
//!   ([`reconcile`])
//!
//! # Fees
//!
//! ```text
//! booking_fee     = rate * gross            (rate = 0.15 on the booking site)
//! net             = gross - booking_fee
//! house_owner_fee = max(35, house_owner_commission * net)
//! total_fees      = services + house_owner_fee
//! owner_income    = net - total_fees
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod assemble;
mod fees;
mod reconcile;

pub use assemble::{assemble, BookingError, ComputedBooking};
pub use fees::{compute_fees, services_cost, FeeError, Fees, ServiceCosts};
pub use reconcile::{reconcile, reconcile_row, ReconciledRow};
