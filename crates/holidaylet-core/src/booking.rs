//! Raw booking records as they arrive from a form or an import.

use crate::source::Source;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Opt-in flags for the ancillary services charged to the owner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Services {
    /// Guest greeting.
    pub greeting: bool,
    /// Laundry, priced by party size.
    pub laundry: bool,
    /// Cleaning.
    pub cleaning: bool,
    /// Consumables, priced by party size.
    pub consumables: bool,
}

impl Services {
    /// Every service opted in.
    pub const ALL: Self = Self {
        greeting: true,
        laundry: true,
        cleaning: true,
        consumables: true,
    };

    /// No services opted in.
    pub const NONE: Self = Self {
        greeting: false,
        laundry: false,
        cleaning: false,
        consumables: false,
    };
}

/// An unreconciled booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawBookingInput {
    /// Encoded booking reference, e.g. `6ASJUN1719`.
    pub reference: String,
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email.
    pub email: String,
    /// Guest mobile number.
    pub mobile: String,
    /// Free-text notes.
    pub notes: String,
    /// Channel the booking came through.
    pub source: Source,
    /// Number of guests; must be at least one.
    pub party_size: u32,
    /// Gross price paid by the guest.
    pub gross: Decimal,
    /// Services opted into.
    pub services: Services,
    /// Date the booking was made.
    pub booking_date: NaiveDate,
}

impl RawBookingInput {
    /// Create a booking with empty guest details and no services.
    pub fn new(
        reference: impl Into<String>,
        source: Source,
        party_size: u32,
        gross: Decimal,
        booking_date: NaiveDate,
    ) -> Self {
        Self {
            reference: reference.into(),
            first_name: String::new(),
            last_name: String::new(),
            email: String::new(),
            mobile: String::new(),
            notes: String::new(),
            source,
            party_size,
            gross,
            services: Services::NONE,
            booking_date,
        }
    }

    /// Set the guest's name.
    pub fn with_guest(mut self, first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        self.first_name = first_name.into();
        self.last_name = last_name.into();
        self
    }

    /// Set the guest's contact details.
    pub fn with_contact(mut self, email: impl Into<String>, mobile: impl Into<String>) -> Self {
        self.email = email.into();
        self.mobile = mobile.into();
        self
    }

    /// Set the notes.
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }

    /// Set the opted-in services.
    pub const fn with_services(mut self, services: Services) -> Self {
        self.services = services;
        self
    }
}
