//! Reconciliation of spreadsheet rows against current settings.
//!
//! Historic rows were priced inconsistently. Reconciling a row charges every
//! service and recomputes all money fields from the property settings.

use crate::assemble::{assemble, BookingError, ComputedBooking};
use chrono::NaiveDate;
use holidaylet_core::{BusinessConfig, PropertyCatalog, RawBookingInput, Services, Source};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A corrected spreadsheet row, ready for export.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciledRow {
    /// Booking reference as imported.
    pub booking_ref: String,
    /// Property long name.
    pub property: String,
    /// Guest first name.
    pub first_name: String,
    /// Guest last name.
    pub last_name: String,
    /// Guest email.
    pub email: String,
    /// Guest mobile.
    pub mobile: String,
    /// Notes.
    pub notes: String,
    /// Date the booking was made.
    pub booking_date: NaiveDate,
    /// Booking channel.
    pub source: Source,
    /// Arrival date.
    pub arrival: NaiveDate,
    /// Departure date.
    pub departure: NaiveDate,
    /// Number of guests.
    pub party_size: u32,
    /// Gross price.
    pub gross: Decimal,
    /// Gross less booking fee.
    pub net: Decimal,
    /// Always `false` after reconciliation.
    pub is_discount: bool,
    /// Property management commission rate.
    pub commission: Decimal,
    /// Payment due date, the booking date.
    pub due_date: NaiveDate,
    /// Always `true` after reconciliation.
    pub is_commission: bool,
    /// Greeting charge.
    pub greeting: Decimal,
    /// Laundry charge.
    pub laundry: Decimal,
    /// Cleaning charge.
    pub cleaning: Decimal,
    /// Consumables charge.
    pub consumables: Decimal,
    /// Booking channel commission.
    pub booking_fee: Decimal,
    /// House-owner fee.
    pub house_owner_fee: Decimal,
    /// Services plus house-owner fee.
    pub total_fees: Decimal,
    /// Owner income.
    pub owner_income: Decimal,
}

impl ReconciledRow {
    /// Build the export row from a computed booking.
    pub fn from_booking(booking: &ComputedBooking) -> Self {
        let input = &booking.input;
        let fees = &booking.fees;
        Self {
            booking_ref: input.reference.clone(),
            property: booking.property.long_name.clone(),
            first_name: input.first_name.clone(),
            last_name: input.last_name.clone(),
            email: input.email.clone(),
            mobile: input.mobile.clone(),
            notes: input.notes.clone(),
            booking_date: input.booking_date,
            source: input.source,
            arrival: booking.reference.arrival,
            departure: booking.reference.departure,
            party_size: input.party_size,
            gross: input.gross,
            net: fees.net,
            is_discount: false,
            commission: booking.property.commission,
            due_date: input.booking_date,
            is_commission: true,
            greeting: fees.services.greeting,
            laundry: fees.services.laundry,
            cleaning: fees.services.cleaning,
            consumables: fees.services.consumables,
            booking_fee: fees.booking_fee,
            house_owner_fee: fees.house_owner_fee,
            total_fees: fees.total_fees,
            owner_income: fees.owner_income,
        }
    }

    /// Recover the raw input this row was derived from, with every service
    /// opted in.
    pub fn to_input(&self) -> RawBookingInput {
        RawBookingInput::new(
            self.booking_ref.clone(),
            self.source,
            self.party_size,
            self.gross,
            self.booking_date,
        )
        .with_guest(self.first_name.clone(), self.last_name.clone())
        .with_contact(self.email.clone(), self.mobile.clone())
        .with_notes(self.notes.clone())
        .with_services(Services::ALL)
    }
}

/// Recompute a booking with every service charged.
pub fn reconcile(
    input: &RawBookingInput,
    catalog: &PropertyCatalog,
    config: &BusinessConfig,
) -> Result<ReconciledRow, BookingError> {
    let forced = RawBookingInput {
        services: Services::ALL,
        ..input.clone()
    };
    let booking = assemble(&forced, catalog, config)?;

    match booking.canonical_reference(config) {
        Ok(canonical) if canonical != input.reference => {
            tracing::warn!(
                "booking reference {} is not canonical, expected {}",
                input.reference,
                canonical
            );
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("cannot re-encode booking reference {}: {}", input.reference, e),
    }
    tracing::debug!(
        reference = %input.reference,
        owner_income = %booking.fees.owner_income,
        "reconciled booking"
    );

    Ok(ReconciledRow::from_booking(&booking))
}

/// Reconcile a row that has already been exported once.
pub fn reconcile_row(
    row: &ReconciledRow,
    catalog: &PropertyCatalog,
    config: &BusinessConfig,
) -> Result<ReconciledRow, BookingError> {
    reconcile(&row.to_input(), catalog, config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holidaylet_core::PropertyConfig;
    use rust_decimal_macros::dec;

    fn catalog() -> PropertyCatalog {
        PropertyCatalog::new(vec![PropertyConfig {
            short_code: "AM".to_string(),
            long_name: "Amberley".to_string(),
            calendar: "amberley@calendar".to_string(),
            commission: dec!(0.125),
            booking_commission: dec!(0.1),
            house_owner_commission: dec!(0.1),
            greeting: dec!(15),
            laundry: [10, 10, 15, 15, 25, 25].map(Decimal::from),
            cleaning: dec!(35),
            consumables: [15, 15, 25, 25, 35, 35].map(Decimal::from),
        }])
        .unwrap()
    }

    fn input() -> RawBookingInput {
        RawBookingInput::new(
            "1AMDEC1703",
            Source::Email,
            3,
            dec!(600),
            NaiveDate::from_ymd_opt(2012, 5, 20).unwrap(),
        )
        .with_guest("Ada", "Lovelace")
        .with_contact("ada@example.com", "07700 900000")
        .with_notes("late arrival")
    }

    #[test]
    fn test_reconcile_forces_services() {
        let row = reconcile(&input(), &catalog(), &BusinessConfig::default()).unwrap();

        assert_eq!(row.property, "Amberley");
        assert_eq!(row.arrival, NaiveDate::from_ymd_opt(2012, 12, 17).unwrap());
        assert_eq!(row.departure, NaiveDate::from_ymd_opt(2013, 1, 3).unwrap());
        assert_eq!(row.greeting, dec!(15));
        assert_eq!(row.laundry, dec!(15));
        assert_eq!(row.cleaning, dec!(35));
        assert_eq!(row.consumables, dec!(25));
        assert_eq!(row.booking_fee, dec!(60));
        assert_eq!(row.net, dec!(540));
        assert_eq!(row.house_owner_fee, dec!(54));
        assert_eq!(row.total_fees, dec!(144));
        assert_eq!(row.owner_income, dec!(396));
    }

    #[test]
    fn test_reconcile_fixed_flags() {
        let row = reconcile(&input(), &catalog(), &BusinessConfig::default()).unwrap();
        assert!(!row.is_discount);
        assert!(row.is_commission);
        assert_eq!(row.due_date, row.booking_date);
        assert_eq!(row.commission, dec!(0.125));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let config = BusinessConfig::default();
        let once = reconcile(&input(), &catalog(), &config).unwrap();
        let twice = reconcile_row(&once, &catalog(), &config).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_to_input_keeps_guest_details() {
        let row = reconcile(&input(), &catalog(), &BusinessConfig::default()).unwrap();
        let back = row.to_input();
        assert_eq!(back, input().with_services(Services::ALL));
    }
}
