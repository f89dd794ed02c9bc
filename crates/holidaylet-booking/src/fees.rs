//! Commission and service-fee calculation.

use holidaylet_core::{BusinessConfig, PropertyConfig, RawBookingInput, Source};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur computing fees.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeeError {
    /// A booking must be for at least one guest.
    #[error("party size must be at least 1, got {0}")]
    InvalidPartySize(u32),

    /// The gross price cannot be negative.
    #[error("gross amount must not be negative, got {0}")]
    NegativeGross(Decimal),
}

/// Charges for the opted-in services. Services not opted into are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceCosts {
    /// Greeting charge.
    pub greeting: Decimal,
    /// Laundry charge for the party size.
    pub laundry: Decimal,
    /// Cleaning charge.
    pub cleaning: Decimal,
    /// Consumables charge for the party size.
    pub consumables: Decimal,
}

impl ServiceCosts {
    /// Sum of all service charges.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.greeting + self.laundry + self.cleaning + self.consumables
    }
}

/// The derived money fields of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fees {
    /// Booking commission rate that was applied.
    pub booking_commission_rate: Decimal,
    /// Commission taken by the booking channel.
    pub booking_fee: Decimal,
    /// Gross less the booking fee.
    pub net: Decimal,
    /// Fee retained from the net, never below the configured floor.
    pub house_owner_fee: Decimal,
    /// Per-service charges.
    pub services: ServiceCosts,
    /// Services plus the house-owner fee.
    pub total_fees: Decimal,
    /// What is left for the owner.
    pub owner_income: Decimal,
}

impl Fees {
    /// Sum of the service charges.
    #[must_use]
    pub fn services_cost(&self) -> Decimal {
        self.services.total()
    }
}

/// Compute the fees for a booking at a property.
///
/// Bookings through the booking site always pay the configured booking-site
/// commission; other channels pay the property's own booking commission.
///
/// # Example
///
/// ```
/// use holidaylet_booking::compute_fees;
/// use holidaylet_core::{BusinessConfig, Decimal, NaiveDate, PropertyConfig, RawBookingInput, Services, Source};
///
/// let property = PropertyConfig {
///     short_code: "FB".into(),
///     long_name: "FooBarBaz".into(),
///     calendar: String::new(),
///     commission: Decimal::new(1, 1),
///     booking_commission: Decimal::ZERO,
///     house_owner_commission: Decimal::new(1, 1),
///     greeting: Decimal::from(15),
///     laundry: [10, 10, 15, 15, 25, 25].map(Decimal::from),
///     cleaning: Decimal::from(35),
///     consumables: [15, 15, 25, 25, 35, 35].map(Decimal::from),
/// };
/// let date = NaiveDate::from_ymd_opt(2017, 5, 20).unwrap();
/// let input = RawBookingInput::new("6FBJUN1719", Source::Email, 2, Decimal::from(1000), date)
///     .with_services(Services::ALL);
///
/// let fees = compute_fees(&input, &property, &BusinessConfig::default()).unwrap();
/// assert_eq!(fees.net, Decimal::from(1000));
/// assert_eq!(fees.house_owner_fee, Decimal::from(100));
/// assert_eq!(fees.total_fees, Decimal::from(175));
/// assert_eq!(fees.owner_income, Decimal::from(825));
/// ```
pub fn compute_fees(
    input: &RawBookingInput,
    property: &PropertyConfig,
    config: &BusinessConfig,
) -> Result<Fees, FeeError> {
    if input.gross.is_sign_negative() && !input.gross.is_zero() {
        return Err(FeeError::NegativeGross(input.gross));
    }
    let services = services_cost(input, property)?;

    let booking_commission_rate = if input.source == Source::BookingSite {
        config.booking_site_commission
    } else {
        property.booking_commission
    };

    let booking_fee = booking_commission_rate * input.gross;
    let net = input.gross - booking_fee;
    let house_owner_fee = (property.house_owner_commission * net).max(config.house_owner_fee_floor);
    let total_fees = services.total() + house_owner_fee;

    Ok(Fees {
        booking_commission_rate,
        booking_fee,
        net,
        house_owner_fee,
        services,
        total_fees,
        owner_income: net - total_fees,
    })
}

/// Charges for the services the booking opted into.
///
/// Laundry and consumables are tiered by party size, with every party
/// larger than six paying the six-person price.
pub fn services_cost(
    input: &RawBookingInput,
    property: &PropertyConfig,
) -> Result<ServiceCosts, FeeError> {
    let tier = PropertyConfig::tier_index(input.party_size)
        .ok_or(FeeError::InvalidPartySize(input.party_size))?;
    let charge = |opted: bool, price: Decimal| if opted { price } else { Decimal::ZERO };

    Ok(ServiceCosts {
        greeting: charge(input.services.greeting, property.greeting),
        laundry: charge(input.services.laundry, property.laundry[tier]),
        cleaning: charge(input.services.cleaning, property.cleaning),
        consumables: charge(input.services.consumables, property.consumables[tier]),
    })
}
