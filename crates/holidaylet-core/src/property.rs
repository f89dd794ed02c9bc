//! Per-property settings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Number of party-size tiers in laundry and consumables price lists.
pub const TIER_SIZE: usize = 6;

/// Prices indexed by party size 1..=6.
pub type PriceTier = [Decimal; TIER_SIZE];

/// Settings for a single rental property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyConfig {
    /// Two-letter code used in booking references (e.g. `AM`).
    pub short_code: String,
    /// Display name written to the export.
    pub long_name: String,
    /// Calendar identifier, carried through untouched.
    pub calendar: String,
    /// Management commission rate reported in the export.
    pub commission: Decimal,
    /// Booking commission rate for non booking-site channels.
    pub booking_commission: Decimal,
    /// House-owner commission rate applied to the net amount.
    pub house_owner_commission: Decimal,
    /// Flat greeting price.
    pub greeting: Decimal,
    /// Laundry price by party size.
    pub laundry: PriceTier,
    /// Flat cleaning price.
    pub cleaning: Decimal,
    /// Consumables price by party size.
    pub consumables: PriceTier,
}

impl PropertyConfig {
    /// Index into a [`PriceTier`] for a party size, clamping sizes above six.
    ///
    /// Returns `None` for an empty party.
    #[must_use]
    pub fn tier_index(party_size: u32) -> Option<usize> {
        let size = usize::try_from(party_size).ok()?.min(TIER_SIZE);
        size.checked_sub(1)
    }

    /// Laundry price for the given party size.
    #[must_use]
    pub fn laundry_for(&self, party_size: u32) -> Option<Decimal> {
        Self::tier_index(party_size).map(|i| self.laundry[i])
    }

    /// Consumables price for the given party size.
    #[must_use]
    pub fn consumables_for(&self, party_size: u32) -> Option<Decimal> {
        Self::tier_index(party_size).map(|i| self.consumables[i])
    }
}
