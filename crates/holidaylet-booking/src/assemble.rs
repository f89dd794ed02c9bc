//! Assembly of a fully computed booking from a raw input.

use crate::fees::{compute_fees, FeeError, Fees};
use holidaylet_core::{
    BusinessConfig, CatalogError, DecodedReference, PropertyCatalog, PropertyConfig,
    RawBookingInput, ReferenceCodec, ReferenceError,
};
use thiserror::Error;

/// Errors that can occur assembling or reconciling a booking.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BookingError {
    /// The booking reference could not be decoded.
    #[error("{0}")]
    Reference(ReferenceError),

    /// The reference names a property missing from the catalog.
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    /// The fee calculation rejected the input.
    #[error(transparent)]
    Fee(#[from] FeeError),
}

impl From<ReferenceError> for BookingError {
    fn from(err: ReferenceError) -> Self {
        match err {
            ReferenceError::Catalog(err) => Self::Catalog(err),
            other => Self::Reference(other),
        }
    }
}

/// A booking with its property, decoded stay and derived fees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComputedBooking {
    /// The input the booking was computed from.
    pub input: RawBookingInput,
    /// The property the reference points at.
    pub property: PropertyConfig,
    /// Fields decoded from the reference.
    pub reference: DecodedReference,
    /// Derived money fields.
    pub fees: Fees,
}

/// Decode, look up and price a single booking.
pub fn assemble(
    input: &RawBookingInput,
    catalog: &PropertyCatalog,
    config: &BusinessConfig,
) -> Result<ComputedBooking, BookingError> {
    let (reference, property) = ReferenceCodec::new(config).decode_with(&input.reference, catalog)?;
    let fees = compute_fees(input, property, config)?;

    Ok(ComputedBooking {
        input: input.clone(),
        property: property.clone(),
        reference,
        fees,
    })
}

impl ComputedBooking {
    /// The canonical reference for this booking's stay.
    pub fn canonical_reference(&self, config: &BusinessConfig) -> Result<String, ReferenceError> {
        ReferenceCodec::new(config).encode(
            &self.property.short_code,
            self.reference.arrival,
            self.reference.departure,
        )
    }
}
