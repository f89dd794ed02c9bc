//! Lookup of property settings by short code.

use crate::property::PropertyConfig;
use std::collections::HashMap;
use thiserror::Error;

/// Errors building or querying a [`PropertyCatalog`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// The settings define no properties at all.
    #[error("property catalog is empty")]
    Empty,

    /// A short code is not exactly two ASCII letters.
    #[error("invalid property short code '{code}' for '{long_name}': expected two letters")]
    InvalidShortCode {
        /// The offending code.
        code: String,
        /// Long name of the property carrying it.
        long_name: String,
    },

    /// Two properties share a short code.
    #[error("duplicate property short code '{0}'")]
    DuplicateShortCode(String),

    /// No property has the requested short code.
    #[error("no property with short code '{0}'")]
    UnknownProperty(String),
}

/// Read-only catalog of properties, built once per batch.
///
/// Short codes are two ASCII letters, so they can never be confused with
/// the digit prefix that precedes them in a booking reference.
#[derive(Debug, Clone)]
pub struct PropertyCatalog {
    properties: Vec<PropertyConfig>,
    by_code: HashMap<String, usize>,
}

impl PropertyCatalog {
    /// Build a catalog, validating short codes.
    pub fn new(properties: Vec<PropertyConfig>) -> Result<Self, CatalogError> {
        if properties.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut by_code = HashMap::with_capacity(properties.len());
        for (i, property) in properties.iter().enumerate() {
            if !is_valid_short_code(&property.short_code) {
                return Err(CatalogError::InvalidShortCode {
                    code: property.short_code.clone(),
                    long_name: property.long_name.clone(),
                });
            }
            if by_code.insert(property.short_code.clone(), i).is_some() {
                return Err(CatalogError::DuplicateShortCode(
                    property.short_code.clone(),
                ));
            }
        }

        Ok(Self {
            properties,
            by_code,
        })
    }

    /// Get a property by short code.
    #[must_use]
    pub fn get(&self, code: &str) -> Option<&PropertyConfig> {
        self.by_code.get(code).map(|&i| &self.properties[i])
    }

    /// Get a property by short code, treating a miss as an error.
    pub fn resolve(&self, code: &str) -> Result<&PropertyConfig, CatalogError> {
        self.get(code)
            .ok_or_else(|| CatalogError::UnknownProperty(code.to_string()))
    }

    /// Iterate over properties in settings order.
    pub fn iter(&self) -> impl Iterator<Item = &PropertyConfig> {
        self.properties.iter()
    }

    /// Number of properties.
    #[must_use]
    pub fn len(&self) -> usize {
        self.properties.len()
    }

    /// Always `false` for a successfully built catalog.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.properties.is_empty()
    }
}

/// Short codes are exactly two ASCII letters.
pub(crate) fn is_valid_short_code(code: &str) -> bool {
    code.len() == 2 && code.bytes().all(|b| b.is_ascii_alphabetic())
}
