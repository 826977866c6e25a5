//! Discount rules keyed by category name or SKU.
//!
//! The table is built once at startup and shared read-only between
//! requests. Resolution never stacks rules: when both the category and the
//! SKU of a product have an entry, the larger fraction wins.

use std::collections::HashMap;

use shared::validation::validate_discount_fraction;
use thiserror::Error;

/// Error raised when building a discount table.
#[derive(Debug, Error, PartialEq)]
pub enum DiscountError {
    #[error("discount for {key:?} must be in [0, 1), got {value}")]
    InvalidFraction { key: String, value: f64 },

    #[error("discount key must not be empty")]
    EmptyKey,
}

/// Immutable mapping from a category name or SKU to a discount fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct DiscountTable {
    rules: HashMap<String, f64>,
}

impl DiscountTable {
    /// Builds a table, rejecting empty keys and fractions outside [0, 1).
    pub fn new<K, I>(rules: I) -> Result<Self, DiscountError>
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, f64)>,
    {
        let mut table = HashMap::new();
        for (key, value) in rules {
            let key = key.into();
            if key.is_empty() {
                return Err(DiscountError::EmptyKey);
            }
            if validate_discount_fraction(value).is_err() {
                return Err(DiscountError::InvalidFraction { key, value });
            }
            table.insert(key, value);
        }
        Ok(Self { rules: table })
    }

    /// A table without any rules.
    pub fn empty() -> Self {
        Self {
            rules: HashMap::new(),
        }
    }

    /// Returns the discount fraction for a product.
    ///
    /// Unknown keys contribute nothing; a result of 0 means no discount.
    pub fn resolve(&self, category_name: &str, sku: &str) -> f64 {
        let by_category = self.get(category_name).unwrap_or(0.0);
        match self.get(sku) {
            Some(by_sku) => by_category.max(by_sku),
            None => by_category,
        }
    }

    pub fn get(&self, key: &str) -> Option<f64> {
        self.rules.get(key).copied()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Iterates the rules in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.rules.iter().map(|(key, value)| (key.as_str(), *value))
    }
}

impl Default for DiscountTable {
    /// 30% off every boot, 15% off SKU `000003`.
    fn default() -> Self {
        Self {
            rules: HashMap::from([("boots".to_string(), 0.30), ("000003".to_string(), 0.15)]),
        }
    }
}
