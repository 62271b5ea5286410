use crate::error::{PharmacyError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type MedicineId = Uuid;

/// Represents a non-negative unit price.
///
/// Wrapper around `rust_decimal::Decimal` so that a negative price can never
/// enter the catalog. Serializes transparently as the inner decimal.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Price(Decimal);

impl Price {
    pub fn new(value: Decimal) -> Result<Self> {
        if value >= Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(PharmacyError::Validation(
                "Price must not be negative".to_string(),
            ))
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Price {
    type Error = PharmacyError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

/// A purchasable catalog item with a mutable stock counter.
///
/// `stock` is a `u32`, so it can never go negative; `reserve` is the only
/// way to decrement it and fails rather than underflow.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Medicine {
    /// System-generated unique identifier.
    pub id: MedicineId,
    pub name: String,
    pub description: String,
    pub price: Price,
    /// Count of sellable units. Mutated only through `reserve` / `restock`.
    pub stock: u32,
    pub category: String,
    pub image_url: String,
    pub created_at: DateTime<Utc>,
}

impl Medicine {
    /// Default category applied when none is supplied.
    pub const DEFAULT_CATEGORY: &str = "General";

    /// Removes `quantity` units from stock, refusing to overdraw.
    pub fn reserve(&mut self, quantity: u32) -> Result<()> {
        if self.stock >= quantity {
            self.stock -= quantity;
            Ok(())
        } else {
            Err(PharmacyError::InsufficientStock)
        }
    }

    /// Returns `quantity` units to stock (order cancellation).
    pub fn restock(&mut self, quantity: u32) {
        self.stock = self.stock.saturating_add(quantity);
    }
}
