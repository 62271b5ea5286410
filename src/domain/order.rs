use crate::domain::medicine::{Medicine, MedicineId};
use crate::error::{PharmacyError, Result};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

pub type OrderId = Uuid;

/// The authoritative order status set.
///
/// The storefront's admin screens historically offered extra values
/// (processing, shipped, delivered); the backend only ever recognized these
/// three, so anything else is rejected at the boundary.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    Pending,
    Completed,
    Cancelled,
}

impl OrderStatus {
    /// Guarded transition table: orders only ever move forward out of
    /// `Pending`. Completed and cancelled are terminal, which is what makes
    /// stock restoration on cancellation happen exactly once.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        matches!(
            (self, next),
            (OrderStatus::Pending, OrderStatus::Completed)
                | (OrderStatus::Pending, OrderStatus::Cancelled)
        )
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
            OrderStatus::Cancelled => "cancelled",
        };
        f.write_str(s)
    }
}

impl FromStr for OrderStatus {
    type Err = PharmacyError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "pending" => Ok(OrderStatus::Pending),
            "completed" => Ok(OrderStatus::Completed),
            "cancelled" => Ok(OrderStatus::Cancelled),
            _ => Err(PharmacyError::Validation("Invalid status".to_string())),
        }
    }
}

/// A positive order quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quantity(u32);

impl Quantity {
    pub fn new(value: u32) -> Result<Self> {
        if value > 0 {
            Ok(Self(value))
        } else {
            Err(PharmacyError::Validation(
                "Quantity must be positive".to_string(),
            ))
        }
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

/// A placed order in the ledger.
///
/// Holds a weak reference to the medicine it was placed against; deleting
/// the medicine does not cascade. `total_price` is a snapshot of
/// price × quantity at placement time and is never recomputed.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct Order {
    pub id: OrderId,
    pub medicine_id: MedicineId,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: u32,
    pub total_price: Decimal,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Builds a pending order against `medicine`, freezing the total price.
    pub fn place(
        medicine: &Medicine,
        customer_name: String,
        customer_email: String,
        quantity: Quantity,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            medicine_id: medicine.id,
            customer_name,
            customer_email,
            quantity: quantity.get(),
            total_price: medicine.price.value() * Decimal::from(quantity.get()),
            status: OrderStatus::Pending,
            created_at: Utc::now(),
        }
    }
}

/// Catalog fields resolved onto an order when listing the ledger.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct MedicineSummary {
    pub name: String,
    pub price: Decimal,
    pub category: String,
}

impl From<&Medicine> for MedicineSummary {
    fn from(medicine: &Medicine) -> Self {
        Self {
            name: medicine.name.clone(),
            price: medicine.price.value(),
            category: medicine.category.clone(),
        }
    }
}

/// An order joined with its medicine summary, as returned by `GET /orders`.
/// `medicine` is `None` when the referenced medicine has been deleted.
#[derive(Debug, Serialize, PartialEq, Clone)]
pub struct OrderView {
    #[serde(flatten)]
    pub order: Order,
    pub medicine: Option<MedicineSummary>,
}
