use crate::domain::medicine::{Medicine, MedicineId, Price};
use crate::domain::order::{Order, OrderId, OrderStatus, OrderView, Quantity};
use crate::domain::ports::CatalogStoreBox;
use crate::error::{PharmacyError, Result};
use chrono::Utc;
use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::Mutex;
use uuid::Uuid;

/// Purchase intent submitted by a customer.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct PlaceOrder {
    pub medicine_id: MedicineId,
    pub customer_name: String,
    pub customer_email: String,
    pub quantity: u32,
}

/// Admin request to add a medicine to the catalog.
#[derive(Debug, Deserialize, Clone)]
#[serde(deny_unknown_fields)]
pub struct NewMedicine {
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    pub stock: u32,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update of a catalog entry. Absent fields are left untouched.
#[derive(Debug, Deserialize, Clone, Default)]
#[serde(deny_unknown_fields)]
pub struct MedicineUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<u32>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// The main entry point for catalog and order processing.
///
/// `PharmacyEngine` owns the storage backend and is the only component that
/// mutates medicine stock. The `stock_gate` serializes every read-check-write
/// sequence over stock, so two concurrent placements can never both pass the
/// stock check when only one can be satisfied.
pub struct PharmacyEngine {
    store: CatalogStoreBox,
    stock_gate: Mutex<()>,
}

impl PharmacyEngine {
    /// Creates a new `PharmacyEngine` over the given storage backend.
    pub fn new(store: CatalogStoreBox) -> Self {
        Self {
            store,
            stock_gate: Mutex::new(()),
        }
    }

    /// Places an order: validates the request, checks stock, and commits the
    /// new order together with the decremented medicine as one atomic unit.
    ///
    /// On any failure nothing is written; there is no partial order and no
    /// partial stock change.
    pub async fn place_order(&self, request: PlaceOrder) -> Result<Order> {
        let quantity = Quantity::new(request.quantity)?;
        let customer_name = required("customer_name", request.customer_name)?;
        let customer_email = required("customer_email", request.customer_email)?;

        let _gate = self.stock_gate.lock().await;

        let mut medicine = self
            .store
            .medicine(request.medicine_id)
            .await?
            .ok_or(PharmacyError::NotFound("Medicine"))?;

        let order = Order::place(&medicine, customer_name, customer_email, quantity);
        medicine.reserve(quantity.get())?;
        self.store.commit(order.clone(), medicine).await?;

        tracing::info!(
            order_id = %order.id,
            medicine_id = %order.medicine_id,
            quantity = order.quantity,
            "order placed"
        );
        Ok(order)
    }

    /// Transitions an order to `status`, enforcing the guarded transition
    /// table. Cancellation restores the reserved stock in the same atomic
    /// unit as the status write.
    pub async fn set_order_status(&self, id: OrderId, status: OrderStatus) -> Result<Order> {
        let _gate = self.stock_gate.lock().await;

        let mut order = self
            .store
            .order(id)
            .await?
            .ok_or(PharmacyError::NotFound("Order"))?;

        if !order.status.can_transition_to(status) {
            return Err(PharmacyError::StatusTransition {
                from: order.status,
                to: status,
            });
        }
        order.status = status;

        if status == OrderStatus::Cancelled {
            // The medicine may have been deleted since the order was placed;
            // the cancellation still commits, there is just no stock to restore.
            match self.store.medicine(order.medicine_id).await? {
                Some(mut medicine) => {
                    medicine.restock(order.quantity);
                    self.store.commit(order.clone(), medicine).await?;
                }
                None => self.store.put_order(order.clone()).await?,
            }
        } else {
            self.store.put_order(order.clone()).await?;
        }

        tracing::info!(order_id = %order.id, status = %order.status, "order status changed");
        Ok(order)
    }

    pub async fn create_medicine(&self, request: NewMedicine) -> Result<Medicine> {
        let name = required("name", request.name)?;
        let medicine = Medicine {
            id: Uuid::new_v4(),
            name,
            description: request.description.unwrap_or_default(),
            price: Price::new(request.price)?,
            stock: request.stock,
            category: request
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| Medicine::DEFAULT_CATEGORY.to_string()),
            image_url: request.image_url.unwrap_or_default(),
            created_at: Utc::now(),
        };
        self.store.put_medicine(medicine.clone()).await?;
        Ok(medicine)
    }

    pub async fn list_medicines(&self) -> Result<Vec<Medicine>> {
        self.store.medicines().await
    }

    pub async fn medicine(&self, id: MedicineId) -> Result<Medicine> {
        self.store
            .medicine(id)
            .await?
            .ok_or(PharmacyError::NotFound("Medicine"))
    }

    /// Applies a partial update. Stock edits go through the stock gate since
    /// they race with order placement over the same counter.
    pub async fn update_medicine(&self, id: MedicineId, update: MedicineUpdate) -> Result<Medicine> {
        let _gate = self.stock_gate.lock().await;

        let mut medicine = self
            .store
            .medicine(id)
            .await?
            .ok_or(PharmacyError::NotFound("Medicine"))?;

        if let Some(name) = update.name {
            medicine.name = required("name", name)?;
        }
        if let Some(description) = update.description {
            medicine.description = description;
        }
        if let Some(price) = update.price {
            medicine.price = Price::new(price)?;
        }
        if let Some(stock) = update.stock {
            medicine.stock = stock;
        }
        if let Some(image_url) = update.image_url {
            medicine.image_url = image_url;
        }
        if let Some(category) = update.category {
            medicine.category = category;
        }

        self.store.put_medicine(medicine.clone()).await?;
        Ok(medicine)
    }

    /// Removes a medicine from the catalog. Deletes contend with the
    /// cancellation path's read-restock-commit over the same row, so they
    /// take the stock gate like every other stock-touching operation.
    pub async fn delete_medicine(&self, id: MedicineId) -> Result<()> {
        let _gate = self.stock_gate.lock().await;

        if self.store.delete_medicine(id).await? {
            Ok(())
        } else {
            Err(PharmacyError::NotFound("Medicine"))
        }
    }

    /// All orders, newest first, each resolved with its medicine summary.
    pub async fn list_orders(&self) -> Result<Vec<OrderView>> {
        let orders = self.store.orders().await?;
        let mut views = Vec::with_capacity(orders.len());
        for order in orders {
            let medicine = self.store.medicine(order.medicine_id).await?;
            views.push(OrderView {
                order,
                medicine: medicine.as_ref().map(Into::into),
            });
        }
        Ok(views)
    }
}

fn required(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(PharmacyError::Validation(format!("{field} is required")))
    } else {
        Ok(value)
    }
}
