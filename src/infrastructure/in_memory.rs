use crate::domain::medicine::{Medicine, MedicineId};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{CatalogStore, MedicineStore, OrderStore};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Default)]
struct Collections {
    medicines: HashMap<MedicineId, Medicine>,
    orders: HashMap<OrderId, Order>,
}

/// A thread-safe in-memory catalog and order ledger.
///
/// A single `RwLock` guards both collections, so `commit` mutates the order
/// and the medicine under one write guard and the pair is never observable
/// half-applied. Ideal for tests and for running without persistence.
#[derive(Default, Clone)]
pub struct InMemoryCatalog {
    inner: Arc<RwLock<Collections>>,
}

impl InMemoryCatalog {
    /// Creates a new, empty in-memory catalog.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl MedicineStore for InMemoryCatalog {
    async fn put_medicine(&self, medicine: Medicine) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.medicines.insert(medicine.id, medicine);
        Ok(())
    }

    async fn medicine(&self, id: MedicineId) -> Result<Option<Medicine>> {
        let inner = self.inner.read().await;
        Ok(inner.medicines.get(&id).cloned())
    }

    async fn medicines(&self) -> Result<Vec<Medicine>> {
        let inner = self.inner.read().await;
        let mut medicines: Vec<Medicine> = inner.medicines.values().cloned().collect();
        medicines.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(medicines)
    }

    async fn delete_medicine(&self, id: MedicineId) -> Result<bool> {
        let mut inner = self.inner.write().await;
        Ok(inner.medicines.remove(&id).is_some())
    }
}

#[async_trait]
impl OrderStore for InMemoryCatalog {
    async fn put_order(&self, order: Order) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.orders.insert(order.id, order);
        Ok(())
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let inner = self.inner.read().await;
        Ok(inner.orders.get(&id).cloned())
    }

    async fn orders(&self) -> Result<Vec<Order>> {
        let inner = self.inner.read().await;
        let mut orders: Vec<Order> = inner.orders.values().cloned().collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[async_trait]
impl CatalogStore for InMemoryCatalog {
    async fn commit(&self, order: Order, medicine: Medicine) -> Result<()> {
        let mut inner = self.inner.write().await;
        inner.orders.insert(order.id, order);
        inner.medicines.insert(medicine.id, medicine);
        Ok(())
    }
}
