use super::medicine::{Medicine, MedicineId};
use super::order::{Order, OrderId};
use crate::error::Result;
use async_trait::async_trait;

#[async_trait]
pub trait MedicineStore: Send + Sync {
    async fn put_medicine(&self, medicine: Medicine) -> Result<()>;
    async fn medicine(&self, id: MedicineId) -> Result<Option<Medicine>>;
    /// All medicines, newest first.
    async fn medicines(&self) -> Result<Vec<Medicine>>;
    /// Returns `false` when no medicine with that id existed.
    async fn delete_medicine(&self, id: MedicineId) -> Result<bool>;
}

#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn put_order(&self, order: Order) -> Result<()>;
    async fn order(&self, id: OrderId) -> Result<Option<Order>>;
    /// All orders, newest first.
    async fn orders(&self) -> Result<Vec<Order>>;
}

/// Storage backend spanning both the medicine catalog and the order ledger.
///
/// `commit` is the atomic unit the order transaction relies on: the order and
/// the updated medicine become visible together or not at all.
#[async_trait]
pub trait CatalogStore: MedicineStore + OrderStore {
    async fn commit(&self, order: Order, medicine: Medicine) -> Result<()>;
}

pub type CatalogStoreBox = Box<dyn CatalogStore>;
