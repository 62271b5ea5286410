use crate::domain::medicine::{Medicine, MedicineId};
use crate::domain::order::{Order, OrderId};
use crate::domain::ports::{CatalogStore, MedicineStore, OrderStore};
use crate::error::{PharmacyError, Result};
use async_trait::async_trait;
use rocksdb::{ColumnFamilyDescriptor, DB, Options, WriteBatch};
use std::path::Path;
use std::sync::Arc;

/// Column Family for the medicine catalog.
pub const CF_MEDICINES: &str = "medicines";
/// Column Family for the order ledger.
pub const CF_ORDERS: &str = "orders";

/// A persistent catalog implementation using RocksDB.
///
/// Medicines and orders live in separate Column Families, keyed by their
/// UUID bytes and stored as JSON. The atomic commit of an order plus its
/// medicine goes through a `WriteBatch`, so a crash can never leave one
/// visible without the other.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<DB>`).
#[derive(Clone)]
pub struct RocksDbCatalog {
    db: Arc<DB>,
}

impl RocksDbCatalog {
    /// Opens or creates a RocksDB instance at the specified path, ensuring
    /// both column families exist.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_medicines = ColumnFamilyDescriptor::new(CF_MEDICINES, Options::default());
        let cf_orders = ColumnFamilyDescriptor::new(CF_ORDERS, Options::default());

        let db = DB::open_cf_descriptors(&opts, path, vec![cf_medicines, cf_orders])?;

        Ok(Self { db: Arc::new(db) })
    }

    fn cf(&self, name: &'static str) -> Result<&rocksdb::ColumnFamily> {
        self.db.cf_handle(name).ok_or_else(|| {
            PharmacyError::Storage(Box::new(std::io::Error::other(format!(
                "{name} column family not found"
            ))))
        })
    }
}

#[async_trait]
impl MedicineStore for RocksDbCatalog {
    async fn put_medicine(&self, medicine: Medicine) -> Result<()> {
        let cf = self.cf(CF_MEDICINES)?;
        let value = serde_json::to_vec(&medicine)?;
        self.db.put_cf(cf, medicine.id.as_bytes(), value)?;
        Ok(())
    }

    async fn medicine(&self, id: MedicineId) -> Result<Option<Medicine>> {
        let cf = self.cf(CF_MEDICINES)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn medicines(&self) -> Result<Vec<Medicine>> {
        let cf = self.cf(CF_MEDICINES)?;
        let mut medicines = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let medicine: Medicine = serde_json::from_slice(&value)?;
            medicines.push(medicine);
        }
        medicines.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(medicines)
    }

    async fn delete_medicine(&self, id: MedicineId) -> Result<bool> {
        let cf = self.cf(CF_MEDICINES)?;
        // Existence check first so the caller can tell a no-op delete apart.
        // Check-then-delete is two steps; the engine serializes deletes
        // behind its stock gate, so no second deleter can slip in between.
        if self.db.get_pinned_cf(cf, id.as_bytes())?.is_none() {
            return Ok(false);
        }
        self.db.delete_cf(cf, id.as_bytes())?;
        Ok(true)
    }
}

#[async_trait]
impl OrderStore for RocksDbCatalog {
    async fn put_order(&self, order: Order) -> Result<()> {
        let cf = self.cf(CF_ORDERS)?;
        let value = serde_json::to_vec(&order)?;
        self.db.put_cf(cf, order.id.as_bytes(), value)?;
        Ok(())
    }

    async fn order(&self, id: OrderId) -> Result<Option<Order>> {
        let cf = self.cf(CF_ORDERS)?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
            None => Ok(None),
        }
    }

    async fn orders(&self) -> Result<Vec<Order>> {
        let cf = self.cf(CF_ORDERS)?;
        let mut orders = Vec::new();
        for item in self.db.iterator_cf(cf, rocksdb::IteratorMode::Start) {
            let (_key, value) = item?;
            let order: Order = serde_json::from_slice(&value)?;
            orders.push(order);
        }
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(orders)
    }
}

#[async_trait]
impl CatalogStore for RocksDbCatalog {
    async fn commit(&self, order: Order, medicine: Medicine) -> Result<()> {
        let cf_orders = self.cf(CF_ORDERS)?;
        let cf_medicines = self.cf(CF_MEDICINES)?;

        let mut batch = WriteBatch::default();
        batch.put_cf(cf_orders, order.id.as_bytes(), serde_json::to_vec(&order)?);
        batch.put_cf(
            cf_medicines,
            medicine.id.as_bytes(),
            serde_json::to_vec(&medicine)?,
        );
        self.db.write(batch)?;
        Ok(())
    }
}
