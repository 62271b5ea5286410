use crate::domain::order::OrderStatus;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, PharmacyError>;

#[derive(Error, Debug)]
pub enum PharmacyError {
    #[error("Validation error: {0}")]
    Validation(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("Insufficient stock available")]
    InsufficientStock,
    #[error("Cannot change order status from {from} to {to}")]
    StatusTransition { from: OrderStatus, to: OrderStatus },
    #[error("Storage error: {0}")]
    Storage(Box<dyn std::error::Error + Send + Sync>),
}

impl From<serde_json::Error> for PharmacyError {
    fn from(err: serde_json::Error) -> Self {
        Self::Storage(Box::new(err))
    }
}

#[cfg(feature = "storage-rocksdb")]
impl From<rocksdb::Error> for PharmacyError {
    fn from(err: rocksdb::Error) -> Self {
        Self::Storage(Box::new(err))
    }
}
