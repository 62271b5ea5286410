//! Domain layer: catalog and order entities, value objects, and the storage
//! ports the application layer depends on.

pub mod medicine;
pub mod order;
pub mod ports;
