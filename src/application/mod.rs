//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `PharmacyEngine`, the single entry point for the
//! order-placement transaction, the guarded status transitions, and the
//! catalog CRUD operations the admin surface depends on.

pub mod engine;
