//! HTTP surface: an axum router over the `PharmacyEngine`.
//!
//! Every response uses the `{ success, data | error }` envelope; request
//! bodies are explicit structs that reject unknown fields.

pub mod extract;
pub mod medicines;
pub mod orders;
pub mod response;

use crate::application::engine::PharmacyEngine;
use crate::error::PharmacyError;
use axum::routing::{get, patch};
use axum::{Json, Router};
use response::ApiError;
use serde_json::{Value, json};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use uuid::Uuid;

/// Builds the full API router.
pub fn router(engine: Arc<PharmacyEngine>) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route(
            "/api/medicines",
            get(medicines::list).post(medicines::create),
        )
        .route(
            "/api/medicines/:id",
            get(medicines::get_one)
                .put(medicines::update)
                .delete(medicines::remove),
        )
        .route("/api/orders", get(orders::list).post(orders::place))
        .route("/api/orders/:id/status", patch(orders::set_status))
        .layer(TraceLayer::new_for_http())
        // The storefront is served from another origin; there is no
        // authentication model, so CORS stays wide open.
        .layer(CorsLayer::permissive())
        .with_state(engine)
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok", "message": "Backend is running" }))
}

fn parse_id(raw: &str, what: &str) -> Result<Uuid, ApiError> {
    raw.parse()
        .map_err(|_| ApiError(PharmacyError::Validation(format!("Invalid {what} id"))))
}
