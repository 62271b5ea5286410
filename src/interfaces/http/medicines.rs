//! Admin CRUD over the medicine catalog.

use super::extract::ApiJson;
use super::parse_id;
use super::response::{ApiError, Envelope, HttpResult};
use crate::application::engine::{MedicineUpdate, NewMedicine, PharmacyEngine};
use crate::domain::medicine::Medicine;
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use std::sync::Arc;

pub async fn list(State(engine): State<Arc<PharmacyEngine>>) -> HttpResult<Vec<Medicine>> {
    Ok(Envelope::ok(engine.list_medicines().await?))
}

pub async fn get_one(
    State(engine): State<Arc<PharmacyEngine>>,
    Path(id): Path<String>,
) -> HttpResult<Medicine> {
    let id = parse_id(&id, "medicine")?;
    Ok(Envelope::ok(engine.medicine(id).await?))
}

pub async fn create(
    State(engine): State<Arc<PharmacyEngine>>,
    ApiJson(request): ApiJson<NewMedicine>,
) -> Result<(StatusCode, Json<Envelope<Medicine>>), ApiError> {
    let medicine = engine.create_medicine(request).await?;
    Ok((StatusCode::CREATED, Envelope::ok(medicine)))
}

pub async fn update(
    State(engine): State<Arc<PharmacyEngine>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<MedicineUpdate>,
) -> HttpResult<Medicine> {
    let id = parse_id(&id, "medicine")?;
    Ok(Envelope::ok(engine.update_medicine(id, request).await?))
}

pub async fn remove(
    State(engine): State<Arc<PharmacyEngine>>,
    Path(id): Path<String>,
) -> HttpResult<()> {
    let id = parse_id(&id, "medicine")?;
    engine.delete_medicine(id).await?;
    Ok(Envelope::message("Medicine deleted successfully"))
}
