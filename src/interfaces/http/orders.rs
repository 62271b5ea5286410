//! Order placement and status transitions.

use super::extract::ApiJson;
use super::parse_id;
use super::response::{ApiError, Envelope, HttpResult};
use crate::application::engine::{PharmacyEngine, PlaceOrder};
use crate::domain::order::{Order, OrderStatus, OrderView};
use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use std::sync::Arc;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusRequest {
    pub status: String,
}

pub async fn list(State(engine): State<Arc<PharmacyEngine>>) -> HttpResult<Vec<OrderView>> {
    Ok(Envelope::ok(engine.list_orders().await?))
}

pub async fn place(
    State(engine): State<Arc<PharmacyEngine>>,
    ApiJson(request): ApiJson<PlaceOrder>,
) -> Result<(StatusCode, Json<Envelope<Order>>), ApiError> {
    let order = engine.place_order(request).await?;
    Ok((
        StatusCode::CREATED,
        Envelope::ok_with_message(order, "Order placed successfully"),
    ))
}

pub async fn set_status(
    State(engine): State<Arc<PharmacyEngine>>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<StatusRequest>,
) -> HttpResult<Order> {
    let id = parse_id(&id, "order")?;
    let status: OrderStatus = request.status.parse()?;
    Ok(Envelope::ok(engine.set_order_status(id, status).await?))
}
