use super::response::ApiError;
use crate::error::PharmacyError;
use async_trait::async_trait;
use axum::Json;
use axum::extract::{FromRequest, Request};
use serde::de::DeserializeOwned;

/// `Json` extractor whose rejection is the standard envelope.
///
/// Malformed bodies and unknown fields surface as a validation failure in
/// the same `{ success: false, error }` shape as every other error, instead
/// of axum's plain-text rejection.
pub struct ApiJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError(PharmacyError::Validation(rejection.body_text())))?;
        Ok(Self(value))
    }
}
