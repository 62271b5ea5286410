//! The JSON envelope every endpoint answers with, and the mapping from
//! domain errors to HTTP responses.

use crate::error::PharmacyError;
use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;

/// Uniform response body: `{ success, data?, error?, message? }`.
#[derive(Debug, Serialize)]
pub struct Envelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
            message: None,
        })
    }

    pub fn ok_with_message(data: T, message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            data: Some(data),
            error: None,
            message: Some(message.to_string()),
        })
    }
}

impl Envelope<()> {
    pub fn message(message: &str) -> Json<Self> {
        Json(Self {
            success: true,
            data: None,
            error: None,
            message: Some(message.to_string()),
        })
    }

    fn failure(error: String) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
            message: None,
        }
    }
}

/// Wrapper that turns a `PharmacyError` into an enveloped HTTP response.
#[derive(Debug)]
pub struct ApiError(pub PharmacyError);

impl From<PharmacyError> for ApiError {
    fn from(err: PharmacyError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            PharmacyError::Validation(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),
            PharmacyError::NotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),
            PharmacyError::InsufficientStock | PharmacyError::StatusTransition { .. } => {
                (StatusCode::CONFLICT, self.0.to_string())
            }
            PharmacyError::Storage(source) => {
                // Internal detail is logged, never echoed to the client.
                tracing::error!(error = %source, "storage failure");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        (status, Json(Envelope::failure(message))).into_response()
    }
}

/// Result alias for HTTP handlers answering a plain `200` envelope.
pub type HttpResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::order::OrderStatus;

    #[test]
    fn test_envelope_skips_absent_fields() {
        let Json(env) = Envelope::ok(1);
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"success":true,"data":1}"#);
    }

    #[test]
    fn test_failure_envelope_shape() {
        let env = Envelope::failure("Medicine not found".to_string());
        let json = serde_json::to_string(&env).unwrap();
        assert_eq!(json, r#"{"success":false,"error":"Medicine not found"}"#);
    }

    #[test]
    fn test_error_status_mapping() {
        let cases = [
            (
                ApiError(PharmacyError::Validation("x".to_string())),
                StatusCode::BAD_REQUEST,
            ),
            (
                ApiError(PharmacyError::NotFound("Order")),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError(PharmacyError::InsufficientStock),
                StatusCode::CONFLICT,
            ),
            (
                ApiError(PharmacyError::StatusTransition {
                    from: OrderStatus::Cancelled,
                    to: OrderStatus::Pending,
                }),
                StatusCode::CONFLICT,
            ),
            (
                ApiError(PharmacyError::Storage(Box::new(std::io::Error::other("db")))),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }
}
