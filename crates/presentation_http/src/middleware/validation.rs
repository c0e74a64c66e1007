//! Request validation
//!
//! `ValidatedJson` deserializes a JSON body and runs the `validator` rules of
//! the target type before the handler sees it.

use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::de::DeserializeOwned;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::error::ErrorResponse;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Invalid JSON: {0}")]
    JsonError(#[from] JsonRejection),
    #[error("Validation failed: {0}")]
    ValidationFailed(String),
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        let code = match &self {
            Self::JsonError(_) => "invalid_json",
            Self::ValidationFailed(_) => "validation_error",
        };
        let body = ErrorResponse {
            error: self.to_string(),
            code: code.to_string(),
            details: None,
        };
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}

/// A JSON extractor that also validates the request body
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ValidationError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state).await?;
        value
            .validate()
            .map_err(|e| ValidationError::ValidationFailed(describe(&e)))?;
        Ok(Self(value))
    }
}

/// `field: reason` pairs, sorted by field for stable messages
fn describe(errors: &ValidationErrors) -> String {
    let mut lines: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| {
                let reason = error
                    .message
                    .as_ref()
                    .map_or_else(|| error.code.to_string(), ToString::to_string);
                format!("{field}: {reason}")
            })
        })
        .collect();
    lines.sort();
    lines.join("; ")
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, routing::post};
    use serde::Deserialize;
    use tower::ServiceExt;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Registration {
        #[validate(length(min = 1, max = 20))]
        bar_number: String,
        #[validate(email)]
        email: String,
    }

    async fn register(ValidatedJson(req): ValidatedJson<Registration>) -> String {
        req.bar_number
    }

    async fn send(body: &'static str) -> (StatusCode, ErrorResponse) {
        let response = Router::new()
            .route("/", post(register))
            .oneshot(
                axum::http::Request::builder()
                    .method("POST")
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let parsed = serde_json::from_slice(&bytes).unwrap_or(ErrorResponse {
            error: String::from_utf8_lossy(&bytes).into_owned(),
            code: String::new(),
            details: None,
        });
        (status, parsed)
    }

    #[tokio::test]
    async fn valid_body_passes() {
        let (status, body) = send(r#"{"bar_number":"NY-1","email":"a@b.law"}"#).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.error, "NY-1");
    }

    #[tokio::test]
    async fn rule_violations_are_listed() {
        let (status, body) = send(r#"{"bar_number":"","email":"nope"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "validation_error");
        assert!(body.error.contains("bar_number: length"));
        assert!(body.error.contains("email: email"));
    }

    #[tokio::test]
    async fn malformed_json_is_rejected() {
        let (status, body) = send(r#"{"bar_number": NY}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "invalid_json");
    }

    #[tokio::test]
    async fn missing_field_is_bad_request() {
        let (status, body) = send(r#"{"bar_number":"NY-1"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "invalid_json");
    }
}
