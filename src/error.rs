// src/error.rs
//! Application error kinds and their HTTP translation.

use rocket::http::Status;
use rocket::response::{self, status, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::error;

pub const INVALID_INPUT_DETAIL: &str = "Invalid input provided";
pub const RATE_LIMIT_DETAIL: &str = "Rate limit exceeded";
pub const EXTERNAL_API_DETAIL: &str = "External API error";
pub const INTERNAL_ERROR_DETAIL: &str = "An internal server error occurred";

/// `{"detail": "..."}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

#[derive(Debug, Error)]
pub enum ApiError {
    /// Security-relevant condition detected in the request
    #[error("{0}")]
    Security(String),
    /// Validation condition not covered by schema construction
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    RateLimit(String),
    /// Upstream generation service failure
    #[error("{0}")]
    ExternalApi(String),
    /// Anything unanticipated. The message is logged, never returned.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn invalid_input() -> Self {
        Self::InvalidInput(INVALID_INPUT_DETAIL.to_string())
    }

    pub fn rate_limited() -> Self {
        Self::RateLimit(RATE_LIMIT_DETAIL.to_string())
    }

    pub fn external_api() -> Self {
        Self::ExternalApi(EXTERNAL_API_DETAIL.to_string())
    }

    pub fn status(&self) -> Status {
        match self {
            Self::Security(_) | Self::InvalidInput(_) => Status::BadRequest,
            Self::Validation(_) => Status::UnprocessableEntity,
            Self::RateLimit(_) => Status::TooManyRequests,
            Self::ExternalApi(_) => Status::BadGateway,
            Self::Internal(_) => Status::InternalServerError,
        }
    }

    /// Detail safe to show to the caller.
    pub fn client_detail(&self) -> &str {
        match self {
            Self::Security(detail)
            | Self::Validation(detail)
            | Self::InvalidInput(detail)
            | Self::RateLimit(detail)
            | Self::ExternalApi(detail) => detail,
            Self::Internal(_) => INTERNAL_ERROR_DETAIL,
        }
    }

    fn log(&self) {
        match self {
            Self::Security(detail) => error!("Security error: {}", detail),
            Self::Validation(detail) => error!("Validation error: {}", detail),
            Self::InvalidInput(detail) => error!("Invalid input: {}", detail),
            Self::RateLimit(detail) => error!("Rate limit exceeded: {}", detail),
            Self::ExternalApi(detail) => error!("External API error: {}", detail),
            Self::Internal(e) => error!("Unexpected error: {:#}", e),
        }
    }

    /// Log the original error and produce the status and body sent back.
    pub fn handle(&self) -> (Status, ErrorBody) {
        self.log();
        (self.status(), ErrorBody::new(self.client_detail()))
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, req: &'r Request<'_>) -> response::Result<'static> {
        let (status, body) = self.handle();
        status::Custom(status, Json(body)).respond_to(req)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::capture::Capture;

    #[test]
    fn test_each_kind_maps_to_its_status_and_detail() {
        let cases = [
            (ApiError::Security("script tag found".to_string()), Status::BadRequest),
            (ApiError::Validation("bad combo".to_string()), Status::UnprocessableEntity),
            (ApiError::InvalidInput("no title".to_string()), Status::BadRequest),
            (ApiError::RateLimit("slow down".to_string()), Status::TooManyRequests),
            (ApiError::ExternalApi("upstream down".to_string()), Status::BadGateway),
        ];

        for (err, expected) in cases {
            let message = err.to_string();
            let (status, body) = err.handle();
            assert_eq!(status, expected);
            assert_eq!(body, ErrorBody::new(message));
        }
    }

    #[test]
    fn test_default_details() {
        assert_eq!(ApiError::invalid_input().client_detail(), "Invalid input provided");
        assert_eq!(ApiError::rate_limited().client_detail(), "Rate limit exceeded");
        assert_eq!(ApiError::external_api().client_detail(), "External API error");
    }

    #[test]
    fn test_internal_error_is_not_echoed() {
        let err: ApiError = anyhow::anyhow!("connection string postgres://admin:secret@db").into();

        let (status, body) = err.handle();

        assert_eq!(status, Status::InternalServerError);
        assert_eq!(body.detail, "An internal server error occurred");
        assert!(err.to_string().contains("secret"));
    }

    #[test]
    fn test_handling_logs_original_detail_at_error_level() {
        let capture = Capture::default();

        let (internal, security) = tracing::subscriber::with_default(capture.subscriber(), || {
            let internal: ApiError = anyhow::anyhow!("secret").into();
            let security = ApiError::Security("prompt injection attempt".to_string());
            (internal.handle(), security.handle())
        });

        let output = capture.contents();
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains(" - ERROR - Unexpected error: secret"), "{}", lines[0]);
        assert!(
            lines[1].contains(" - ERROR - Security error: prompt injection attempt"),
            "{}",
            lines[1]
        );

        assert_eq!(internal.0, Status::InternalServerError);
        assert!(!internal.1.detail.contains("secret"));
        assert_eq!(security.1.detail, "prompt injection attempt");
    }

    #[test]
    fn test_error_body_serializes_as_detail_object() {
        let json = serde_json::to_value(ErrorBody::new("Rate limit exceeded")).unwrap();
        assert_eq!(json, serde_json::json!({ "detail": "Rate limit exceeded" }));
    }
}
