// src/generator.rs
//! Boundary to the external text-generation service.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info};

use crate::error::ApiError;
use crate::schema::{JobRequest, JobResponse};

const GENERATE_ENDPOINT: &str = "/generate";

/// Produces a job listing from a validated request.
#[rocket::async_trait]
pub trait JobGenerator: Send + Sync {
    async fn generate(&self, request: &JobRequest) -> Result<JobResponse, ApiError>;
}

pub type SharedGenerator = Arc<dyn JobGenerator>;

/// HTTP client for the generation service.
pub struct ServiceClient {
    client: reqwest::Client,
    base_url: String,
}

impl ServiceClient {
    pub fn new(base_url: impl Into<String>, timeout_seconds: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_seconds))
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.into(),
        })
    }

    pub fn endpoint(&self) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), GENERATE_ENDPOINT)
    }
}

/// Translate a non-success upstream status into the error returned to our caller.
/// Only throttling keeps its meaning; every other status is an upstream failure.
pub fn upstream_error(status: StatusCode) -> ApiError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => ApiError::rate_limited(),
        other => ApiError::ExternalApi(format!("Generation service returned status {}", other)),
    }
}

#[rocket::async_trait]
impl JobGenerator for ServiceClient {
    async fn generate(&self, request: &JobRequest) -> Result<JobResponse, ApiError> {
        let url = self.endpoint();
        info!("Calling generation service: {}", url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                error!("Generation service request failed: {}", e);
                ApiError::ExternalApi("Generation service unavailable".to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            error!("Generation service error response ({}): {}", status, error_text);
            return Err(upstream_error(status));
        }

        response.json::<JobResponse>().await.map_err(|e| {
            error!("Failed to parse generation service response: {}", e);
            ApiError::ExternalApi("Invalid response from generation service".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rocket::http::Status;

    #[test]
    fn test_endpoint_joins_base_url() {
        let client = ServiceClient::new("http://127.0.0.1:5555/", 5).unwrap();
        assert_eq!(client.endpoint(), "http://127.0.0.1:5555/generate");

        let client = ServiceClient::new("https://gen.internal/v1", 5).unwrap();
        assert_eq!(client.endpoint(), "https://gen.internal/v1/generate");
    }

    #[test]
    fn test_upstream_status_mapping() {
        assert_eq!(
            upstream_error(StatusCode::TOO_MANY_REQUESTS).status(),
            Status::TooManyRequests
        );
        assert_eq!(
            upstream_error(StatusCode::TOO_MANY_REQUESTS).client_detail(),
            "Rate limit exceeded"
        );
        for status in [StatusCode::BAD_REQUEST, StatusCode::UNPROCESSABLE_ENTITY] {
            let err = upstream_error(status);
            assert_eq!(err.status(), Status::BadGateway);
            assert!(matches!(err, ApiError::ExternalApi(_)));
        }
        assert_eq!(
            upstream_error(StatusCode::UNPROCESSABLE_ENTITY).client_detail(),
            "Generation service returned status 422 Unprocessable Entity"
        );

        let err = upstream_error(StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.status(), Status::BadGateway);
        assert_eq!(
            err.client_detail(),
            "Generation service returned status 503 Service Unavailable"
        );
    }

    #[tokio::test]
    async fn test_unreachable_service_is_external_api_error() {
        // Port 9 (discard) is not expected to serve HTTP locally
        let client = ServiceClient::new("http://127.0.0.1:9", 2).unwrap();
        let request: JobRequest = serde_json::from_str(
            r#"{"job_title":"Backend Engineer","years_experience":5,"company_name":"Acme Inc",
                "company_overview":"We build things.","skills":["Python","SQL","Docker"]}"#,
        )
        .unwrap();

        let err = client.generate(&request).await.unwrap_err();

        assert_eq!(err.status(), Status::BadGateway);
        assert_eq!(err.client_detail(), "Generation service unavailable");
    }
}
