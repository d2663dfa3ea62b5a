// src/web/handlers/system_handlers.rs
use crate::web::types::HealthResponse;

use rocket::serde::json::Json;
use tracing::info;

pub async fn health_handler() -> Json<HealthResponse> {
    info!("Health check");
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}
