// src/web/mod.rs

pub mod catchers;
pub mod guards;
pub mod handlers;
pub mod types;

pub use catchers::register_error_handlers;
pub use guards::ValidJobRequest;
pub use types::*;

use crate::config::AppConfig;
use crate::error::ApiError;
use crate::generator::{ServiceClient, SharedGenerator};
use crate::schema::JobResponse;
use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::serde::json::Json;
use rocket::{get, options, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use tracing::{error, info};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
    }
}

#[post("/job-description", data = "<request>")]
pub async fn create_job_description(
    request: ValidJobRequest,
    generator: &State<SharedGenerator>,
) -> Result<Json<JobResponse>, ApiError> {
    handlers::job_description_handler(request.into_inner(), generator.inner().as_ref()).await
}

#[get("/health")]
pub async fn health() -> Json<HealthResponse> {
    handlers::health_handler().await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

/// Assemble the server around a generator without launching it.
pub fn build_rocket(config: &AppConfig, generator: SharedGenerator) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("address", config.address))
        .merge(("port", config.port));

    let rocket = rocket::custom(figment)
        .attach(Cors)
        .manage(generator)
        .mount("/api", routes![create_job_description, health, options]);

    register_error_handlers(rocket)
}

// Main server start function
pub async fn start_web_server(config: AppConfig) -> Result<()> {
    let client = ServiceClient::new(
        config.generation_service_url.clone(),
        config.generation_timeout_secs,
    )?;

    info!("Starting job description API server");
    info!("Server: http://{}:{}", config.address, config.port);
    info!("Generation service: {}", client.endpoint());

    if let Err(e) = build_rocket(&config, Arc::new(client)).launch().await {
        error!("Server terminated with error: {}", e);
        anyhow::bail!("Server terminated with error: {}", e);
    }

    Ok(())
}
