//! Job description API: validates job posting requests, forwards them to a
//! text-generation service and maps every failure to a JSON error response.

pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod schema;
pub mod web;

pub use config::AppConfig;
pub use error::{ApiError, ErrorBody};
pub use generator::{JobGenerator, ServiceClient, SharedGenerator};
pub use logging::setup_logging;
pub use schema::{JobRequest, JobRequestPayload, JobResponse, SchemaError};
pub use web::{build_rocket, start_web_server};
