// src/web/catchers.rs
//! Framework-level failures rendered as `{"detail": ...}` bodies.

use rocket::http::Status;
use rocket::response::status;
use rocket::serde::json::Json;
use rocket::{catch, catchers, Build, Request, Rocket};
use tracing::error;

use crate::error::{ErrorBody, INTERNAL_ERROR_DETAIL};
use crate::web::guards::SchemaRejection;
use crate::web::types::SchemaErrorBody;

type Detail = status::Custom<Json<ErrorBody>>;

fn detail(status: Status, message: &str) -> Detail {
    status::Custom(status, Json(ErrorBody::new(message)))
}

#[catch(400)]
pub fn bad_request(req: &Request<'_>) -> Detail {
    error!("Invalid request format: {} {}", req.method(), req.uri());
    detail(Status::BadRequest, "Invalid request format")
}

#[catch(404)]
pub fn not_found(req: &Request<'_>) -> Detail {
    error!("Not found: {} {}", req.method(), req.uri());
    detail(Status::NotFound, "Not found")
}

#[catch(422)]
pub fn unprocessable_entity(
    req: &Request<'_>,
) -> Result<status::Custom<Json<SchemaErrorBody>>, Detail> {
    match &req.local_cache(|| SchemaRejection(None)).0 {
        Some(rejection) => {
            error!("Validation error: {}", rejection);
            Ok(status::Custom(
                Status::UnprocessableEntity,
                Json(SchemaErrorBody::from(rejection)),
            ))
        }
        None => {
            error!("Validation error: {} {}", req.method(), req.uri());
            Err(detail(Status::UnprocessableEntity, "Unprocessable entity"))
        }
    }
}

#[catch(500)]
pub fn internal_error(req: &Request<'_>) -> Detail {
    error!("Unexpected error while serving {} {}", req.method(), req.uri());
    detail(Status::InternalServerError, INTERNAL_ERROR_DETAIL)
}

#[catch(default)]
pub fn default_catcher(status: Status, req: &Request<'_>) -> Detail {
    error!("Request failed with {}: {} {}", status, req.method(), req.uri());
    detail(status, status.reason().unwrap_or("Unknown error"))
}

/// Attach the catchers for every status this API renders itself.
pub fn register_error_handlers(rocket: Rocket<Build>) -> Rocket<Build> {
    rocket.register(
        "/",
        catchers![
            bad_request,
            not_found,
            unprocessable_entity,
            internal_error,
            default_catcher
        ],
    )
}
