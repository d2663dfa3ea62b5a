// src/web/guards.rs
use rocket::data::{self, Data, FromData};
use rocket::http::Status;
use rocket::outcome::Outcome;
use rocket::serde::json::Json;
use rocket::Request;
use tracing::warn;

use crate::schema::{JobRequest, JobRequestPayload, SchemaError};

/// Schema failure recorded on the request so the 422 catcher can render it.
pub struct SchemaRejection(pub Option<SchemaError>);

/// Data guard yielding a validated [`JobRequest`].
///
/// Unparseable JSON fails with 400; a body that decodes but breaks the
/// field rules (or misses fields) fails with 422 and leaves a
/// [`SchemaRejection`] in the request-local cache.
pub struct ValidJobRequest(pub JobRequest);

impl ValidJobRequest {
    pub fn into_inner(self) -> JobRequest {
        self.0
    }
}

fn reject<'r>(
    req: &'r Request<'_>,
    error: SchemaError,
) -> data::Outcome<'r, ValidJobRequest> {
    warn!("Rejected job request: {}", error);
    req.local_cache(|| SchemaRejection(Some(error.clone())));
    Outcome::Error((Status::UnprocessableEntity, error))
}

#[rocket::async_trait]
impl<'r> FromData<'r> for ValidJobRequest {
    type Error = SchemaError;

    async fn from_data(req: &'r Request<'_>, data: Data<'r>) -> data::Outcome<'r, Self> {
        let payload = match Json::<JobRequestPayload>::from_data(req, data).await {
            Outcome::Success(json) => json.into_inner(),
            Outcome::Error((status, e)) if status == Status::UnprocessableEntity => {
                return reject(req, SchemaError::malformed_body(e.to_string()));
            }
            Outcome::Error((status, e)) => {
                warn!("Malformed job request body: {}", e.to_string());
                return Outcome::Error((status, SchemaError::malformed_body(e.to_string())));
            }
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        match JobRequest::try_from(payload) {
            Ok(request) => Outcome::Success(ValidJobRequest(request)),
            Err(error) => reject(req, error),
        }
    }
}
