// src/web/handlers/job_handlers.rs
use crate::error::ApiError;
use crate::generator::JobGenerator;
use crate::schema::{JobRequest, JobResponse};

use rocket::serde::json::Json;
use tracing::info;

/// Free text is forwarded to a text-generation service; control characters
/// other than line breaks and tabs are refused.
pub fn screen_free_text(request: &JobRequest) -> Result<(), ApiError> {
    let fields = [
        ("company_overview", Some(request.company_overview())),
        ("employment_type", request.employment_type()),
    ];

    for (field, value) in fields {
        let Some(value) = value else { continue };
        if value
            .chars()
            .any(|c| c.is_control() && !matches!(c, '\n' | '\r' | '\t'))
        {
            return Err(ApiError::Security(format!(
                "{} contains disallowed control characters",
                field
            )));
        }
    }

    Ok(())
}

pub async fn job_description_handler(
    request: JobRequest,
    generator: &dyn JobGenerator,
) -> Result<Json<JobResponse>, ApiError> {
    screen_free_text(&request)?;

    info!(
        "Generating job description for '{}' at '{}' ({} skills)",
        request.job_title(),
        request.company_name(),
        request.skills().len()
    );

    let response = generator.generate(&request).await?;

    info!(
        "Generated job description for '{}': {} responsibilities, {} qualifications",
        response.title,
        response.responsibilities.len(),
        response.qualifications.len()
    );

    Ok(Json(response))
}
