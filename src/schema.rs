// src/schema.rs
//! Job description request/response shapes and their field rules.
//!
//! Raw bodies arrive as [`JobRequestPayload`]; the only way to obtain a
//! [`JobRequest`] is through `TryFrom<JobRequestPayload>`, so a `JobRequest`
//! value is always valid and trimmed.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::sync::LazyLock;
use thiserror::Error;
use validator::{Validate, ValidationError, ValidationErrors};

pub const MIN_SKILLS: usize = 3;
pub const MAX_SKILLS: usize = 20;

/// Letters, digits, whitespace and `- _ . , ( ) & /`
static TEXT_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\s\-_.,()&/]+$").expect("text pattern is a valid regex")
});

/// Same as the text pattern plus single and double quotes
static COMPANY_NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^[a-zA-Z0-9\s\-_.,()&/'"]+$"#).expect("company name pattern is a valid regex")
});

/// Same as the text pattern plus `#` and `+` (C#, C++)
static SKILL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-zA-Z0-9\s\-_.,()&/#+]+$").expect("skill pattern is a valid regex")
});

/// Declaration order, used to report failures deterministically.
const FIELD_ORDER: [&str; 7] = [
    "job_title",
    "years_experience",
    "company_name",
    "company_overview",
    "skills",
    "location",
    "employment_type",
];

const INVALID_CHARACTERS: &str = "invalid_characters";
const SKILL_COUNT: &str = "skill_count";

fn rejection(code: &'static str, message: impl Into<Cow<'static, str>>) -> ValidationError {
    ValidationError::new(code).with_message(message.into())
}

/// Character-set check applied to the trimmed value.
fn check_allowed(value: &str, pattern: &Regex, message: &'static str) -> Result<(), ValidationError> {
    if pattern.is_match(value.trim()) {
        Ok(())
    } else {
        Err(rejection(INVALID_CHARACTERS, message))
    }
}

pub fn validate_job_title(value: &str) -> Result<(), ValidationError> {
    check_allowed(value, &TEXT_PATTERN, "Job title contains invalid characters")
}

pub fn validate_company_name(value: &str) -> Result<(), ValidationError> {
    check_allowed(
        value,
        &COMPANY_NAME_PATTERN,
        "Company name contains invalid characters",
    )
}

pub fn validate_location(value: &str) -> Result<(), ValidationError> {
    check_allowed(value, &TEXT_PATTERN, "Location contains invalid characters")
}

/// List bounds are re-checked here even though the derive already carries them.
pub fn validate_skills(skills: &[String]) -> Result<(), ValidationError> {
    if skills.len() < MIN_SKILLS {
        return Err(rejection(SKILL_COUNT, "At least 3 skills are required"));
    }
    if skills.len() > MAX_SKILLS {
        return Err(rejection(SKILL_COUNT, "Maximum 20 skills allowed"));
    }

    for skill in skills {
        let skill = skill.trim();
        if !SKILL_PATTERN.is_match(skill) {
            return Err(rejection(
                INVALID_CHARACTERS,
                format!("Skill \"{}\" contains invalid characters", skill),
            ));
        }
    }

    Ok(())
}

/// Raw job description body as sent by the client.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct JobRequestPayload {
    #[validate(
        length(min = 1, max = 100, message = "Job title must be between 1 and 100 characters"),
        custom(function = "validate_job_title")
    )]
    pub job_title: String,

    // Signed so that negative values reach validation instead of failing to parse
    #[validate(range(min = 0, max = 50, message = "Years of experience must be between 0 and 50"))]
    pub years_experience: i64,

    #[validate(
        length(min = 1, max = 200, message = "Company name must be between 1 and 200 characters"),
        custom(function = "validate_company_name")
    )]
    pub company_name: String,

    #[validate(length(
        min = 1,
        max = 1000,
        message = "Company overview must be between 1 and 1000 characters"
    ))]
    pub company_overview: String,

    #[validate(
        length(min = 3, max = 20, message = "Skills must list between 3 and 20 entries"),
        custom(function = "validate_skills")
    )]
    pub skills: Vec<String>,

    #[serde(default)]
    #[validate(
        length(max = 100, message = "Location must be at most 100 characters"),
        custom(function = "validate_location")
    )]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(length(max = 50, message = "Employment type must be at most 50 characters"))]
    pub employment_type: Option<String>,
}

/// One violated field constraint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Construction failure for [`JobRequest`], one entry per failing field.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid job request: {}", self.summary())]
pub struct SchemaError {
    errors: Vec<FieldError>,
}

impl SchemaError {
    /// Body that could not be decoded into a payload at all (missing field, wrong type).
    pub fn malformed_body(message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: "body".to_string(),
                code: "malformed_body".to_string(),
                message: message.into(),
            }],
        }
    }

    pub fn field_errors(&self) -> &[FieldError] {
        &self.errors
    }

    pub fn has_field(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    fn summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| format!("{}: {}", e.field, e.message))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// Bound violations take precedence over character-set violations on the same field.
fn precedence(code: &str) -> u8 {
    match code {
        SKILL_COUNT => 0,
        "length" | "range" => 1,
        _ => 2,
    }
}

impl From<ValidationErrors> for SchemaError {
    fn from(errors: ValidationErrors) -> Self {
        let by_field = errors.field_errors();

        let errors = FIELD_ORDER
            .iter()
            .filter_map(|field| {
                let reported = by_field
                    .get(*field)?
                    .iter()
                    .min_by_key(|e| precedence(&e.code))?;

                Some(FieldError {
                    field: (*field).to_string(),
                    code: reported.code.to_string(),
                    message: reported
                        .message
                        .as_ref()
                        .map_or_else(|| reported.code.to_string(), |m| m.to_string()),
                })
            })
            .collect();

        Self { errors }
    }
}

/// A validated job description request. Text fields are stored trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "JobRequestPayload")]
pub struct JobRequest {
    job_title: String,
    years_experience: i64,
    company_name: String,
    company_overview: String,
    skills: Vec<String>,
    location: Option<String>,
    employment_type: Option<String>,
}

impl TryFrom<JobRequestPayload> for JobRequest {
    type Error = SchemaError;

    fn try_from(payload: JobRequestPayload) -> Result<Self, Self::Error> {
        payload.validate()?;

        Ok(Self {
            job_title: payload.job_title.trim().to_string(),
            years_experience: payload.years_experience,
            company_name: payload.company_name.trim().to_string(),
            company_overview: payload.company_overview,
            skills: payload
                .skills
                .iter()
                .map(|skill| skill.trim().to_string())
                .collect(),
            location: payload.location.map(|l| l.trim().to_string()),
            employment_type: payload.employment_type,
        })
    }
}

impl JobRequest {
    pub fn job_title(&self) -> &str {
        &self.job_title
    }

    pub fn years_experience(&self) -> i64 {
        self.years_experience
    }

    pub fn company_name(&self) -> &str {
        &self.company_name
    }

    pub fn company_overview(&self) -> &str {
        &self.company_overview
    }

    pub fn skills(&self) -> &[String] {
        &self.skills
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }

    pub fn employment_type(&self) -> Option<&str> {
        self.employment_type.as_deref()
    }
}

/// Generated job listing, passed through to the caller unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobResponse {
    pub company_name: String,
    pub company_overview: String,
    pub title: String,
    pub experience_level: String,
    pub experience_years: i64,
    pub responsibilities: Vec<String>,
    pub qualifications: Vec<String>,
    pub required_skills: Vec<String>,
    pub optional_skills: Vec<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub employment_type: Option<String>,
}
