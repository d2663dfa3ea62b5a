// src/web/types.rs
use rocket::serde::{Deserialize, Serialize};

use crate::schema::SchemaError;

#[derive(Debug, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: String,
}

/// One entry of a 422 detail list: `{"loc": ["body", field], "msg": ..., "type": ...}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct FieldErrorDetail {
    pub loc: Vec<String>,
    pub msg: String,
    #[serde(rename = "type")]
    pub error_type: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(crate = "rocket::serde")]
pub struct SchemaErrorBody {
    pub detail: Vec<FieldErrorDetail>,
}

impl From<&SchemaError> for SchemaErrorBody {
    fn from(error: &SchemaError) -> Self {
        let detail = error
            .field_errors()
            .iter()
            .map(|e| {
                let loc = if e.field == "body" {
                    vec!["body".to_string()]
                } else {
                    vec!["body".to_string(), e.field.clone()]
                };
                FieldErrorDetail {
                    loc,
                    msg: e.message.clone(),
                    error_type: format!("value_error.{}", e.code),
                }
            })
            .collect();

        Self { detail }
    }
}
