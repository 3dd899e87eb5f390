use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;

use crate::api::Lenient;

/// A single offending request field.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub path: String,
    pub message: String,
}

/// Application-level error type.
/// Implements `IntoResponse` so handlers can return `Result<T, AppError>`;
/// every variant renders the `{success: false, message}` envelope.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("validation failed: {message}")]
    Validation {
        message: String,
        errors: Vec<FieldError>,
    },

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("not found: {0}")]
    NotFound(String),

    #[error("conflict: {0}")]
    Conflict(String),

    #[error("generation of {what} failed: {detail}")]
    Generation { what: &'static str, detail: String },

    #[error("AI response does not match the {what} schema: {detail}")]
    SchemaMismatch { what: &'static str, detail: String },

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Validation error for one field.
    pub fn invalid(path: &str, message: impl Into<String>) -> Self {
        let message = message.into();
        AppError::Validation {
            errors: vec![FieldError {
                path: path.to_string(),
                message: message.clone(),
            }],
            message,
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Generation { .. }
            | AppError::SchemaMismatch { .. }
            | AppError::Database(_)
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = match &self {
            AppError::Validation { message, errors } => json!({
                "success": false,
                "message": message,
                "errors": errors,
            }),
            AppError::Unauthorized(msg) | AppError::NotFound(msg) | AppError::Conflict(msg) => {
                json!({ "success": false, "message": msg })
            }
            AppError::Generation { what, detail } => {
                tracing::error!(what, detail = %detail, "AI generation failed");
                json!({
                    "success": false,
                    "message": format!("Something went wrong while generating {what}"),
                })
            }
            AppError::SchemaMismatch { what, detail } => {
                tracing::error!(what, detail = %detail, "AI response rejected");
                json!({
                    "success": false,
                    "message": format!("Generated {what} did not match the expected format"),
                })
            }
            AppError::Database(e) => {
                tracing::error!(error = %e, "database error");
                json!({ "success": false, "message": "A database error occurred" })
            }
            AppError::Internal(e) => {
                tracing::error!(error = ?e, "internal error");
                json!({ "success": false, "message": "An internal server error occurred" })
            }
        };

        (status, Json(body)).into_response()
    }
}

/// Collects field errors so a request reports all of them at once.
#[derive(Debug, Default)]
pub struct FieldErrors(Vec<FieldError>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, path: &str, message: impl Into<String>) {
        self.0.push(FieldError {
            path: path.to_string(),
            message: message.into(),
        });
    }

    /// Value of a required body field. A missing field records `missing`; a
    /// value of the wrong JSON type records "`path` must be `expected`".
    pub fn required<T>(
        &mut self,
        path: &str,
        expected: &str,
        missing: &str,
        field: Option<Lenient<T>>,
    ) -> Option<T> {
        match field {
            None => {
                self.push(path, missing);
                None
            }
            Some(field) => self.typed(path, expected, field),
        }
    }

    /// Value of an optional body field; only a wrong JSON type is an error.
    pub fn optional<T>(
        &mut self,
        path: &str,
        expected: &str,
        field: Option<Lenient<T>>,
    ) -> Option<T> {
        field.and_then(|field| self.typed(path, expected, field))
    }

    fn typed<T>(&mut self, path: &str, expected: &str, field: Lenient<T>) -> Option<T> {
        match field {
            Lenient::Valid(value) => Some(value),
            Lenient::WrongType(_) => {
                self.push(path, format!("{path} must be {expected}"));
                None
            }
        }
    }

    pub fn has(&self, path: &str) -> bool {
        self.0.iter().any(|e| e.path == path)
    }

    /// The first recorded message becomes the envelope message.
    pub fn finish(self) -> Result<(), AppError> {
        match self.0.first() {
            None => Ok(()),
            Some(first) => Err(AppError::Validation {
                message: first.message.clone(),
                errors: self.0,
            }),
        }
    }
}

/// SQLSTATE 23505, raised by the unique index on `users.email`.
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::to_bytes;

    async fn body_json(err: AppError) -> (StatusCode, serde_json::Value) {
        let res = err.into_response();
        let status = res.status();
        let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn validation_envelope_lists_every_field() {
        let mut errs = FieldErrors::new();
        errs.push("name", "Username must be at least 3 characters");
        errs.push("email", "Please provide a valid email address");
        let (status, body) = body_json(errs.finish().unwrap_err()).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Username must be at least 3 characters");
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert_eq!(body["errors"][1]["path"], "email");
    }

    #[test]
    fn wrong_types_and_missing_fields_are_reported_per_field() {
        let mut errs = FieldErrors::new();
        let count: Option<i64> = errs.required(
            "numberOfQuestions",
            "a number",
            "number of questions is required",
            Some(Lenient::WrongType(serde_json::json!("3"))),
        );
        let role: Option<String> = errs.required("jobRole", "a string", "role is required", None);
        let flag = errs.optional::<bool>("isPublic", "a boolean", None);
        assert_eq!((count, role, flag), (None, None, None));

        match errs.finish().unwrap_err() {
            AppError::Validation { message, errors } => {
                assert_eq!(message, "numberOfQuestions must be a number");
                assert_eq!(errors[1].message, "role is required");
                assert_eq!(errors.len(), 2);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn empty_collector_is_ok() {
        assert!(FieldErrors::new().finish().is_ok());
    }

    #[tokio::test]
    async fn internal_errors_do_not_leak_details() {
        let (status, body) =
            body_json(AppError::Internal(anyhow::anyhow!("pool timed out at 10.0.0.3"))).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body["message"].as_str().unwrap().contains("10.0.0.3"));
    }

    #[tokio::test]
    async fn status_mapping() {
        assert_eq!(
            AppError::Unauthorized("Token is missing".into()).status(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(AppError::NotFound("x".into()).status(), StatusCode::NOT_FOUND);
        assert_eq!(AppError::Conflict("x".into()).status(), StatusCode::CONFLICT);
        let (status, body) = body_json(AppError::Generation {
            what: "questions",
            detail: "empty".into(),
        })
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["message"], "Something went wrong while generating questions");
    }
}
