use axum::http::StatusCode;
use axum::http::Uri;
use axum::response::{IntoResponse, Response};
use axum::Json;

use serde::Serialize;
use sqlx::error::DatabaseError;

pub async fn handler404(path: Uri) -> (StatusCode, Json<Error>) {
    (
        StatusCode::NOT_FOUND,
        Json(Error::NotFound {
            error: format!("Invalid path: {}", path),
        }),
    )
}

/// One constraint violation on a single input field.
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new<S: Into<String>>(field: &'static str, message: S) -> FieldError {
        FieldError {
            field,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Error {
    Validation { error: Vec<FieldError> },
    NotFound { error: String },
    BadRequest { error: String },
    Internal { error: String },
}

impl Error {
    pub fn not_found<S: Into<String>>(msg: S) -> Error {
        Error::NotFound { error: msg.into() }
    }

    pub fn bad_request<S: Into<String>>(msg: S) -> Error {
        Error::BadRequest { error: msg.into() }
    }

    pub fn internal() -> Error {
        Error::Internal {
            error: "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = match &self {
            Error::Validation { .. } | Error::BadRequest { .. } => StatusCode::BAD_REQUEST,
            Error::NotFound { .. } => StatusCode::NOT_FOUND,
            Error::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

impl From<Vec<FieldError>> for Error {
    fn from(errors: Vec<FieldError>) -> Self {
        Error::Validation { error: errors }
    }
}

impl From<sqlx::Error> for Error {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db) = &err {
            // 23503 = foreign_key_violation, 23505 = unique_violation
            if matches!(db.code().as_deref(), Some("23503") | Some("23505")) {
                log::error!("IntegrityError: {}", db.message());
                return Error::bad_request("Database integrity error");
            }
        }
        log::error!("Unexpected database error: {}", err);
        Error::internal()
    }
}
