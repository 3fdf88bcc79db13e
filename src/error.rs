//! Typed errors and HTTP mapping.

use crate::schema::ScalarKind;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Problems with a record type's declaration or with process configuration.
/// Raised at startup; the set of record types is closed, so none of these are retried.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("unsupported column type {kind:?}: {type_name}.{field}")]
    UnsupportedType {
        type_name: &'static str,
        field: &'static str,
        kind: ScalarKind,
    },
    #[error("missing primary key: {0}")]
    MissingPrimaryKey(&'static str),
    #[error("invalid primary key: {type_name}.{field} ({reason})")]
    InvalidPrimaryKey {
        type_name: &'static str,
        field: &'static str,
        reason: &'static str,
    },
    #[error("duplicate column: {type_name}.{column}")]
    DuplicateColumn {
        type_name: &'static str,
        column: &'static str,
    },
    #[error("config load: {0}")]
    Load(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("database: {0}")]
    Db(#[from] sqlx::Error),
    #[error("decode: {0}")]
    Decode(String),
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Serialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code) = match &self {
            AppError::Config(_) => (StatusCode::INTERNAL_SERVER_ERROR, "config_error"),
            AppError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
            AppError::BadRequest(_) => (StatusCode::BAD_REQUEST, "bad_request"),
            AppError::Db(_) => (StatusCode::INTERNAL_SERVER_ERROR, "database_error"),
            AppError::Decode(_) => (StatusCode::INTERNAL_SERVER_ERROR, "decode_error"),
        };
        if status.is_server_error() {
            tracing::error!(error = %self, "request failed");
        }
        let body = ErrorBody {
            error: ErrorDetail {
                code: code.to_string(),
                message: self.to_string(),
            },
        };
        (status, Json(body)).into_response()
    }
}
