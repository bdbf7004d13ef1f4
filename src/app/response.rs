//! Mapping command results to status-coded JSON bodies.

use serde::Serialize;
use serde_json::{Value, json};

use crate::domain::AppError;

/// A status code and JSON body, as returned to the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: Value,
}

impl ApiResponse {
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }

    pub fn created(body: Value) -> Self {
        Self { status: 201, body }
    }

    /// `{"error": message}` with the error's status code.
    pub fn from_error(err: &AppError) -> Self {
        Self { status: err.status_code(), body: json!({ "error": err.to_string() }) }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Serialize `result` with `status`, or map its error.
    pub(crate) fn respond<T: Serialize>(status: u16, result: Result<T, AppError>) -> Self {
        match result.and_then(|value| serde_json::to_value(value).map_err(AppError::from)) {
            Ok(body) => Self { status, body },
            Err(err) => Self::from_error(&err),
        }
    }

    /// Wrap a generated artifact as `{"artifact": ...}`.
    pub(crate) fn artifact<T: Serialize>(status: u16, result: Result<T, AppError>) -> Self {
        Self::respond(status, result.map(|artifact| Artifact { artifact }))
    }
}

#[derive(Serialize)]
struct Artifact<T> {
    artifact: T,
}
