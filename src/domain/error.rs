use std::fmt;
use std::io;

use thiserror::Error;

use crate::domain::prompt::PromptError;

/// Library-wide error type for learnpath operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// Required environment variable missing.
    #[error("Environment variable '{0}' is not set")]
    EnvironmentVariableMissing(String),

    /// Caller supplied missing or malformed identifiers.
    #[error("{0}")]
    InvalidInput(String),

    /// Requested document does not exist.
    #[error("{0}")]
    NotFound(String),

    /// Prompt could not be rendered.
    #[error(transparent)]
    Prompt(#[from] PromptError),

    /// The generative service call failed.
    #[error(transparent)]
    Generation(#[from] GenerationError),

    /// No usable structure could be isolated in the model output.
    #[error(transparent)]
    Extraction(#[from] ExtractionError),

    /// Extracted structure violates an artifact invariant.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Document store failure.
    #[error("Storage error: {0}")]
    Storage(String),

    /// JSON encoding or decoding failure outside the extraction step.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParseError(#[from] toml::de::Error),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub fn invalid_input<S: Into<String>>(message: S) -> Self {
        AppError::InvalidInput(message.into())
    }

    pub fn not_found<S: Into<String>>(message: S) -> Self {
        AppError::NotFound(message.into())
    }

    /// HTTP-style status code used at the response boundary.
    pub fn status_code(&self) -> u16 {
        match self {
            AppError::InvalidInput(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Io(_)
            | AppError::Configuration(_)
            | AppError::EnvironmentVariableMissing(_)
            | AppError::Prompt(_)
            | AppError::Generation(_)
            | AppError::Extraction(_)
            | AppError::Validation(_)
            | AppError::Storage(_)
            | AppError::Json(_)
            | AppError::TomlParseError(_) => 500,
        }
    }
}

/// Classified cause of a failed generative call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationFailure {
    Network,
    Auth,
    RateLimit,
    Unknown,
}

impl GenerationFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            GenerationFailure::Network => "network",
            GenerationFailure::Auth => "auth",
            GenerationFailure::RateLimit => "rate_limit",
            GenerationFailure::Unknown => "unknown",
        }
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Transport-level failure talking to the generative service.
#[derive(Debug, Clone, Error)]
#[error("Text generation failed ({reason}): {message}")]
pub struct GenerationError {
    pub reason: GenerationFailure,
    pub message: String,
    pub status: Option<u16>,
}

impl GenerationError {
    pub fn new(reason: GenerationFailure, message: impl Into<String>) -> Self {
        Self { reason, message: message.into(), status: None }
    }

    pub fn with_status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }
}

/// Failure to isolate structured data in raw model output.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractionError {
    #[error("Failed to extract valid JSON from AI response: no JSON object found")]
    NoJsonFound,

    #[error("Failed to parse AI response as JSON: {details}")]
    MalformedJson { details: String },

    #[error("AI response was empty")]
    EmptyResponse,
}

impl ExtractionError {
    pub fn reason(&self) -> &'static str {
        match self {
            ExtractionError::NoJsonFound => "no_json_found",
            ExtractionError::MalformedJson { .. } => "malformed_json",
            ExtractionError::EmptyResponse => "empty_response",
        }
    }
}

/// Which invariant a validated payload broke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationFailure {
    MissingField,
    WrongCount,
    WrongType,
    AnswerNotInOptions,
}

impl ValidationFailure {
    pub fn as_str(&self) -> &'static str {
        match self {
            ValidationFailure::MissingField => "missing_field",
            ValidationFailure::WrongCount => "wrong_count",
            ValidationFailure::WrongType => "wrong_type",
            ValidationFailure::AnswerNotInOptions => "answer_not_in_options",
        }
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid {shape} format ({reason}): {detail}")]
pub struct ValidationError {
    pub shape: &'static str,
    pub reason: ValidationFailure,
    pub detail: String,
}

impl ValidationError {
    pub fn new(shape: &'static str, reason: ValidationFailure, detail: impl Into<String>) -> Self {
        Self { shape, reason, detail: detail.into() }
    }
}
