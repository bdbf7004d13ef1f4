//! Structured inputs interpolated into prompts.

use serde_json::{Map, Value};

use crate::domain::artifact::Phase;
use crate::domain::{AppError, UserId};

/// Free-form profile form submitted for roadmap generation.
///
/// Only `userId` is interpreted; every other field is passed to the model
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct RoadmapForm {
    fields: Map<String, Value>,
}

impl RoadmapForm {
    pub fn from_value(value: Value) -> Result<Self, AppError> {
        match value {
            Value::Object(fields) => Ok(Self { fields }),
            _ => Err(AppError::invalid_input("Roadmap form must be a JSON object")),
        }
    }

    pub fn user_id(&self) -> Result<UserId, AppError> {
        match self.fields.get("userId") {
            Some(Value::String(raw)) => UserId::parse(raw),
            Some(Value::Null) | None => Err(AppError::invalid_input("userId is required")),
            Some(_) => Err(AppError::invalid_input("Invalid userId format")),
        }
    }

    /// Display name from `personalInfo.fullName`, if filled in.
    pub fn full_name(&self) -> Option<&str> {
        self.fields
            .get("personalInfo")
            .and_then(|info| info.get("fullName"))
            .and_then(Value::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Identifiers naming one phase of a user's roadmap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhaseQuery {
    pub phase_id: String,
    pub phase_name: String,
    pub user_id: UserId,
}

impl PhaseQuery {
    /// Validate raw identifiers before any lookup or generative call.
    pub fn parse(
        phase_id: Option<&str>,
        phase_name: Option<&str>,
        user_id: Option<&str>,
    ) -> Result<Self, AppError> {
        fn present(value: Option<&str>) -> Option<&str> {
            value.map(str::trim).filter(|v| !v.is_empty())
        }

        let (Some(phase_id), Some(phase_name), Some(user_id)) =
            (present(phase_id), present(phase_name), present(user_id))
        else {
            return Err(AppError::invalid_input("phaseId, phaseName, and userId are required"));
        };

        Ok(Self {
            phase_id: phase_id.to_string(),
            phase_name: phase_name.to_string(),
            user_id: UserId::parse(user_id)?,
        })
    }
}

/// A phase query resolved against the user's latest roadmap.
#[derive(Debug, Clone, PartialEq)]
pub struct PhaseRequest {
    pub query: PhaseQuery,
    pub roadmap_title: String,
    pub phase: Phase,
}

/// Input for interview question generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterviewRequest {
    pub phase_name: String,
    pub user_id: UserId,
    /// How many questions the prompt asks the model for.
    pub requested_count: usize,
}

impl InterviewRequest {
    pub fn parse(
        phase_name: Option<&str>,
        user_id: Option<&str>,
        requested_count: usize,
    ) -> Result<Self, AppError> {
        let phase_name = phase_name
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .ok_or_else(|| AppError::invalid_input("phaseName is required"))?;
        let user_id = UserId::parse(user_id.unwrap_or_default())?;
        Ok(Self { phase_name: phase_name.to_string(), user_id, requested_count })
    }

    /// Topic hints keyed off the phase tier named in `phase_name`.
    pub fn topics(&self) -> &'static str {
        if self.phase_name.contains("Beginner") {
            "HTML, CSS, JavaScript, responsive design, Git, VS Code"
        } else if self.phase_name.contains("Intermediate") {
            "React, Node.js, APIs, databases, Express"
        } else {
            "Next.js, DevOps, Web3, microservices"
        }
    }
}

/// The data a prompt is built from.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationRequest {
    Roadmap(RoadmapForm),
    Phase(PhaseRequest),
    Interview(InterviewRequest),
}
