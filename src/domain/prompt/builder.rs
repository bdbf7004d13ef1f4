//! Prompt construction for the generation pipelines.
//!
//! Each feature owns one template. The builder turns a [`GenerationRequest`]
//! into the flat variable set its template expects and renders it. No
//! validation of the request happens here: a form with missing fields still
//! produces a prompt.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::domain::artifact::{QUIZ_OPTION_COUNT, QUIZ_QUESTION_COUNT};
use crate::domain::request::{GenerationRequest, InterviewRequest, PhaseRequest, RoadmapForm};

use super::TemplateRenderer;

/// Identifies which feature prompt to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateId {
    Roadmap,
    LearningContent,
    Quiz,
    InterviewQuestions,
}

impl TemplateId {
    pub const ALL: [TemplateId; 4] = [
        TemplateId::Roadmap,
        TemplateId::LearningContent,
        TemplateId::Quiz,
        TemplateId::InterviewQuestions,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateId::Roadmap => "roadmap",
            TemplateId::LearningContent => "learning_content",
            TemplateId::Quiz => "quiz",
            TemplateId::InterviewQuestions => "interview_questions",
        }
    }

    /// File name of the template within the prompt catalog.
    pub fn file_name(&self) -> String {
        format!("{}.md", self.as_str())
    }

    pub fn from_name(name: &str) -> Option<Self> {
        let normalized = name.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL.into_iter().find(|id| id.as_str() == normalized)
    }
}

impl fmt::Display for TemplateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of raw template text.
pub trait PromptCatalog {
    fn template_source(&self, id: TemplateId) -> Option<&str>;
}

/// Variables available to a template.
#[derive(Debug, Clone, Default)]
pub struct PromptContext {
    /// Variable name to value mapping.
    pub variables: HashMap<String, String>,
}

impl PromptContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_var(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.variables.insert(name.into(), value.into());
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables.get(name).map(|s| s.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromptError {
    #[error("Prompt template '{0}' not found")]
    TemplateNotFound(String),

    #[error("Template '{template}' cannot be built from a {request} request")]
    RequestMismatch { template: String, request: &'static str },

    #[error("Template syntax '{token}' is not allowed in {template} (line {line})")]
    TemplateSyntaxNotAllowed { template: String, token: String, line: usize },

    #[error("Failed to render template {template}: {reason}")]
    TemplateRenderError { template: String, reason: String },
}

/// Build the complete instruction string for `template` from `request`.
pub fn build_prompt(
    template: TemplateId,
    request: &GenerationRequest,
    catalog: &impl PromptCatalog,
    renderer: &impl TemplateRenderer,
) -> Result<String, PromptError> {
    let context = prompt_context(template, request)?;
    let source = catalog
        .template_source(template)
        .ok_or_else(|| PromptError::TemplateNotFound(template.file_name()))?;

    renderer.render(template, source, &context)
}

/// Flatten a request into the variables its template interpolates.
pub fn prompt_context(
    template: TemplateId,
    request: &GenerationRequest,
) -> Result<PromptContext, PromptError> {
    match (template, request) {
        (TemplateId::Roadmap, GenerationRequest::Roadmap(form)) => Ok(roadmap_context(form)),
        (TemplateId::LearningContent, GenerationRequest::Phase(phase)) => Ok(phase_context(phase)),
        (TemplateId::Quiz, GenerationRequest::Phase(phase)) => Ok(phase_context(phase)
            .with_var("question_count", QUIZ_QUESTION_COUNT.to_string())
            .with_var("option_count", QUIZ_OPTION_COUNT.to_string())),
        (TemplateId::InterviewQuestions, GenerationRequest::Interview(interview)) => {
            Ok(interview_context(interview))
        }
        (template, request) => Err(PromptError::RequestMismatch {
            template: template.to_string(),
            request: request_kind(request),
        }),
    }
}

fn roadmap_context(form: &RoadmapForm) -> PromptContext {
    PromptContext::new().with_var("form_json", pretty_json(&form.to_value()))
}

fn phase_context(request: &PhaseRequest) -> PromptContext {
    let phase = &request.phase;
    let industry_trends = if phase.industry_trends.trim().is_empty() {
        "Not specified".to_string()
    } else {
        phase.industry_trends.clone()
    };

    PromptContext::new()
        .with_var("user_id", request.query.user_id.as_str())
        .with_var("roadmap_title", request.roadmap_title.as_str())
        .with_var("phase_name", phase.phase_name.as_str())
        .with_var("phase_description", phase.description.as_str())
        .with_var("actionable_steps", pretty_json(&phase.actionable_steps))
        .with_var("recommended_courses", pretty_json(&phase.recommended_courses))
        .with_var("industry_trends", industry_trends)
        .with_var("requested_phase", request.query.phase_name.as_str())
}

fn interview_context(request: &InterviewRequest) -> PromptContext {
    PromptContext::new()
        .with_var("phase_name", request.phase_name.as_str())
        .with_var("topics", request.topics())
        .with_var("requested_count", request.requested_count.to_string())
}

fn request_kind(request: &GenerationRequest) -> &'static str {
    match request {
        GenerationRequest::Roadmap(_) => "roadmap form",
        GenerationRequest::Phase(_) => "phase",
        GenerationRequest::Interview(_) => "interview",
    }
}

fn pretty_json(value: &impl Serialize) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| "null".to_string())
}
