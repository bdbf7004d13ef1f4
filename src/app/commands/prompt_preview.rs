//! Render a feature prompt without calling the model.

use serde::Serialize;
use serde_json::Value;

use super::phase::resolve_phase;
use crate::adapters::{EmbeddedPromptCatalog, MinijinjaTemplateRenderer};
use crate::domain::{
    AppConfig, AppError, GenerationRequest, InterviewRequest, PhaseQuery, PromptError, RoadmapForm,
    TemplateId, build_prompt,
};
use crate::ports::DocumentStore;

/// Input the previewed prompt is built from.
#[derive(Debug, Clone)]
pub enum PreviewInput {
    Form(Value),
    Phase(PhaseQuery),
    Interview { phase_name: Option<String>, user_id: Option<String> },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PromptPreview {
    pub template: String,
    pub prompt: String,
}

pub fn execute(
    store: &impl DocumentStore,
    config: &AppConfig,
    template: TemplateId,
    input: PreviewInput,
) -> Result<PromptPreview, AppError> {
    let request = match input {
        PreviewInput::Form(form) => GenerationRequest::Roadmap(RoadmapForm::from_value(form)?),
        PreviewInput::Phase(query) => GenerationRequest::Phase(resolve_phase(store, query)?.request),
        PreviewInput::Interview { phase_name, user_id } => {
            GenerationRequest::Interview(InterviewRequest::parse(
                phase_name.as_deref(),
                user_id.as_deref(),
                config.interview.requested_count,
            )?)
        }
    };

    let prompt =
        build_prompt(template, &request, &EmbeddedPromptCatalog, &MinijinjaTemplateRenderer::new())
            .map_err(|err| match err {
                PromptError::RequestMismatch { .. } => AppError::invalid_input(err.to_string()),
                other => other.into(),
            })?;
    Ok(PromptPreview { template: template.to_string(), prompt })
}
