//! API facade for the application.
//!
//! Each function wires the filesystem document store (and, for generation,
//! the Gemini client) to one command and maps the outcome to an
//! [`ApiResponse`]. Generation inputs are validated before the client is
//! built, so a bad request is a 400 even without an API key.

use serde_json::{Value, json};

use crate::adapters::{FilesystemDocumentStore, HttpGeminiClient};
use crate::app::commands::{interview, learning_content, prompt_preview, quiz, roadmap};
use crate::app::{AppContext, ApiResponse};
use crate::domain::{
    AppConfig, AppError, InterviewRequest, PhaseQuery, ProgressUpdate, RoadmapForm, TemplateId,
};

pub use crate::app::commands::prompt_preview::{PreviewInput, PromptPreview};

fn document_store(config: &AppConfig) -> FilesystemDocumentStore {
    FilesystemDocumentStore::new(&config.storage.data_dir)
}

fn generation_context(
    config: &AppConfig,
) -> Result<AppContext<HttpGeminiClient, FilesystemDocumentStore>, AppError> {
    let generator = HttpGeminiClient::from_env_with_config(&config.gemini)?;
    Ok(AppContext::new(generator, document_store(config), config.clone()))
}

// =============================================================================
// Generation
// =============================================================================

/// Generate a roadmap from a profile form. `201` with `{"artifact": roadmap}`.
pub fn generate_roadmap(config: &AppConfig, form: Value) -> ApiResponse {
    let result = RoadmapForm::from_value(form)
        .and_then(|form| form.user_id().map(|_| form))
        .and_then(|form| {
            let ctx = generation_context(config)?;
            roadmap::generate(&ctx, form)
        });
    ApiResponse::artifact(201, result)
}

/// Generate learning content for a phase of the user's latest roadmap.
pub fn generate_learning_content(
    config: &AppConfig,
    phase_id: Option<&str>,
    phase_name: Option<&str>,
    user_id: Option<&str>,
) -> ApiResponse {
    let result = PhaseQuery::parse(phase_id, phase_name, user_id).and_then(|query| {
        let ctx = generation_context(config)?;
        learning_content::generate(&ctx, query)
    });
    ApiResponse::artifact(200, result)
}

/// Generate a quiz for a phase of the user's latest roadmap.
pub fn generate_quiz(
    config: &AppConfig,
    phase_id: Option<&str>,
    phase_name: Option<&str>,
    user_id: Option<&str>,
) -> ApiResponse {
    let result = PhaseQuery::parse(phase_id, phase_name, user_id).and_then(|query| {
        let ctx = generation_context(config)?;
        quiz::generate(&ctx, query)
    });
    ApiResponse::artifact(200, result)
}

/// Generate interview questions for a phase.
pub fn generate_interview_questions(
    config: &AppConfig,
    phase_name: Option<&str>,
    user_id: Option<&str>,
) -> ApiResponse {
    let result = InterviewRequest::parse(phase_name, user_id, config.interview.requested_count)
        .and_then(|request| {
            let ctx = generation_context(config)?;
            interview::generate(&ctx, request)
        });
    ApiResponse::artifact(200, result)
}

// =============================================================================
// Roadmap reads
// =============================================================================

/// All roadmaps of a user, newest first.
pub fn roadmaps_for_user(config: &AppConfig, user_id: &str) -> ApiResponse {
    ApiResponse::respond(200, roadmap::list(&document_store(config), user_id))
}

/// `{totalRoadmaps, formattedRoadmaps}` for a user.
pub fn roadmap_summaries(config: &AppConfig, user_id: &str) -> ApiResponse {
    ApiResponse::respond(200, roadmap::summaries(&document_store(config), user_id))
}

/// The three most recent roadmap summaries of a user.
pub fn recent_roadmaps(config: &AppConfig, user_id: &str) -> ApiResponse {
    ApiResponse::respond(200, roadmap::recent(&document_store(config), user_id))
}

pub fn roadmap_by_id(config: &AppConfig, id: &str) -> ApiResponse {
    ApiResponse::respond(200, roadmap::show(&document_store(config), id))
}

/// Record phase progress on a stored roadmap.
pub fn update_progress(config: &AppConfig, id: &str, update: &ProgressUpdate) -> ApiResponse {
    let result = roadmap::update_progress(&document_store(config), id, update).map(|document| {
        json!({ "message": "Progress updated successfully", "roadmap": document })
    });
    ApiResponse::respond(200, result)
}

// =============================================================================
// Prompt preview
// =============================================================================

/// Render the prompt a feature would send, without calling the model.
pub fn preview_prompt(config: &AppConfig, template: TemplateId, input: PreviewInput) -> ApiResponse {
    let result = prompt_preview::execute(&document_store(config), config, template, input);
    ApiResponse::respond(200, result)
}
