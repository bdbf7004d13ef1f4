//! Interview question generation.

use super::pipeline::{persist, request_text};
use crate::app::AppContext;
use crate::domain::validation::resolve_interview_questions;
use crate::domain::{
    AppError, Collection, GenerationRequest, InterviewCounts, InterviewQuestionSet, InterviewRequest,
    PipelineRun, PipelineStage, TemplateId,
};
use crate::ports::{DocumentStore, TextGenerator};

/// Generate and store interview questions for a phase.
///
/// Output that yields too few questions is replaced by the fixed fallback
/// set; only transport and storage failures are errors.
pub fn generate<G: TextGenerator, S: DocumentStore>(
    ctx: &AppContext<G, S>,
    request: InterviewRequest,
) -> Result<InterviewQuestionSet, AppError> {
    let mut run = PipelineRun::start("interview_questions");
    let counts = InterviewCounts {
        requested: request.requested_count,
        ..ctx.config().interview.counts()
    };
    let user_id = request.user_id.clone();
    let phase_name = request.phase_name.clone();

    let request = GenerationRequest::Interview(request);
    let raw = request_text(
        ctx,
        &mut run,
        TemplateId::InterviewQuestions,
        &request,
        &ctx.config().models.interview,
    )?;

    let questions = resolve_interview_questions(&raw, &phase_name, counts);
    run.advance(PipelineStage::Extracted);
    if questions.source.is_fallback() {
        tracing::warn!(phase = %phase_name, "interview output unusable, using fallback questions");
        run.advance(PipelineStage::FallbackApplied);
    }
    run.advance(PipelineStage::Validated);

    persist(
        ctx,
        &mut run,
        Collection::InterviewQuestionSets,
        &user_id,
        serde_json::to_value(&questions)?,
    )?;
    Ok(questions)
}
