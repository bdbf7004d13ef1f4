//! Phase quiz generation.

use super::phase::resolve_phase;
use super::pipeline::{expect_shape, extract_and_validate, persist, reject_input, request_text};
use crate::app::AppContext;
use crate::domain::records::QuizRecord;
use crate::domain::{
    AppError, Collection, GenerationRequest, PhaseQuery, PipelineRun, QuizArtifact, ShapeId,
    TemplateId,
};
use crate::ports::{DocumentStore, TextGenerator};

/// Generate, validate, and store a ten-question quiz for one roadmap phase.
pub fn generate<G: TextGenerator, S: DocumentStore>(
    ctx: &AppContext<G, S>,
    query: PhaseQuery,
) -> Result<QuizArtifact, AppError> {
    let mut run = PipelineRun::start("quiz");

    let resolved = resolve_phase(ctx.store(), query).map_err(|err| reject_input(&mut run, err))?;
    let user_id = resolved.request.query.user_id.clone();
    let phase_id = resolved.request.query.phase_id.clone();
    let phase_name = resolved.request.phase.phase_name.clone();

    let request = GenerationRequest::Phase(resolved.request);
    let raw = request_text(ctx, &mut run, TemplateId::Quiz, &request, &ctx.config().models.quiz)?;
    let (artifact, _) = extract_and_validate(&mut run, &raw, ShapeId::Quiz)?;
    let quiz = expect_shape(artifact, |a| a.into_quiz())?;

    let record = QuizRecord {
        roadmap_id: resolved.roadmap_id,
        phase_id,
        phase_name,
        artifact: quiz,
    };
    persist(ctx, &mut run, Collection::Quizzes, &user_id, serde_json::to_value(&record)?)?;

    Ok(record.artifact)
}
