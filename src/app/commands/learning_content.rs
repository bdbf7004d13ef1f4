//! Learning content generation.

use super::phase::resolve_phase;
use super::pipeline::{persist, reject_input, request_text};
use crate::app::AppContext;
use crate::domain::extraction::parse_course_section;
use crate::domain::records::LearningContentRecord;
use crate::domain::{
    AppError, Collection, ExtractionError, FailureKind, GenerationRequest, LearningContentArtifact,
    PhaseQuery, PipelineRun, PipelineStage, TemplateId,
};
use crate::ports::{DocumentStore, TextGenerator};

/// Generate and store sectioned learning text for one roadmap phase.
///
/// The text is kept verbatim; courses are parsed from its
/// `## Recommended Courses` section.
pub fn generate<G: TextGenerator, S: DocumentStore>(
    ctx: &AppContext<G, S>,
    query: PhaseQuery,
) -> Result<LearningContentArtifact, AppError> {
    let mut run = PipelineRun::start("learning_content");

    let resolved = resolve_phase(ctx.store(), query).map_err(|err| reject_input(&mut run, err))?;
    let user_id = resolved.request.query.user_id.clone();
    let phase_id = resolved.request.query.phase_id.clone();
    let phase_name = resolved.request.phase.phase_name.clone();

    let request = GenerationRequest::Phase(resolved.request);
    let raw = request_text(
        ctx,
        &mut run,
        TemplateId::LearningContent,
        &request,
        &ctx.config().models.learning_content,
    )?;

    if raw.trim().is_empty() {
        let err = ExtractionError::EmptyResponse;
        run.fail_with_raw(FailureKind::Extraction, &err.to_string(), &raw);
        return Err(err.into());
    }
    let courses = parse_course_section(&raw);
    run.advance(PipelineStage::Extracted);
    run.advance(PipelineStage::Validated);

    let record = LearningContentRecord {
        roadmap_id: resolved.roadmap_id,
        phase_id,
        phase_name,
        artifact: LearningContentArtifact { content: raw, courses },
    };
    persist(ctx, &mut run, Collection::LearningContents, &user_id, serde_json::to_value(&record)?)?;

    Ok(record.artifact)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryDocumentStore;
    use crate::domain::{AppConfig, UserId};
    use crate::testing::FakeTextGenerator;
    use serde_json::json;

    const USER: &str = "678fe640180fa929cc64f786";

    fn context(reply: &str) -> AppContext<FakeTextGenerator, MemoryDocumentStore> {
        let store = MemoryDocumentStore::new();
        store
            .insert(
                Collection::Roadmaps,
                &UserId::parse(USER).unwrap(),
                json!({"roadmap": {"title": "Web", "phases": [{"phaseName": "Intermediate: Apps"}]}}),
            )
            .unwrap();
        AppContext::new(FakeTextGenerator::replying(reply), store, AppConfig::default())
    }

    fn query() -> PhaseQuery {
        PhaseQuery::parse(Some("1"), Some("Intermediate"), Some(USER)).unwrap()
    }

    #[test]
    fn keeps_text_and_parses_courses() {
        let reply = "# Learning Content for Intermediate\n\n## Recommended Courses\n- **Course Title**: React Guide\n  - **Platform**: Udemy\n  - **Duration**: 40 hours\n  - **Price**: $99\n  - **Link**: #\n  - **Description**: Hooks and routing\n";
        let ctx = context(reply);

        let content = generate(&ctx, query()).unwrap();
        assert_eq!(content.content, reply);
        assert_eq!(content.courses.len(), 1);
        assert_eq!(content.courses[0].platform, "Udemy");
        assert_eq!(ctx.store().count(Collection::LearningContents), 1);
        assert_eq!(ctx.generator().calls()[0].model, "gemini-1.5-flash");
    }

    #[test]
    fn text_without_courses_is_accepted() {
        let ctx = context("# Learning Content\n\n## Topics Covered\n### React\n");
        let content = generate(&ctx, query()).unwrap();
        assert!(content.courses.is_empty());
    }

    #[test]
    fn blank_reply_is_extraction_failure() {
        let ctx = context("   \n");
        let err = generate(&ctx, query()).unwrap_err();
        assert!(matches!(err, AppError::Extraction(ExtractionError::EmptyResponse)));
        assert_eq!(ctx.store().count(Collection::LearningContents), 0);
    }
}
