//! Stage helpers shared by the generation pipelines.

use serde_json::Value;

use crate::app::AppContext;
use crate::domain::extraction::extract_json;
use crate::domain::validation::validate;
use crate::domain::{
    AppError, Collection, FailureKind, GenerationRequest, PipelineRun, PipelineStage, ShapeId,
    StoredDocument, StructuredArtifact, TemplateId, UserId, ValidationError, ValidationFailure,
};
use crate::ports::{DocumentStore, TextGenerator};

/// Log an input failure and pass the error through.
pub(crate) fn reject_input(run: &mut PipelineRun, err: AppError) -> AppError {
    run.fail(FailureKind::Input, &err.to_string());
    err
}

/// Build the prompt and send it to `model`, returning the raw response.
pub(crate) fn request_text<G: TextGenerator, S: DocumentStore>(
    ctx: &AppContext<G, S>,
    run: &mut PipelineRun,
    template: TemplateId,
    request: &GenerationRequest,
    model: &str,
) -> Result<String, AppError> {
    let prompt = ctx.render_prompt(template, request).map_err(|err| {
        run.fail(FailureKind::Prompt, &err.to_string());
        AppError::from(err)
    })?;
    run.advance(PipelineStage::PromptBuilt);

    let raw = ctx.generator().generate(&prompt, model).map_err(|err| {
        run.fail(FailureKind::Network, &err.to_string());
        AppError::from(err)
    })?;
    run.advance(PipelineStage::ResponseReceived);

    Ok(raw)
}

/// Extract JSON from `raw` and validate it as `shape`.
///
/// Returns the artifact together with the extracted payload so callers can
/// read fields outside the artifact shape.
pub(crate) fn extract_and_validate(
    run: &mut PipelineRun,
    raw: &str,
    shape: ShapeId,
) -> Result<(StructuredArtifact, Value), AppError> {
    let payload = extract_json(raw).map_err(|err| {
        run.fail_with_raw(FailureKind::Extraction, &err.to_string(), raw);
        AppError::from(err)
    })?;
    run.advance(PipelineStage::Extracted);

    let artifact = validate(&payload, shape).map_err(|err| {
        run.fail_with_raw(FailureKind::Validation, &err.to_string(), raw);
        AppError::from(err)
    })?;
    run.advance(PipelineStage::Validated);

    Ok((artifact, payload))
}

/// Store `body` for `user_id` in `collection`.
pub(crate) fn persist<G: TextGenerator, S: DocumentStore>(
    ctx: &AppContext<G, S>,
    run: &mut PipelineRun,
    collection: Collection,
    user_id: &UserId,
    body: Value,
) -> Result<StoredDocument, AppError> {
    let document = ctx.store().insert(collection, user_id, body).map_err(|err| {
        run.fail(FailureKind::Storage, &err.to_string());
        err
    })?;
    run.persisted(collection.as_str(), document.id.as_str());
    Ok(document)
}

/// Unwrap the artifact variant a pipeline asked the validator for.
pub(crate) fn expect_shape<T>(
    artifact: StructuredArtifact,
    pick: impl FnOnce(StructuredArtifact) -> Option<T>,
) -> Result<T, AppError> {
    let kind = artifact.kind();
    pick(artifact).ok_or_else(|| {
        AppError::from(ValidationError::new(
            kind,
            ValidationFailure::WrongType,
            "validator returned a different artifact kind",
        ))
    })
}
