//! Roadmap generation, reads, and progress updates.

use serde_json::Value;

use super::pipeline::{expect_shape, extract_and_validate, persist, reject_input, request_text};
use crate::app::AppContext;
use crate::domain::records::RoadmapRecord;
use crate::domain::{
    AppError, Collection, GenerationRequest, ObjectId, PipelineRun, ProgressUpdate,
    RoadmapDocument, RoadmapForm, RoadmapSummaries, RoadmapSummary, ShapeId, TemplateId, UserId,
};
use crate::ports::{DocumentStore, TextGenerator};

const RECENT_LIMIT: usize = 3;

/// Generate and store a roadmap from a profile form.
///
/// The form is stored before the model is called; the roadmap is stored only
/// once it validates.
pub fn generate<G: TextGenerator, S: DocumentStore>(
    ctx: &AppContext<G, S>,
    form: RoadmapForm,
) -> Result<RoadmapDocument, AppError> {
    let mut run = PipelineRun::start("roadmap");

    let user_id = form.user_id().map_err(|err| reject_input(&mut run, err))?;

    let form_document = persist(ctx, &mut run, Collection::RoadmapForms, &user_id, form.to_value())?;
    let form_name = form.full_name().map(str::to_string);

    let request = GenerationRequest::Roadmap(form);
    let raw = request_text(
        ctx,
        &mut run,
        TemplateId::Roadmap,
        &request,
        &ctx.config().models.roadmap,
    )?;
    let (artifact, payload) = extract_and_validate(&mut run, &raw, ShapeId::Roadmap)?;
    let roadmap = expect_shape(artifact, |a| a.into_roadmap())?;

    let user_name = payload
        .get("userName")
        .and_then(Value::as_str)
        .filter(|name| !name.trim().is_empty())
        .map(str::to_string)
        .or(form_name);

    let record = RoadmapRecord { user_name, form_id: Some(form_document.id), roadmap };
    let stored =
        persist(ctx, &mut run, Collection::Roadmaps, &user_id, serde_json::to_value(&record)?)?;

    RoadmapDocument::from_stored(&stored)
}

/// All roadmaps of a user, newest first.
pub fn list(store: &impl DocumentStore, user_id: &str) -> Result<Vec<RoadmapDocument>, AppError> {
    let user_id = UserId::parse(user_id)?;
    load_roadmaps(store, &user_id, None)
}

/// Summary cards for every roadmap of a user.
pub fn summaries(store: &impl DocumentStore, user_id: &str) -> Result<RoadmapSummaries, AppError> {
    let user_id = UserId::parse(user_id)?;
    let formatted_roadmaps: Vec<RoadmapSummary> =
        load_roadmaps(store, &user_id, None)?.iter().map(RoadmapDocument::summary).collect();

    Ok(RoadmapSummaries { total_roadmaps: formatted_roadmaps.len(), formatted_roadmaps })
}

/// Summary cards for the three most recent roadmaps.
pub fn recent(store: &impl DocumentStore, user_id: &str) -> Result<Vec<RoadmapSummary>, AppError> {
    let user_id = UserId::parse(user_id)?;
    let roadmaps = load_roadmaps(store, &user_id, Some(RECENT_LIMIT))?;
    if roadmaps.is_empty() {
        return Err(AppError::not_found("No roadmaps found for this user"));
    }
    Ok(roadmaps.iter().map(RoadmapDocument::summary).collect())
}

/// A single roadmap by id.
pub fn show(store: &impl DocumentStore, id: &str) -> Result<RoadmapDocument, AppError> {
    let id = ObjectId::parse(id)?;
    let document = store
        .find_by_id(Collection::Roadmaps, &id)?
        .ok_or_else(|| AppError::not_found("Roadmap not found"))?;
    RoadmapDocument::from_stored(&document)
}

/// Record step and quiz progress for one phase of a stored roadmap.
pub fn update_progress(
    store: &impl DocumentStore,
    id: &str,
    update: &ProgressUpdate,
) -> Result<RoadmapDocument, AppError> {
    let id = ObjectId::parse(id)?;
    let mut document = store
        .find_by_id(Collection::Roadmaps, &id)?
        .ok_or_else(|| AppError::not_found("Roadmap not found"))?;

    let mut record: RoadmapRecord = document.decode()?;
    record.roadmap.apply_progress(update)?;
    document.body = serde_json::to_value(&record)?;
    store.replace(Collection::Roadmaps, &document)?;

    tracing::info!(roadmap = %id, phase = update.phase_index, "progress updated");
    RoadmapDocument::from_stored(&document)
}

fn load_roadmaps(
    store: &impl DocumentStore,
    user_id: &UserId,
    limit: Option<usize>,
) -> Result<Vec<RoadmapDocument>, AppError> {
    store
        .find_by_user(Collection::Roadmaps, user_id, limit)?
        .iter()
        .map(RoadmapDocument::from_stored)
        .collect()
}
