//! Resolving a phase query against the user's latest roadmap.

use crate::domain::{
    AppError, Collection, ObjectId, PhaseQuery, PhaseRequest, RoadmapDocument,
};
use crate::ports::DocumentStore;

/// A phase request together with the roadmap it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedPhase {
    pub roadmap_id: ObjectId,
    pub request: PhaseRequest,
}

/// Select the first phase of the user's most recent roadmap whose name
/// contains the requested phase name.
pub fn resolve_phase(
    store: &impl DocumentStore,
    query: PhaseQuery,
) -> Result<ResolvedPhase, AppError> {
    let latest = store
        .find_by_user(Collection::Roadmaps, &query.user_id, Some(1))?
        .into_iter()
        .next()
        .ok_or_else(|| AppError::not_found("Roadmap not found for the provided userId"))?;
    let document = RoadmapDocument::from_stored(&latest)?;

    let phase = document.roadmap.find_phase(&query.phase_name).cloned().ok_or_else(|| {
        AppError::not_found(format!("Phase '{}' not found in the roadmap", query.phase_name))
    })?;

    Ok(ResolvedPhase {
        roadmap_id: document.id,
        request: PhaseRequest { query, roadmap_title: document.roadmap.title, phase },
    })
}
