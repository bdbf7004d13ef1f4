use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::CourseRef;
use crate::domain::AppError;

/// A generated career roadmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapArtifact {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub overview: String,
    pub phases: Vec<Phase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_resources: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub challenges_and_solutions: Option<Value>,
}

/// One stage of a roadmap.
///
/// `phase_name` is the only field the validator insists on; everything else
/// is taken from the model output on a best-effort basis.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phase {
    pub phase_name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub actionable_steps: Vec<String>,
    #[serde(default)]
    pub recommended_courses: Vec<CourseRef>,
    #[serde(default)]
    pub industry_trends: String,
    #[serde(default)]
    pub completed_steps: BTreeSet<usize>,
    #[serde(default)]
    pub quiz_completed: bool,
}

/// Progress change for a single phase.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProgressUpdate {
    pub phase_index: usize,
    #[serde(default)]
    pub completed_steps: Option<Vec<usize>>,
    #[serde(default)]
    pub quiz_completed: Option<bool>,
}

impl RoadmapArtifact {
    /// Find the first phase whose name contains `query`.
    pub fn find_phase(&self, query: &str) -> Option<&Phase> {
        self.phases.iter().find(|phase| phase.phase_name.contains(query))
    }

    /// Replace the completed steps of a phase and optionally its quiz flag.
    ///
    /// Missing `completed_steps` clears the phase's progress; `quiz_completed`
    /// is only touched when supplied.
    pub fn apply_progress(&mut self, update: &ProgressUpdate) -> Result<(), AppError> {
        let phase = self
            .phases
            .get_mut(update.phase_index)
            .ok_or_else(|| AppError::invalid_input("Invalid phase index"))?;

        let steps: BTreeSet<usize> =
            update.completed_steps.clone().unwrap_or_default().into_iter().collect();
        if let Some(step) = steps.iter().find(|step| **step >= phase.actionable_steps.len()) {
            return Err(AppError::invalid_input(format!(
                "Invalid step index {} for phase with {} actionable steps",
                step,
                phase.actionable_steps.len()
            )));
        }

        phase.completed_steps = steps;
        if let Some(done) = update.quiz_completed {
            phase.quiz_completed = done;
        }
        Ok(())
    }
}
