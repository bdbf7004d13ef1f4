//! Persisted document shapes.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::artifact::{LearningContentArtifact, QuizArtifact, RoadmapArtifact};
use crate::domain::{AppError, ObjectId, UserId};

/// Named document collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    RoadmapForms,
    Roadmaps,
    Quizzes,
    LearningContents,
    InterviewQuestionSets,
}

impl Collection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Collection::RoadmapForms => "roadmap_forms",
            Collection::Roadmaps => "roadmaps",
            Collection::Quizzes => "quizzes",
            Collection::LearningContents => "learning_contents",
            Collection::InterviewQuestionSets => "interview_question_sets",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored document: identity, owner, timestamp, and an opaque JSON body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    #[serde(rename = "userId")]
    pub user_id: UserId,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    pub body: Value,
}

impl StoredDocument {
    /// Decode the body into a typed record.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, AppError> {
        serde_json::from_value(self.body.clone()).map_err(|err| {
            AppError::Storage(format!("Document {} has an unexpected shape: {}", self.id, err))
        })
    }
}

/// Ordering used by every "newest first" read: creation time, then id.
pub fn newest_first(a: &StoredDocument, b: &StoredDocument) -> std::cmp::Ordering {
    b.created_at.cmp(&a.created_at).then_with(|| b.id.as_str().cmp(a.id.as_str()))
}

/// Body of a `roadmaps` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    /// The roadmap form this roadmap was generated from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub form_id: Option<ObjectId>,
    pub roadmap: RoadmapArtifact,
}

/// Body of a `quizzes` or `learning_contents` document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseRecord<T> {
    pub roadmap_id: ObjectId,
    pub phase_id: String,
    pub phase_name: String,
    pub artifact: T,
}

pub type QuizRecord = PhaseRecord<QuizArtifact>;
pub type LearningContentRecord = PhaseRecord<LearningContentArtifact>;

/// A roadmap document as returned to callers.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub user_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub created_at: DateTime<Utc>,
    pub roadmap: RoadmapArtifact,
}

impl RoadmapDocument {
    pub fn from_stored(document: &StoredDocument) -> Result<Self, AppError> {
        let record: RoadmapRecord = document.decode()?;
        Ok(Self {
            id: document.id.clone(),
            user_id: document.user_id.clone(),
            user_name: record.user_name,
            created_at: document.created_at,
            roadmap: record.roadmap,
        })
    }

    pub fn summary(&self) -> RoadmapSummary {
        let first = self.roadmap.phases.first();
        RoadmapSummary {
            id: self.id.clone(),
            title: self.roadmap.title.clone(),
            author: self.user_name.clone(),
            created_at: self.created_at,
            key_skills: first
                .map(|phase| phase.actionable_steps.iter().take(3).cloned().collect())
                .unwrap_or_default(),
            industry_trends: first
                .map(|phase| phase.industry_trends.clone())
                .filter(|trends| !trends.is_empty())
                .unwrap_or_else(|| "No data available".to_string()),
        }
    }
}

/// Card-sized view of a roadmap.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapSummary {
    pub id: ObjectId,
    pub title: String,
    pub author: Option<String>,
    pub created_at: DateTime<Utc>,
    pub key_skills: Vec<String>,
    pub industry_trends: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapSummaries {
    pub total_roadmaps: usize,
    pub formatted_roadmaps: Vec<RoadmapSummary>,
}
