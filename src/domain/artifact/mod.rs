//! Validated artifacts produced by the generation pipelines.

pub mod course;
pub mod interview;
pub mod learning_content;
pub mod quiz;
pub mod roadmap;

use serde::Serialize;

pub use course::CourseRef;
pub use interview::{InterviewQuestionSet, QuestionSource};
pub use learning_content::LearningContentArtifact;
pub use quiz::{QUIZ_OPTION_COUNT, QUIZ_QUESTION_COUNT, QuizArtifact, QuizQuestion};
pub use roadmap::{Phase, ProgressUpdate, RoadmapArtifact};

/// Any artifact a pipeline can hand back to its caller.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StructuredArtifact {
    Roadmap(RoadmapArtifact),
    LearningContent(LearningContentArtifact),
    Quiz(QuizArtifact),
    InterviewQuestions(InterviewQuestionSet),
}

impl StructuredArtifact {
    pub fn kind(&self) -> &'static str {
        match self {
            StructuredArtifact::Roadmap(_) => "roadmap",
            StructuredArtifact::LearningContent(_) => "learning_content",
            StructuredArtifact::Quiz(_) => "quiz",
            StructuredArtifact::InterviewQuestions(_) => "interview_questions",
        }
    }

    pub fn into_roadmap(self) -> Option<RoadmapArtifact> {
        match self {
            StructuredArtifact::Roadmap(roadmap) => Some(roadmap),
            _ => None,
        }
    }

    pub fn into_quiz(self) -> Option<QuizArtifact> {
        match self {
            StructuredArtifact::Quiz(quiz) => Some(quiz),
            _ => None,
        }
    }
}
