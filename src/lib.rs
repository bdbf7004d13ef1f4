//! learnpath: turn generative-model output into validated, stored learning
//! artifacts (roadmaps, learning content, quizzes, interview questions).

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api;
pub use app::commands::{interview, learning_content, quiz, roadmap};
pub use app::{ApiResponse, AppContext};
pub use domain::configuration::load_config;
pub use domain::{
    AppConfig, AppError, InterviewQuestionSet, LearningContentArtifact, PhaseQuery, QuizArtifact,
    RoadmapArtifact, RoadmapDocument,
};
pub use ports::{DocumentStore, TextGenerator};
