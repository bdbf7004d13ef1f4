pub mod artifact;
pub mod configuration;
pub mod error;
pub mod extraction;
pub mod identities;
pub mod pipeline;
pub mod prompt;
pub mod records;
pub mod request;
pub mod validation;

pub use artifact::{
    CourseRef, InterviewQuestionSet, LearningContentArtifact, Phase, ProgressUpdate,
    QuestionSource, QuizArtifact, QuizQuestion, RoadmapArtifact, StructuredArtifact,
};
pub use configuration::{AppConfig, GeminiApiConfig, InterviewConfig, ModelConfig, StorageConfig};
pub use error::{
    AppError, ExtractionError, GenerationError, GenerationFailure, ValidationError,
    ValidationFailure,
};
pub use identities::{ObjectId, UserId};
pub use pipeline::{FailureKind, PipelineRun, PipelineStage};
pub use prompt::{PromptCatalog, PromptContext, PromptError, TemplateId, TemplateRenderer, build_prompt};
pub use records::{Collection, RoadmapDocument, RoadmapSummaries, RoadmapSummary, StoredDocument};
pub use request::{GenerationRequest, InterviewRequest, PhaseQuery, PhaseRequest, RoadmapForm};
pub use validation::{InterviewCounts, ShapeId};
