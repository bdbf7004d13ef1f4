use serde::{Deserialize, Serialize};

/// Number of questions every quiz must carry.
pub const QUIZ_QUESTION_COUNT: usize = 10;
/// Number of answer options every question must carry.
pub const QUIZ_OPTION_COUNT: usize = 4;

/// A validated multiple-choice quiz for one roadmap phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizArtifact {
    pub questions: Vec<QuizQuestion>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub id: u64,
    pub question: String,
    pub options: Vec<String>,
    pub correct_answer: String,
}
