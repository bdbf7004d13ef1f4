use serde::{Deserialize, Serialize};

/// How an interview question set was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionSource {
    /// The pattern scan found exactly the requested number of questions.
    Generated,
    /// The line scan found enough `Question` lines; the set was truncated.
    LineScan,
    /// Model output was unusable; the static list was substituted.
    Fallback,
}

impl QuestionSource {
    pub fn is_fallback(&self) -> bool {
        matches!(self, QuestionSource::Fallback)
    }
}

/// Interview questions for one roadmap phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InterviewQuestionSet {
    pub phase_name: String,
    pub questions: Vec<String>,
    pub source: QuestionSource,
}
