use serde::{Deserialize, Serialize};

use super::CourseRef;

/// Sectioned study text for one roadmap phase plus the courses parsed out of it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LearningContentArtifact {
    pub content: String,
    pub courses: Vec<CourseRef>,
}
