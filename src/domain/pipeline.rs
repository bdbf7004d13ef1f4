//! Pipeline stage tracking.
//!
//! One [`PipelineRun`] follows a single invocation from request to stored
//! artifact and emits a `tracing` event for every transition.

use std::fmt;

use tracing::{debug, info, warn};

/// How much raw model text is copied into failure logs.
const RAW_LOG_LIMIT: usize = 2000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Start,
    PromptBuilt,
    ResponseReceived,
    Extracted,
    FallbackApplied,
    Validated,
    Persisted,
    Failed(FailureKind),
}

/// Which step a failed run stopped at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Input,
    Prompt,
    Network,
    Extraction,
    Validation,
    Storage,
}

impl FailureKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailureKind::Input => "input",
            FailureKind::Prompt => "prompt",
            FailureKind::Network => "network",
            FailureKind::Extraction => "extraction",
            FailureKind::Validation => "validation",
            FailureKind::Storage => "storage",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PipelineStage::Start => f.write_str("start"),
            PipelineStage::PromptBuilt => f.write_str("prompt_built"),
            PipelineStage::ResponseReceived => f.write_str("response_received"),
            PipelineStage::Extracted => f.write_str("extracted"),
            PipelineStage::FallbackApplied => f.write_str("fallback_applied"),
            PipelineStage::Validated => f.write_str("validated"),
            PipelineStage::Persisted => f.write_str("persisted"),
            PipelineStage::Failed(kind) => write!(f, "failed({})", kind.as_str()),
        }
    }
}

/// Stage history of one pipeline invocation.
#[derive(Debug, Clone)]
pub struct PipelineRun {
    feature: &'static str,
    stages: Vec<PipelineStage>,
}

impl PipelineRun {
    pub fn start(feature: &'static str) -> Self {
        debug!(feature, stage = %PipelineStage::Start, "pipeline started");
        Self { feature, stages: vec![PipelineStage::Start] }
    }

    pub fn advance(&mut self, stage: PipelineStage) {
        debug!(feature = self.feature, %stage, "pipeline stage reached");
        self.stages.push(stage);
    }

    /// Record a stored document.
    pub fn persisted(&mut self, collection: &str, id: &str) {
        info!(feature = self.feature, collection, id, "artifact persisted");
        self.stages.push(PipelineStage::Persisted);
    }

    pub fn fail(&mut self, kind: FailureKind, message: &str) {
        warn!(feature = self.feature, failure = kind.as_str(), message, "pipeline failed");
        self.stages.push(PipelineStage::Failed(kind));
    }

    /// Record an extraction or validation failure with the offending model text.
    pub fn fail_with_raw(&mut self, kind: FailureKind, message: &str, raw: &str) {
        warn!(
            feature = self.feature,
            failure = kind.as_str(),
            message,
            raw = truncate(raw, RAW_LOG_LIMIT),
            "model output rejected"
        );
        self.stages.push(PipelineStage::Failed(kind));
    }

    pub fn stages(&self) -> &[PipelineStage] {
        &self.stages
    }

    pub fn current(&self) -> PipelineStage {
        self.stages.last().copied().unwrap_or(PipelineStage::Start)
    }
}

fn truncate(raw: &str, limit: usize) -> &str {
    match raw.char_indices().nth(limit) {
        Some((index, _)) => &raw[..index],
        None => raw,
    }
}
