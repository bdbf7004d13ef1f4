use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::domain::{GenerationError, GenerationFailure};
use crate::ports::TextGenerator;

/// A recorded `generate` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateCall {
    pub prompt: String,
    pub model: String,
}

/// Text generator returning queued responses and recording every call.
#[derive(Clone, Default)]
pub struct FakeTextGenerator {
    pub calls: Arc<Mutex<Vec<GenerateCall>>>,
    responses: Arc<Mutex<VecDeque<Result<String, GenerationError>>>>,
}

impl FakeTextGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator whose next call returns `text`.
    pub fn replying(text: impl Into<String>) -> Self {
        let fake = Self::new();
        fake.push_response(text);
        fake
    }

    /// Generator whose next call fails with `reason`.
    pub fn failing(reason: GenerationFailure, message: &str) -> Self {
        let fake = Self::new();
        fake.responses.lock().unwrap().push_back(Err(GenerationError::new(reason, message)));
        fake
    }

    pub fn push_response(&self, text: impl Into<String>) {
        self.responses.lock().unwrap().push_back(Ok(text.into()));
    }

    pub fn calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().unwrap().clone()
    }
}

impl TextGenerator for FakeTextGenerator {
    fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationError> {
        self.calls
            .lock()
            .unwrap()
            .push(GenerateCall { prompt: prompt.to_string(), model: model.to_string() });
        self.responses.lock().unwrap().pop_front().unwrap_or_else(|| {
            Err(GenerationError::new(GenerationFailure::Unknown, "no fake response queued"))
        })
    }
}
