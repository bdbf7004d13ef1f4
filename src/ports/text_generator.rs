//! Generative text service port definition.

use crate::domain::GenerationError;

/// Port for single-shot text generation.
///
/// One call per prompt; implementations do not retry.
pub trait TextGenerator {
    /// Send `prompt` to `model` and return the raw response text.
    fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationError>;
}
