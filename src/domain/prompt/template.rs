use super::builder::{PromptContext, PromptError, TemplateId};

/// Turns catalog template text into a finished prompt.
pub trait TemplateRenderer {
    /// Render `source`, the catalog text for `id`, with the variables in
    /// `context`. Errors name the template by its file name.
    fn render(
        &self,
        id: TemplateId,
        source: &str,
        context: &PromptContext,
    ) -> Result<String, PromptError>;
}
