use std::sync::OnceLock;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::domain::prompt::{PromptContext, PromptError, TemplateId, TemplateRenderer};

/// Prompt renderer backed by minijinja.
///
/// Prompt files are plain text with `{{ name }}` interpolation. Statement
/// and comment tags are refused with the line they appear on, and a
/// variable missing from the [`PromptContext`] fails the render.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(
        &self,
        id: TemplateId,
        source: &str,
        context: &PromptContext,
    ) -> Result<String, PromptError> {
        if let Some((line, token)) = first_tag(source) {
            return Err(PromptError::TemplateSyntaxNotAllowed {
                template: id.file_name(),
                token: token.to_string(),
                line,
            });
        }

        prompt_env().render_named_str(&id.file_name(), source, &context.variables).map_err(|err| {
            PromptError::TemplateRenderError { template: id.file_name(), reason: err.to_string() }
        })
    }
}

fn prompt_env() -> &'static Environment<'static> {
    static ENV: OnceLock<Environment<'static>> = OnceLock::new();
    ENV.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        // Form JSON is interpolated as-is.
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env
    })
}

/// 1-based line and opening of the first statement or comment tag.
fn first_tag(source: &str) -> Option<(usize, &'static str)> {
    source.lines().enumerate().find_map(|(index, line)| {
        ["{%", "{#"].into_iter().find(|tag| line.contains(tag)).map(|tag| (index + 1, tag))
    })
}
