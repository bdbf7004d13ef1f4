pub mod builder;
pub mod template;

pub use builder::{PromptCatalog, PromptContext, PromptError, TemplateId, build_prompt};
pub use template::TemplateRenderer;
