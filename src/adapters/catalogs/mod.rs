mod prompt_templates_embedded;

pub use prompt_templates_embedded::EmbeddedPromptCatalog;
