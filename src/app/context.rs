use crate::adapters::{EmbeddedPromptCatalog, MinijinjaTemplateRenderer};
use crate::domain::{AppConfig, GenerationRequest, PromptError, TemplateId, build_prompt};
use crate::ports::{DocumentStore, TextGenerator};

/// Application context holding dependencies for pipeline execution.
pub struct AppContext<G: TextGenerator, S: DocumentStore> {
    generator: G,
    store: S,
    config: AppConfig,
    catalog: EmbeddedPromptCatalog,
    renderer: MinijinjaTemplateRenderer,
}

impl<G: TextGenerator, S: DocumentStore> AppContext<G, S> {
    /// Create a new application context.
    pub fn new(generator: G, store: S, config: AppConfig) -> Self {
        Self {
            generator,
            store,
            config,
            catalog: EmbeddedPromptCatalog,
            renderer: MinijinjaTemplateRenderer::new(),
        }
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Render the embedded `template` for `request`.
    pub fn render_prompt(
        &self,
        template: TemplateId,
        request: &GenerationRequest,
    ) -> Result<String, PromptError> {
        build_prompt(template, request, &self.catalog, &self.renderer)
    }
}
