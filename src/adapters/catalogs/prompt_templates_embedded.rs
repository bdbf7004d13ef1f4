//! Embedded catalog of feature prompt templates.
//!
//! Templates are compiled into the binary from `src/assets/prompts/`.

use include_dir::{Dir, include_dir};

use crate::domain::{PromptCatalog, TemplateId};

static PROMPTS_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/src/assets/prompts");

#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedPromptCatalog;

impl PromptCatalog for EmbeddedPromptCatalog {
    fn template_source(&self, id: TemplateId) -> Option<&str> {
        PROMPTS_DIR.get_file(id.file_name()).and_then(|file| file.contents_utf8())
    }
}
