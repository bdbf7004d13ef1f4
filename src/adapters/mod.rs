pub mod catalogs;
pub mod filesystem_document_store;
pub mod gemini_client_http;
pub mod memory_document_store;
pub mod template;

pub use catalogs::EmbeddedPromptCatalog;
pub use filesystem_document_store::FilesystemDocumentStore;
pub use gemini_client_http::HttpGeminiClient;
pub use memory_document_store::MemoryDocumentStore;
pub use template::MinijinjaTemplateRenderer;
