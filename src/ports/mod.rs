mod document_store;
mod text_generator;

pub use document_store::DocumentStore;
pub use text_generator::TextGenerator;
