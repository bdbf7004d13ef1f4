pub mod interview;
pub mod learning_content;
pub mod phase;
mod pipeline;
pub mod prompt_preview;
pub mod quiz;
pub mod roadmap;
