pub mod app_config;
pub mod loader;

pub use app_config::{AppConfig, GeminiApiConfig, InterviewConfig, ModelConfig, StorageConfig};
pub use loader::{CONFIG_ENV, DEFAULT_CONFIG_FILE, load_config, parse_config_content, resolve_config_path};
