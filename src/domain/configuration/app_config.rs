//! Application configuration models.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::domain::validation::InterviewCounts;

/// Configuration loaded from `learnpath.toml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Generative service endpoint settings.
    #[serde(default)]
    pub gemini: GeminiApiConfig,
    /// Model id per feature.
    #[serde(default)]
    pub models: ModelConfig,
    /// Document storage settings.
    #[serde(default)]
    pub storage: StorageConfig,
    /// Interview question counts.
    #[serde(default)]
    pub interview: InterviewConfig,
}

impl AppConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.gemini.validate()?;
        self.models.validate()?;
        self.storage.validate()?;
        self.interview.validate()?;
        Ok(())
    }
}

/// Gemini REST API configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeminiApiConfig {
    /// Base URL; `models/<model>:generateContent` is appended per call.
    #[serde(default = "default_api_url")]
    pub api_url: Url,
    /// Request timeout in seconds.
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for GeminiApiConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), timeout_secs: default_timeout() }
    }
}

impl GeminiApiConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.timeout_secs == 0 {
            return Err(AppError::config_error("timeout_secs must be greater than 0"));
        }
        if self.api_url.cannot_be_a_base() {
            return Err(AppError::config_error(format!(
                "api_url must be a base URL: {}",
                self.api_url
            )));
        }
        Ok(())
    }
}

fn default_api_url() -> Url {
    Url::parse("https://generativelanguage.googleapis.com/v1beta/")
        .expect("Default API URL must be valid")
}

fn default_timeout() -> u64 {
    120
}

/// Model ids used by each feature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelConfig {
    #[serde(default = "default_flash_model")]
    pub roadmap: String,
    #[serde(default = "default_flash_model")]
    pub learning_content: String,
    #[serde(default = "default_quiz_model")]
    pub quiz: String,
    #[serde(default = "default_quiz_model")]
    pub interview: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            roadmap: default_flash_model(),
            learning_content: default_flash_model(),
            quiz: default_quiz_model(),
            interview: default_quiz_model(),
        }
    }
}

impl ModelConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        for (name, model) in [
            ("roadmap", &self.roadmap),
            ("learning_content", &self.learning_content),
            ("quiz", &self.quiz),
            ("interview", &self.interview),
        ] {
            if model.trim().is_empty() {
                return Err(AppError::config_error(format!("models.{} must not be empty", name)));
            }
        }
        Ok(())
    }
}

fn default_flash_model() -> String {
    "gemini-1.5-flash".to_string()
}

fn default_quiz_model() -> String {
    "gemini-2.5-flash".to_string()
}

/// Where documents are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StorageConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self { data_dir: default_data_dir() }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.data_dir.as_os_str().is_empty() {
            return Err(AppError::config_error("storage.data_dir must not be empty"));
        }
        Ok(())
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".learnpath")
}

/// Interview question counts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterviewConfig {
    /// Questions requested from the model.
    #[serde(default = "default_requested_count")]
    pub requested_count: usize,
    /// Line-scan threshold and truncation length.
    #[serde(default = "default_line_scan_count")]
    pub line_scan_count: usize,
}

impl Default for InterviewConfig {
    fn default() -> Self {
        Self {
            requested_count: default_requested_count(),
            line_scan_count: default_line_scan_count(),
        }
    }
}

impl InterviewConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.requested_count == 0 {
            return Err(AppError::config_error("interview.requested_count must be greater than 0"));
        }
        if self.line_scan_count == 0 {
            return Err(AppError::config_error("interview.line_scan_count must be greater than 0"));
        }
        Ok(())
    }

    pub fn counts(&self) -> InterviewCounts {
        InterviewCounts { requested: self.requested_count, line_scan: self.line_scan_count }
    }
}

fn default_requested_count() -> usize {
    50
}

fn default_line_scan_count() -> usize {
    10
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_config_defaults() {
        let config = AppConfig::default();
        assert_eq!(
            config.gemini.api_url.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/"
        );
        assert_eq!(config.gemini.timeout_secs, 120);
        assert_eq!(config.models.roadmap, "gemini-1.5-flash");
        assert_eq!(config.models.quiz, "gemini-2.5-flash");
        assert_eq!(config.storage.data_dir, PathBuf::from(".learnpath"));
        assert_eq!(config.interview.counts(), InterviewCounts::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn validate_gemini_config_invalid_timeout() {
        let config = GeminiApiConfig { timeout_secs: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_model_config_blank_model() {
        let config = ModelConfig { interview: "  ".to_string(), ..Default::default() };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("models.interview"));
    }

    #[test]
    fn validate_interview_config_zero_counts() {
        let config = InterviewConfig { line_scan_count: 0, ..Default::default() };
        assert!(config.validate().is_err());
    }
}
