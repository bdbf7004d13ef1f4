//! Gemini `generateContent` client implementation using reqwest.

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, GeminiApiConfig, GenerationError, GenerationFailure};
use crate::ports::TextGenerator;

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GOOGLEAPI_KEY";

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";
const DEFAULT_STATUS_MESSAGE: &str = "Gemini API request failed";

/// HTTP transport for the Gemini API.
///
/// One request per call and no retries.
#[derive(Clone)]
pub struct HttpGeminiClient {
    api_key: String,
    api_url: Url,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiClient")
            .field("api_url", &self.api_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiClient {
    /// Create a new HTTP client with the given API key and configuration.
    pub fn new(api_key: String, config: &GeminiApiConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::config_error(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { api_key, api_url: config.api_url.clone(), client })
    }

    /// Create from the `GOOGLEAPI_KEY` environment variable.
    pub fn from_env_with_config(config: &GeminiApiConfig) -> Result<Self, AppError> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| AppError::EnvironmentVariableMissing(API_KEY_ENV.into()))?;

        Self::new(api_key, config)
    }

    fn endpoint(&self, model: &str) -> Result<Url, GenerationError> {
        self.api_url.join(&format!("models/{}:generateContent", model)).map_err(|e| {
            GenerationError::new(
                GenerationFailure::Unknown,
                format!("Invalid endpoint for model '{}': {}", model, e),
            )
        })
    }

    fn send_request(&self, model: &str, request: &ApiRequest) -> Result<String, GenerationError> {
        let response = self
            .client
            .post(self.endpoint(model)?)
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .map_err(|e| {
                GenerationError::new(GenerationFailure::Network, format!("HTTP request failed: {}", e))
            })?;

        let status = response.status();
        let body_text = response.text().map_err(|e| {
            GenerationError::new(
                GenerationFailure::Network,
                format!("Failed to read response body: {}", e),
            )
            .with_status(status.as_u16())
        })?;

        if status.is_success() {
            let api_response: ApiResponse = serde_json::from_str(&body_text).map_err(|e| {
                GenerationError::new(
                    GenerationFailure::Unknown,
                    format!("Failed to parse response: {}", e),
                )
                .with_status(status.as_u16())
            })?;

            return api_response.text().ok_or_else(|| {
                GenerationError::new(GenerationFailure::Unknown, "No candidate text in response")
                    .with_status(status.as_u16())
            });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status == StatusCode::TOO_MANY_REQUESTS {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(GenerationError::new(classify_status(status, &message), message)
            .with_status(status.as_u16()))
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

impl ApiResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let texts: Vec<String> = content.parts.into_iter().filter_map(|part| part.text).collect();
        if texts.is_empty() { None } else { Some(texts.concat()) }
    }
}

fn classify_status(status: StatusCode, message: &str) -> GenerationFailure {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GenerationFailure::Auth,
        StatusCode::BAD_REQUEST if message.contains("API key") => GenerationFailure::Auth,
        StatusCode::TOO_MANY_REQUESTS => GenerationFailure::RateLimit,
        _ => GenerationFailure::Unknown,
    }
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}

impl TextGenerator for HttpGeminiClient {
    fn generate(&self, prompt: &str, model: &str) -> Result<String, GenerationError> {
        let request = ApiRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part { text: Some(prompt.to_string()) }],
            }],
        };

        self.send_request(model, &request)
    }
}
