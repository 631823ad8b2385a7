//! Gemini API backend implementation using reqwest.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{AppError, ChatMessage, GeminiApiConfig, ModelType, Role};
use crate::ports::ModelBackend;

const X_GOOG_API_KEY: &str = "X-Goog-Api-Key";
const DEFAULT_STATUS_MESSAGE: &str = "Gemini API request failed";

/// HTTP transport for one Gemini model.
///
/// Performs a single request per call; retry behavior belongs to the caller
/// of the whole pipeline.
#[derive(Clone)]
pub struct HttpGeminiBackend {
    api_key: String,
    api_url: Url,
    timeout_secs: u64,
    model: ModelType,
    client: Client,
}

impl std::fmt::Debug for HttpGeminiBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGeminiBackend")
            .field("api_url", &self.api_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGeminiBackend {
    /// Create a new HTTP backend for the given model.
    pub fn new(
        api_key: String,
        config: &GeminiApiConfig,
        model: ModelType,
    ) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::BackendFailure {
                message: format!("Failed to create HTTP client: {}", e),
                status: None,
            })?;

        Ok(Self {
            api_key,
            api_url: config.api_url.clone(),
            timeout_secs: config.timeout_secs,
            model,
            client,
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.api_url.as_str().trim_end_matches('/'),
            self.model.model_id()
        )
    }

    async fn send_request(&self, request: &ApiRequest) -> Result<String, AppError> {
        let response = self
            .client
            .post(self.endpoint())
            .header(X_GOOG_API_KEY, &self.api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    AppError::Timeout { timeout_secs: self.timeout_secs }
                } else {
                    AppError::BackendFailure {
                        message: format!("HTTP request failed: {}", e),
                        status: None,
                    }
                }
            })?;

        let status = response.status();
        let body_text = response.text().await.unwrap_or_default();

        if status.is_success() {
            let api_response: ApiResponse =
                serde_json::from_str(&body_text).map_err(|e| AppError::BackendFailure {
                    message: format!("Failed to parse response: {}", e),
                    status: Some(status.as_u16()),
                })?;

            return api_response
                .candidates
                .into_iter()
                .next()
                .and_then(|candidate| candidate.content)
                .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
                .ok_or_else(|| AppError::BackendFailure {
                    message: "No completion text in response".to_string(),
                    status: Some(status.as_u16()),
                });
        }

        let message = extract_error_message(&body_text).unwrap_or_else(|| {
            if !body_text.trim().is_empty() {
                body_text.clone()
            } else if status.as_u16() == 429 {
                "Rate limited".to_string()
            } else if status.is_server_error() {
                "Server error".to_string()
            } else {
                DEFAULT_STATUS_MESSAGE.to_string()
            }
        });

        Err(AppError::BackendFailure { message, status: Some(status.as_u16()) })
    }
}

#[derive(Debug, Serialize)]
struct ApiRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    role: &'static str,
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

/// Gemini has no system role; system and user content both map to "user".
fn provider_role(role: Role) -> &'static str {
    match role {
        Role::Assistant => "model",
        Role::System | Role::User => "user",
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

#[async_trait]
impl ModelBackend for HttpGeminiBackend {
    async fn run(&self, messages: &[ChatMessage]) -> Result<String, AppError> {
        let request = ApiRequest {
            contents: messages
                .iter()
                .map(|msg| RequestContent {
                    role: provider_role(msg.role),
                    parts: vec![RequestPart { text: msg.content.clone() }],
                })
                .collect(),
        };

        self.send_request(&request).await
    }
}
