//! OpenAI API client for the Chat Completions API

use priorauth_core::GenerateError;
use serde::{Deserialize, Serialize};

const API_URL: &str = "https://api.openai.com/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4.1";

/// A text-generation capability: given a system instruction and a
/// prompt, produce generated text. May fail; failures are treated as
/// non-retriable and propagate to the caller.
///
/// Implemented by [`OpenAiClient`] in production and by fakes in the
/// pipeline tests.
pub trait TextGenerator: Send + Sync {
    fn completion(
        &self,
        system: &str,
        prompt: &str,
    ) -> impl Future<Output = Result<String, GenerateError>> + Send;
}

/// Client for the OpenAI Chat Completions API
#[derive(Clone)]
pub struct OpenAiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
}

/// A chat message in the request body
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Request body for the Chat Completions API
#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

/// Response from the Chat Completions API
#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// Error detail from the Chat Completions API
#[derive(Deserialize)]
struct ApiError {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

impl OpenAiClient {
    /// Create a new client with the given API key
    pub fn new(api_key: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model: DEFAULT_MODEL.to_string(),
        }
    }

    async fn send(&self, system: &str, prompt: &str) -> Result<String, GenerateError> {
        let request = ApiRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
        };

        let response = self
            .http
            .post(API_URL)
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| GenerateError::Completion(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            if let Ok(api_err) = serde_json::from_str::<ApiError>(&body) {
                return Err(GenerateError::Completion(format!(
                    "OpenAI API error ({}): {}",
                    status, api_err.error.message
                )));
            }
            return Err(GenerateError::Completion(format!(
                "OpenAI API error ({}): {}",
                status, body
            )));
        }

        let parsed: ApiResponse = response
            .json()
            .await
            .map_err(|e| GenerateError::Completion(format!("Failed to parse response: {}", e)))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| GenerateError::Completion("No text content in response".to_string()))
    }
}

impl TextGenerator for OpenAiClient {
    async fn completion(&self, system: &str, prompt: &str) -> Result<String, GenerateError> {
        self.send(system, prompt).await
    }
}
