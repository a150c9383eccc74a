//! Live adapter for the `LlmClient` port using an OpenAI-style
//! chat-completions API.

use std::env;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::ports::llm::{CompletionFuture, CompletionRequest, CompletionResponse, LlmClient};

/// Default chat-completions endpoint; `OPENAI_API_URL` overrides it.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1/chat/completions";
/// Bounded timeout applied to completion requests.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

/// Live LLM client that calls a chat-completions endpoint.
pub struct LiveLlmClient {
    client: Client,
    api_url: String,
}

impl LiveLlmClient {
    /// Creates a new live LLM client.
    ///
    /// # Errors
    ///
    /// Returns `Error::Configuration` if the HTTP client cannot be built.
    pub fn new() -> Result<Self, Error> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|err| Error::Configuration(format!("failed to build HTTP client: {err}")))?;
        let api_url = env::var("OPENAI_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string());
        Ok(Self { client, api_url })
    }
}

/// Request body sent to the chat-completions API.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    messages: Vec<ChatMessage<'a>>,
}

/// A single message in the chat-completions request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

/// Top-level response from the chat-completions API.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// One completion choice in the response.
#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// The message body of a completion choice.
#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

/// Error response from the chat-completions API.
#[derive(Deserialize)]
struct ChatError {
    error: ChatErrorDetail,
}

/// Detail inside a chat-completions error response.
#[derive(Deserialize)]
struct ChatErrorDetail {
    message: String,
}

impl LlmClient for LiveLlmClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let model = request.model.clone();
        let system = request.system.clone();
        let prompt = request.prompt.clone();
        let max_tokens = request.max_tokens;
        let temperature = request.temperature;

        Box::pin(async move {
            let api_key = env::var("OPENAI_API_KEY").map_err(|_| {
                Error::Configuration("OPENAI_API_KEY environment variable not set".to_string())
            })?;

            let body = ChatRequest {
                model: &model,
                max_tokens,
                temperature,
                messages: vec![
                    ChatMessage { role: "system", content: &system },
                    ChatMessage { role: "user", content: &prompt },
                ],
            };

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&api_key)
                .json(&body)
                .send()
                .await
                .map_err(|err| Error::Transport(format!("completion request failed: {err}")))?;

            let status = response.status();
            let response_text = response.text().await.map_err(|err| {
                Error::Transport(format!("failed to read completion response: {err}"))
            })?;

            if !status.is_success() {
                let message = serde_json::from_str::<ChatError>(&response_text)
                    .map(|parsed| parsed.error.message)
                    .unwrap_or(response_text);
                return Err(Error::Transport(format!(
                    "completion API error ({}): {message}",
                    status.as_u16()
                )));
            }

            let api_response: ChatResponse = serde_json::from_str(&response_text).map_err(|err| {
                Error::Transport(format!("failed to parse completion response: {err}"))
            })?;

            let text = api_response
                .choices
                .into_iter()
                .map(|choice| choice.message.content)
                .collect::<String>();

            Ok(CompletionResponse { text })
        })
    }
}
