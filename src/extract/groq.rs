// groq.rs
use crate::config::LlmConfig;
use crate::domain::{today, ExtractedFields};
use crate::extract::{build_prompt, parse_model_output, ExtractError, Extractor};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

const SYSTEM_PROMPT: &str = "You extract rental listing data and answer with one JSON object only.";

// OpenAI-compatible chat completion wire types, trimmed to what is sent and read.

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    response_format: ResponseFormat,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    message: String,
    #[serde(default)]
    code: Option<String>,
    /// Set by Groq when JSON mode rejected the model's own output.
    #[serde(default)]
    failed_generation: Option<String>,
}

pub struct GroqExtractor {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GroqExtractor {
    /// Returns `Ok(None)` when no API key is configured; auto-fill is then
    /// disabled rather than failing every request.
    pub fn from_config(config: &LlmConfig) -> Result<Option<Self>, ExtractError> {
        match &config.api_key {
            Some(key) => Self::new(config, key.clone()).map(Some),
            None => Ok(None),
        }
    }

    pub fn new(config: &LlmConfig, api_key: String) -> Result<Self, ExtractError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ExtractError::Provider(e.to_string()))?;

        Ok(Self {
            client,
            endpoint: format!("{}/chat/completions", config.base_url.trim_end_matches('/')),
            model: config.model.clone(),
            api_key,
        })
    }

    fn complete(&self, prompt: &str) -> Result<String, ExtractError> {
        let body = ChatCompletionRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.0,
            response_format: ResponseFormat {
                kind: "json_object",
            },
        };

        let resp = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .map_err(|e| ExtractError::Provider(e.to_string()))?;

        let status = resp.status();
        let text = resp
            .text()
            .map_err(|e| ExtractError::Provider(e.to_string()))?;

        if !status.is_success() {
            return Err(match serde_json::from_str::<ErrorResponse>(&text) {
                Ok(ErrorResponse { error }) if error.code.as_deref() == Some("json_validate_failed") => {
                    ExtractError::MalformedOutput {
                        reason: error.message,
                        raw: error.failed_generation.unwrap_or_default(),
                    }
                }
                Ok(ErrorResponse { error }) => {
                    ExtractError::Provider(format!("HTTP {status}: {}", error.message))
                }
                Err(_) => ExtractError::Provider(format!("HTTP {status}: {text}")),
            });
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text)
            .map_err(|e| ExtractError::Provider(format!("unexpected response body: {e}")))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| ExtractError::Provider("response contained no message".to_string()))
    }
}

impl Extractor for GroqExtractor {
    fn extract(&self, text: &str) -> Result<ExtractedFields, ExtractError> {
        if text.trim().is_empty() {
            return Err(ExtractError::EmptyInput);
        }

        let today = today();
        let content = self.complete(&build_prompt(text, today))?;
        tracing::debug!(model = %self.model, chars = content.len(), "LLM responded");

        parse_model_output(&content, today)
    }
}
