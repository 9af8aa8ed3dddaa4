//! GeminiApiAgent - Direct REST API implementation of the analysis actions.
//!
//! Every action is a single `generateContent` call carrying the rendered
//! prompt and the document as an `inlineData` part.

use crate::data_uri;
use crate::prompts::{PromptLibrary, SYSTEM_INSTRUCTION};
use async_trait::async_trait;
use docsage_core::config::{GeminiConfig, GeminiSettings};
use docsage_core::{AgentError, AnalysisAgent};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    prompts: Arc<PromptLibrary>,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            prompts: Arc::new(PromptLibrary::new()),
        }
    }

    /// Builds an agent from loaded configuration.
    ///
    /// The model comes from `config.toml` first, then `secret.json`, then the
    /// default.
    pub fn from_config(credentials: &GeminiConfig, settings: &GeminiSettings) -> Self {
        let model = settings
            .model_name
            .clone()
            .or_else(|| credentials.model_name.clone())
            .unwrap_or_else(|| DEFAULT_GEMINI_MODEL.to_string());

        let agent = Self::new(credentials.api_key.clone(), model);
        match &settings.base_url {
            Some(url) => agent.with_base_url(url.clone()),
            None => agent,
        }
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at another endpoint (a proxy, or a mock in tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, prompt: String, payload: &str) -> Result<String, AgentError> {
        let document = data_uri::parse(payload).ok_or_else(|| {
            AgentError::InvalidPayload("document payload is not a data: URI".into())
        })?;

        let request = GenerateContentRequest {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![
                    Part::InlineData {
                        inline_data: InlineDataPayload {
                            mime_type: document.mime_type,
                            data: document.data,
                        },
                    },
                    Part::Text { text: prompt },
                ],
            }],
            system_instruction: Some(Content {
                role: "system".to_string(),
                parts: vec![Part::Text {
                    text: SYSTEM_INSTRUCTION.to_string(),
                }],
            }),
        };

        self.send_request(&request).await
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String, AgentError> {
        let url = format!(
            "{}/{model}:generateContent",
            self.base_url,
            model = self.model
        );

        tracing::debug!(model = %self.model, "Sending Gemini generateContent request");

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| AgentError::Network {
                message: format!("Gemini API request failed: {err}"),
                is_retryable: err.is_connect() || err.is_timeout(),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse =
            response.json().await.map_err(|err| AgentError::Api {
                status: StatusCode::OK.as_u16(),
                message: format!("Failed to parse Gemini response: {err}"),
                is_retryable: false,
            })?;

        extract_text_response(parsed)
    }
}

#[async_trait]
impl AnalysisAgent for GeminiApiAgent {
    async fn summarize(&self, payload: &str, document_name: &str) -> Result<String, AgentError> {
        let prompt = self.prompts.summary(document_name)?;
        self.generate(prompt, payload).await
    }

    async fn answer_question(&self, question: &str, payload: &str) -> Result<String, AgentError> {
        let prompt = self.prompts.answer(question)?;
        self.generate(prompt, payload).await
    }

    async fn analyze_risks(&self, payload: &str) -> Result<String, AgentError> {
        let prompt = self.prompts.risks()?;
        self.generate(prompt, payload).await
    }

    async fn define_term(&self, term: &str, payload: &str) -> Result<String, AgentError> {
        let prompt = self.prompts.definition(term)?;
        self.generate(prompt, payload).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part {
    Text {
        text: String,
    },
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineDataPayload,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineDataPayload {
    mime_type: String,
    data: String,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

/// Joins the text parts of the first candidate.
fn extract_text_response(response: GenerateContentResponse) -> Result<String, AgentError> {
    let text = response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        })
        .unwrap_or_default();

    let text = text.trim();
    if text.is_empty() {
        return Err(AgentError::EmptyResponse);
    }
    Ok(text.to_string())
}

fn map_http_error(status: StatusCode, body: String) -> AgentError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    let is_retryable = matches!(
        status,
        StatusCode::TOO_MANY_REQUESTS
            | StatusCode::INTERNAL_SERVER_ERROR
            | StatusCode::BAD_GATEWAY
            | StatusCode::SERVICE_UNAVAILABLE
            | StatusCode::GATEWAY_TIMEOUT
    );

    AgentError::Api {
        status: status.as_u16(),
        message,
        is_retryable,
    }
}
