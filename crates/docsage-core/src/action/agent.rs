//! Contract for the external AI collaborators.

use async_trait::async_trait;
use thiserror::Error;

/// Failure reported by an [`AnalysisAgent`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// The request never produced an HTTP response.
    #[error("request failed: {message}")]
    Network { message: String, is_retryable: bool },

    /// The model API answered with an error status.
    #[error("API error ({status}): {message}")]
    Api {
        status: u16,
        message: String,
        is_retryable: bool,
    },

    /// The model answered but produced no text.
    #[error("response contained no text")]
    EmptyResponse,

    /// The document payload could not be sent.
    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    /// The agent is not configured (missing key, bad model name).
    #[error("configuration error: {0}")]
    Configuration(String),
}

impl AgentError {
    /// Whether trying again later might succeed. Informational only: the
    /// session never retries on its own.
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Network { is_retryable, .. } | Self::Api { is_retryable, .. } => *is_retryable,
            _ => false,
        }
    }
}

/// The AI operations a session depends on but does not implement.
///
/// `payload` is always the document's encoded content, passed through
/// untouched.
#[async_trait]
pub trait AnalysisAgent: Send + Sync {
    async fn summarize(&self, payload: &str, document_name: &str) -> Result<String, AgentError>;

    async fn answer_question(&self, question: &str, payload: &str) -> Result<String, AgentError>;

    /// The returned analysis may contain Markdown.
    async fn analyze_risks(&self, payload: &str) -> Result<String, AgentError>;

    async fn define_term(&self, term: &str, payload: &str) -> Result<String, AgentError>;
}
