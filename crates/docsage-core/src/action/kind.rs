use crate::document::DocumentId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The four named actions a session can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Summarize the document.
    Summary,
    /// Answer a user question about the document.
    Qna,
    /// Identify risks in the document.
    Risks,
    /// Define a term as used in the document.
    Jargon,
}

impl ActionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Summary => "summary",
            Self::Qna => "qna",
            Self::Risks => "risks",
            Self::Jargon => "jargon",
        }
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Descriptor of the single in-flight action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActiveAction {
    pub kind: ActionKind,
    /// Document the action runs against.
    pub document_id: DocumentId,
    /// The question or term that triggered a `qna` or `jargon` action.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    /// Timestamp when the action started (ISO 8601 format).
    pub started_at: String,
}
