use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of an uploaded document.
///
/// Allocated from a per-session counter, so ids increase with upload order
/// and are never reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentId(pub u64);

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// An uploaded document, the unit of analysis.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    /// Unique identifier, immutable.
    pub id: DocumentId,
    /// Display name, usually the uploaded file name.
    pub name: String,
    /// Encoded payload (a `data:` URI). Immutable after creation.
    pub content: String,
    /// Cached summary text; empty until the first successful summary.
    #[serde(default)]
    pub summary: String,
}

impl Document {
    /// Returns true if the document carries something an agent can analyse.
    pub fn has_content(&self) -> bool {
        !self.content.trim().is_empty()
    }

    pub fn cached_summary(&self) -> Option<&str> {
        if self.summary.is_empty() {
            None
        } else {
            Some(&self.summary)
        }
    }
}
