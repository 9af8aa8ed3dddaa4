//! Citation highlighting for the document viewer.
//!
//! Activating a citation raises a [`Highlight`] that expires after a fixed
//! window. Expiry is evaluated when the highlight is read, so no timer task
//! is involved.

use crate::document::DocumentId;
use serde::Serialize;
use std::time::Duration;
use tokio::time::Instant;

/// A transient request for the viewer to scroll to and highlight a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Highlight {
    pub document_id: DocumentId,
    /// Distinct on every activation, so the viewer can tell a repeated click
    /// on the same document from a stale signal.
    pub token: u64,
    #[serde(skip)]
    pub expires_at: Instant,
}

impl Highlight {
    pub fn is_active_at(&self, now: Instant) -> bool {
        now < self.expires_at
    }
}

/// Produces highlight signals and forgets them once they expire.
#[derive(Debug)]
pub struct CitationLinker {
    window: Duration,
    next_token: u64,
    current: Option<Highlight>,
}

impl CitationLinker {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            next_token: 0,
            current: None,
        }
    }

    /// Raises a fresh highlight for `document_id`, replacing any previous one.
    pub fn activate(&mut self, document_id: DocumentId, now: Instant) -> Highlight {
        self.next_token += 1;
        let highlight = Highlight {
            document_id,
            token: self.next_token,
            expires_at: now + self.window,
        };
        self.current = Some(highlight.clone());
        highlight
    }

    /// Returns the highlight if it has not expired, clearing it otherwise.
    pub fn current(&mut self, now: Instant) -> Option<Highlight> {
        if self.current.as_ref().is_some_and(|h| !h.is_active_at(now)) {
            self.current = None;
        }
        self.current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokens_differ_for_same_document() {
        let mut linker = CitationLinker::new(Duration::from_millis(1000));
        let now = Instant::now();
        let first = linker.activate(DocumentId(1), now);
        let second = linker.activate(DocumentId(1), now);

        assert_ne!(first.token, second.token);
        assert_eq!(linker.current(now), Some(second));
    }

    #[test]
    fn test_highlight_clears_after_window() {
        let mut linker = CitationLinker::new(Duration::from_millis(1000));
        let start = Instant::now();
        linker.activate(DocumentId(3), start);

        assert!(linker.current(start + Duration::from_millis(999)).is_some());
        assert!(linker.current(start + Duration::from_millis(1000)).is_none());
        // Once cleared it stays cleared.
        assert!(linker.current(start).is_none());
    }
}
