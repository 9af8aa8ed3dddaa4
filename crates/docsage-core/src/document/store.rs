use super::model::{Document, DocumentId};
use crate::error::{DocsageError, Result};
use crate::transcript::Transcript;

/// Holds the document corpus in upload order and the active selection.
#[derive(Debug, Default)]
pub struct DocumentStore {
    documents: Vec<Document>,
    selected: Option<DocumentId>,
    next_id: u64,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a document with an empty summary and returns it.
    pub fn add(&mut self, name: impl Into<String>, content: impl Into<String>) -> Document {
        self.next_id += 1;
        let document = Document {
            id: DocumentId(self.next_id),
            name: name.into(),
            content: content.into(),
            summary: String::new(),
        };
        self.documents.push(document.clone());
        document
    }

    /// Makes `id` the active document and resets the transcript.
    ///
    /// This is the only operation that resets a transcript, so messages from a
    /// previously selected document can never be seen after switching.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` without touching any state if `id` is unknown.
    pub fn select(&mut self, id: DocumentId, transcript: &mut Transcript) -> Result<Document> {
        let document = self
            .get(id)
            .cloned()
            .ok_or_else(|| DocsageError::not_found("document", id.to_string()))?;
        self.selected = Some(id);
        transcript.reset();
        Ok(document)
    }

    pub fn get(&self, id: DocumentId) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn selected_id(&self) -> Option<DocumentId> {
        self.selected
    }

    pub fn selected(&self) -> Option<&Document> {
        self.selected.and_then(|id| self.get(id))
    }

    pub fn all(&self) -> &[Document] {
        &self.documents
    }

    /// Replaces the cached summary. Returns false if the document is unknown.
    pub(crate) fn cache_summary(&mut self, id: DocumentId, summary: &str) -> bool {
        match self.documents.iter_mut().find(|d| d.id == id) {
            Some(document) => {
                document.summary = summary.to_string();
                true
            }
            None => false,
        }
    }
}
