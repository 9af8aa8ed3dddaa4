use super::event::SessionEvent;
use super::snapshot::SessionSnapshot;
use super::state::SessionHandle;
use crate::action::{
    ActionOrchestrator, ActionOutcome, ActionRequest, ActiveAction, AnalysisAgent,
};
use crate::citation::{CitationLinker, Highlight};
use crate::config::SessionConfig;
use crate::document::{Document, DocumentId};
use crate::error::{DocsageError, Result};
use crate::transcript::Message;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio::time::Instant;
use tracing::{debug, info};

/// The entry point the presentation layer talks to.
///
/// `SessionController` owns the documents, the transcript, the active action
/// and the citation highlight of one in-memory session. Callers only issue
/// commands and read snapshots; they never mutate state directly.
///
/// # Thread Safety
///
/// All methods take `&self`. State sits behind a mutex that is only held for
/// synchronous updates, so an `Arc<SessionController>` can be shared with
/// spawned tasks that drive long-running actions.
pub struct SessionController {
    handle: SessionHandle,
    orchestrator: ActionOrchestrator,
    config: SessionConfig,
}

impl SessionController {
    /// Creates an empty session that calls `agent` for every action.
    pub fn new(agent: Arc<dyn AnalysisAgent>, config: SessionConfig) -> Self {
        let handle = SessionHandle::new(CitationLinker::new(config.highlight_window()));
        let orchestrator = ActionOrchestrator::new(agent, handle.clone());
        Self {
            handle,
            orchestrator,
            config,
        }
    }

    /// Subscribes to state-change notifications.
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.handle.subscribe()
    }

    // ============================================================================
    // Documents
    // ============================================================================

    /// Adds an uploaded document. The payload is stored as given.
    pub fn add_document(&self, name: impl Into<String>, payload: impl Into<String>) -> Document {
        let document = self.handle.lock().documents.add(name, payload);
        info!(document_id = %document.id, name = %document.name, "Document added");
        self.handle.publish(SessionEvent::DocumentAdded {
            document_id: document.id,
            name: document.name.clone(),
        });
        document
    }

    /// Selects a document and starts a fresh, empty transcript for it.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if `id` is unknown; state is left unchanged.
    pub fn select_document(&self, id: DocumentId) -> Result<Document> {
        let document = {
            let mut state = self.handle.lock();
            let state = &mut *state;
            state.documents.select(id, &mut state.transcript)?
        };
        info!(document_id = %id, "Document selected");
        self.handle
            .publish(SessionEvent::DocumentSelected { document_id: id });
        Ok(document)
    }

    /// Selects a document and, if `summarize_on_open` is set, shows its
    /// summary.
    ///
    /// A cached summary is appended directly without calling the agent;
    /// otherwise a summary action runs. Returns `None` when summaries on open
    /// are disabled.
    ///
    /// # Errors
    ///
    /// - `NotFound` if `id` is unknown
    /// - `Busy` if another action is running; the selection is left unchanged
    pub async fn open_document(&self, id: DocumentId) -> Result<Option<ActionOutcome>> {
        if !self.config.summarize_on_open {
            self.select_document(id)?;
            return Ok(None);
        }
        self.orchestrator.open(id).await.map(Some)
    }

    // ============================================================================
    // Actions
    // ============================================================================

    /// Summarizes the selected document.
    pub async fn request_summary(&self) -> Result<ActionOutcome> {
        self.orchestrator.run(ActionRequest::Summary).await
    }

    /// Asks a question about the selected document.
    ///
    /// The question appears in the transcript before the agent is called.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank question, in addition to the errors of
    /// [`ActionOrchestrator::run`].
    pub async fn send_question(&self, text: &str) -> Result<ActionOutcome> {
        let request = ActionRequest::answer(text)?;
        self.orchestrator.run(request).await
    }

    /// Identifies risks in the selected document.
    pub async fn request_risks(&self) -> Result<ActionOutcome> {
        self.orchestrator.run(ActionRequest::RiskAnalysis).await
    }

    /// Defines a term as used in the selected document.
    ///
    /// # Errors
    ///
    /// `InvalidInput` for a blank term, before anything is appended.
    pub async fn define_term(&self, text: &str) -> Result<ActionOutcome> {
        let request = ActionRequest::definition(text)?;
        self.orchestrator.run(request).await
    }

    // ============================================================================
    // Citations
    // ============================================================================

    /// Raises a highlight for the selected document.
    ///
    /// # Errors
    ///
    /// Returns `NoDocument` if nothing is selected.
    pub fn on_citation_click(&self) -> Result<Highlight> {
        let highlight = {
            let mut state = self.handle.lock();
            let document_id = state
                .documents
                .selected_id()
                .ok_or(DocsageError::NoDocument)?;
            state.citations.activate(document_id, Instant::now())
        };
        debug!(document_id = %highlight.document_id, token = highlight.token, "Citation activated");
        self.handle.publish(SessionEvent::HighlightRaised {
            highlight: highlight.clone(),
        });
        Ok(highlight)
    }

    /// The current highlight, or `None` once its window has elapsed.
    pub fn highlight(&self) -> Option<Highlight> {
        self.handle.lock().citations.current(Instant::now())
    }

    // ============================================================================
    // Reads
    // ============================================================================

    pub fn active_action(&self) -> Option<ActiveAction> {
        self.handle.lock().active_action.clone()
    }

    pub fn transcript(&self) -> Vec<Message> {
        self.handle.lock().transcript.all().to_vec()
    }

    pub fn document(&self, id: DocumentId) -> Option<Document> {
        self.handle.lock().documents.get(id).cloned()
    }

    pub fn selected_document(&self) -> Option<Document> {
        self.handle.lock().documents.selected().cloned()
    }

    /// Copies the whole observable state in one consistent read.
    pub fn snapshot(&self) -> SessionSnapshot {
        let mut state = self.handle.lock();
        let highlight = state.citations.current(Instant::now());
        SessionSnapshot {
            documents: state.documents.all().to_vec(),
            selected_document: state.documents.selected().cloned(),
            transcript: state.transcript.all().to_vec(),
            active_action: state.active_action.clone(),
            highlight,
        }
    }
}
