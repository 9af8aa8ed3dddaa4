use super::agent::{AgentError, AnalysisAgent};
use super::kind::{ActionKind, ActiveAction};
use super::outcome::ActionOutcome;
use super::request::ActionRequest;
use crate::document::{Document, DocumentId};
use crate::error::{DocsageError, Result};
use crate::session::{SessionEvent, SessionHandle, SessionState, SettleStatus};
use crate::transcript::Sender;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Runs at most one action at a time and routes its outcome into the
/// transcript.
///
/// The orchestrator moves between `Idle` and `Running(kind)`. A request made
/// while running is rejected with `Busy`; nothing is queued. Every action that
/// starts ends with exactly one `ai` entry (success or apology), unless the
/// transcript it targeted was reset in the meantime.
pub struct ActionOrchestrator {
    agent: Arc<dyn AnalysisAgent>,
    handle: SessionHandle,
}

/// What `start` captured under the lock.
struct Ticket {
    document: Document,
    epoch: u64,
}

impl ActionOrchestrator {
    pub(crate) fn new(agent: Arc<dyn AnalysisAgent>, handle: SessionHandle) -> Self {
        Self { agent, handle }
    }

    /// Runs `request` against the selected document.
    ///
    /// # Errors
    ///
    /// - `Busy` if another action is running
    /// - `NoDocument` if no document with content is selected
    ///
    /// Collaborator failures are not errors: they come back as
    /// `ActionOutcome::Failed` with the apology already in the transcript.
    pub async fn run(&self, request: ActionRequest) -> Result<ActionOutcome> {
        let ticket = {
            let mut state = self.handle.lock();
            ensure_idle(&state, request.kind())?;
            self.start(&mut state, &request)?
        };
        self.execute(request, ticket).await
    }

    /// Selects `id` and shows its summary, reusing the cached one if present.
    ///
    /// The busy check, the selection and the start of the summary action
    /// happen under one lock, so a `Busy` error always leaves the selection
    /// unchanged.
    ///
    /// # Errors
    ///
    /// - `Busy` if another action is running
    /// - `NotFound` if `id` is unknown
    /// - `NoDocument` if the document has no content
    pub(crate) async fn open(&self, id: DocumentId) -> Result<ActionOutcome> {
        let request = ActionRequest::Summary;
        let ticket = {
            let mut state = self.handle.lock();
            ensure_idle(&state, request.kind())?;

            let state = &mut *state;
            let document = state.documents.select(id, &mut state.transcript)?;
            info!(document_id = %id, "Document selected");
            self.handle
                .publish(SessionEvent::DocumentSelected { document_id: id });

            if let Some(summary) = document.cached_summary() {
                debug!(document_id = %id, "Reusing cached summary");
                let message = state
                    .transcript
                    .append(Sender::Ai, request.success_text(&document.name, summary));
                self.handle.publish(SessionEvent::MessageAppended {
                    message: message.clone(),
                });
                return Ok(ActionOutcome::FromCache { message });
            }

            self.start(state, &request)?
        };
        self.execute(request, ticket).await
    }

    async fn execute(&self, request: ActionRequest, ticket: Ticket) -> Result<ActionOutcome> {
        let guard = RunningGuard {
            handle: &self.handle,
            kind: request.kind(),
            armed: true,
        };

        let result = self.call_agent(&request, &ticket.document).await;

        let outcome = self.settle(&request, &ticket, result);
        guard.disarm();
        Ok(outcome)
    }

    /// Enters `Running` for the selected document. The caller holds the lock
    /// and has checked that nothing is running; on error nothing has been
    /// mutated.
    fn start(&self, state: &mut SessionState, request: &ActionRequest) -> Result<Ticket> {
        let kind = request.kind();
        let document = state
            .documents
            .selected()
            .filter(|d| d.has_content())
            .cloned()
            .ok_or(DocsageError::NoDocument)?;

        if let Some(text) = request.user_message() {
            let message = state.transcript.append(Sender::User, text);
            self.handle
                .publish(SessionEvent::MessageAppended { message });
        }

        let action = ActiveAction {
            kind,
            document_id: document.id,
            input: request.input().map(str::to_string),
            started_at: chrono::Utc::now().to_rfc3339(),
        };
        state.active_action = Some(action.clone());
        let epoch = state.transcript.epoch();

        info!(kind = %kind, document_id = %document.id, "Action started");
        self.handle.publish(SessionEvent::ActionStarted { action });

        Ok(Ticket { document, epoch })
    }

    async fn call_agent(
        &self,
        request: &ActionRequest,
        document: &Document,
    ) -> std::result::Result<String, AgentError> {
        let payload = document.content.as_str();
        match request {
            ActionRequest::Summary => self.agent.summarize(payload, &document.name).await,
            ActionRequest::Answer { question } => {
                self.agent.answer_question(question, payload).await
            }
            ActionRequest::RiskAnalysis => self.agent.analyze_risks(payload).await,
            ActionRequest::Definition { term } => self.agent.define_term(term, payload).await,
        }
    }

    /// Leaves `Running` and appends the outcome entry.
    fn settle(
        &self,
        request: &ActionRequest,
        ticket: &Ticket,
        result: std::result::Result<String, AgentError>,
    ) -> ActionOutcome {
        let kind = request.kind();
        let document = &ticket.document;
        let mut state = self.handle.lock();
        state.active_action = None;

        if state.transcript.epoch() != ticket.epoch {
            drop(state);
            warn!(kind = %kind, document_id = %document.id, "Transcript was reset while the action ran, discarding outcome");
            self.handle.publish(SessionEvent::ActionSettled {
                kind,
                status: SettleStatus::Discarded,
            });
            return ActionOutcome::Discarded { kind };
        }

        let outcome = match result {
            Ok(output) => {
                if kind == ActionKind::Summary {
                    state.documents.cache_summary(document.id, &output);
                }
                let message = state
                    .transcript
                    .append(Sender::Ai, request.success_text(&document.name, &output));
                ActionOutcome::Completed { kind, message }
            }
            Err(err) => {
                warn!(
                    kind = %kind,
                    document_id = %document.id,
                    retryable = err.is_retryable(),
                    "Collaborator failed: {}",
                    err
                );
                let message = state
                    .transcript
                    .append(Sender::Ai, request.apology_text(&document.name));
                ActionOutcome::Failed {
                    kind,
                    message,
                    error: DocsageError::collaborator(kind, err.to_string()),
                }
            }
        };
        drop(state);

        let status = if outcome.is_success() {
            SettleStatus::Succeeded
        } else {
            SettleStatus::Failed
        };
        info!(kind = %kind, document_id = %document.id, ?status, "Action settled");
        if let Some(message) = outcome.message() {
            self.handle.publish(SessionEvent::MessageAppended {
                message: message.clone(),
            });
        }
        self.handle
            .publish(SessionEvent::ActionSettled { kind, status });

        outcome
    }
}

fn ensure_idle(state: &SessionState, requested: ActionKind) -> Result<()> {
    match &state.active_action {
        Some(active) => {
            debug!(requested = %requested, running = %active.kind, "Rejecting action, session is busy");
            Err(DocsageError::Busy {
                running: active.kind,
            })
        }
        None => Ok(()),
    }
}

/// Clears the active action if the future running it is dropped before it
/// settles.
struct RunningGuard<'a> {
    handle: &'a SessionHandle,
    kind: ActionKind,
    armed: bool,
}

impl RunningGuard<'_> {
    fn disarm(mut self) {
        self.armed = false;
    }
}

impl Drop for RunningGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        self.handle.lock().active_action = None;
        warn!(kind = %self.kind, "Action cancelled before it settled");
        self.handle.publish(SessionEvent::ActionSettled {
            kind: self.kind,
            status: SettleStatus::Cancelled,
        });
    }
}
