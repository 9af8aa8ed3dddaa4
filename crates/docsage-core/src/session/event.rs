use crate::action::{ActionKind, ActiveAction};
use crate::citation::Highlight;
use crate::document::DocumentId;
use crate::transcript::Message;
use serde::Serialize;

/// Notifications a session publishes as its state changes.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum SessionEvent {
    DocumentAdded {
        document_id: DocumentId,
        name: String,
    },
    /// The selection changed and the transcript is now empty.
    DocumentSelected { document_id: DocumentId },
    MessageAppended { message: Message },
    ActionStarted { action: ActiveAction },
    /// The active action was cleared.
    ActionSettled {
        kind: ActionKind,
        status: SettleStatus,
    },
    HighlightRaised { highlight: Highlight },
}

/// How an action left the running state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SettleStatus {
    Succeeded,
    Failed,
    /// The transcript was reset mid-flight and the outcome was dropped.
    Discarded,
    /// The driving future was dropped before the collaborator answered.
    Cancelled,
}
