use crate::action::ActiveAction;
use crate::citation::Highlight;
use crate::document::Document;
use crate::transcript::Message;
use serde::Serialize;

/// Read-only copy of everything the presentation layer renders.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSnapshot {
    pub documents: Vec<Document>,
    pub selected_document: Option<Document>,
    pub transcript: Vec<Message>,
    pub active_action: Option<ActiveAction>,
    pub highlight: Option<Highlight>,
}

impl SessionSnapshot {
    /// True while an action is running; new actions would be rejected.
    pub fn is_busy(&self) -> bool {
        self.active_action.is_some()
    }
}
