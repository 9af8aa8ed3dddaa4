use super::kind::ActionKind;
use crate::error::DocsageError;
use crate::transcript::Message;
use serde::Serialize;

/// What a settled action left behind.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The collaborator succeeded and `message` holds its framed output.
    Completed { kind: ActionKind, message: Message },
    /// The collaborator failed; `message` is the apology shown to the user.
    Failed {
        kind: ActionKind,
        message: Message,
        error: DocsageError,
    },
    /// A cached summary was shown without running an action.
    FromCache { message: Message },
    /// The transcript was reset while the action ran, so nothing was appended.
    Discarded { kind: ActionKind },
}

impl ActionOutcome {
    pub fn kind(&self) -> ActionKind {
        match self {
            Self::Completed { kind, .. } | Self::Failed { kind, .. } | Self::Discarded { kind } => {
                *kind
            }
            Self::FromCache { .. } => ActionKind::Summary,
        }
    }

    /// The `ai` entry appended to the transcript, if any.
    pub fn message(&self) -> Option<&Message> {
        match self {
            Self::Completed { message, .. }
            | Self::Failed { message, .. }
            | Self::FromCache { message } => Some(message),
            Self::Discarded { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&DocsageError> {
        match self {
            Self::Failed { error, .. } => Some(error),
            _ => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Completed { .. } | Self::FromCache { .. })
    }
}
