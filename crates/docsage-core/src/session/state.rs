use super::event::SessionEvent;
use crate::action::ActiveAction;
use crate::citation::CitationLinker;
use crate::document::DocumentStore;
use crate::transcript::Transcript;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::broadcast;

const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Everything one session owns.
#[derive(Debug)]
pub(crate) struct SessionState {
    pub documents: DocumentStore,
    pub transcript: Transcript,
    pub active_action: Option<ActiveAction>,
    pub citations: CitationLinker,
}

/// Shared access to the session state and its event channel.
///
/// The lock is never held across an `.await`; collaborator calls happen with
/// the state released, so readers can take snapshots while an action runs.
#[derive(Clone)]
pub(crate) struct SessionHandle {
    state: Arc<Mutex<SessionState>>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionHandle {
    pub fn new(citations: CitationLinker) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            state: Arc::new(Mutex::new(SessionState {
                documents: DocumentStore::new(),
                transcript: Transcript::new(),
                active_action: None,
                citations,
            })),
            events,
        }
    }

    /// Locks the state, recovering from poisoning.
    pub fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Publishes an event. Having no subscribers is not an error.
    pub fn publish(&self, event: SessionEvent) {
        let _ = self.events.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }
}
