//! Core of Docsage: an in-memory document analysis session.
//!
//! A [`SessionController`](session::SessionController) holds the uploaded
//! documents, the transcript of the selected document, the single in-flight
//! AI action and the citation highlight. The AI operations themselves are
//! supplied through the [`AnalysisAgent`](action::AnalysisAgent) trait.

pub mod action;
pub mod citation;
pub mod config;
pub mod document;
pub mod error;
pub mod session;
pub mod transcript;

// Re-export common types
pub use action::{ActionKind, ActionOutcome, AgentError, AnalysisAgent};
pub use error::{DocsageError, Result};
pub use session::{SessionController, SessionEvent, SessionSnapshot};
