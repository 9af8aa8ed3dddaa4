//! Long-running AI actions against the selected document.
//!
//! # Module Structure
//!
//! - `kind`: Action identity and the in-flight descriptor (`ActionKind`, `ActiveAction`)
//! - `agent`: The external collaborator contract (`AnalysisAgent`, `AgentError`)
//! - `request`: A requested action with its transcript framing (`ActionRequest`)
//! - `outcome`: What a settled action produced (`ActionOutcome`)
//! - `orchestrator`: Mutual exclusion and outcome routing (`ActionOrchestrator`)

mod agent;
mod kind;
mod orchestrator;
mod outcome;
mod request;

pub use agent::{AgentError, AnalysisAgent};
pub use kind::{ActionKind, ActiveAction};
pub use orchestrator::ActionOrchestrator;
pub use outcome::ActionOutcome;
pub use request::ActionRequest;
