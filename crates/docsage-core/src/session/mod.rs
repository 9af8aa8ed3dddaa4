//! Session orchestration module.
//!
//! # Module Structure
//!
//! - `state`: The state owned by one session and its shared handle
//! - `event`: Notifications published to the presentation layer (`SessionEvent`)
//! - `snapshot`: Read-only view of the session (`SessionSnapshot`)
//! - `controller`: The single entry point for the presentation layer (`SessionController`)

mod controller;
mod event;
mod snapshot;
mod state;


pub use controller::SessionController;
pub use event::{SessionEvent, SettleStatus};
pub use snapshot::SessionSnapshot;
pub(crate) use state::{SessionHandle, SessionState};
