//! Transcript domain module.
//!
//! # Module Structure
//!
//! - `message`: Transcript entries (`Message`, `MessageId`, `Sender`)
//! - `history`: The append-only log for the selected document (`Transcript`)

mod history;
mod message;

pub use history::Transcript;
pub use message::{Message, MessageId, Sender};
