//! Document domain module.
//!
//! # Module Structure
//!
//! - `model`: The uploaded document (`Document`, `DocumentId`)
//! - `store`: The document corpus and active selection (`DocumentStore`)

mod model;
mod store;

pub use model::{Document, DocumentId};
pub use store::DocumentStore;
