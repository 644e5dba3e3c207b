//! faena-engine
//!
//! The dynamic form engine: loads a descriptor, keeps the answer state,
//! resolves dependent options, validates, uploads pictures, reshapes the
//! answers into the descriptor's shape and submits them.

pub mod attachments;
pub mod engine;
pub mod error;
pub mod fields;
pub mod loader;
pub mod messages;
pub mod options;
pub mod reshape;
pub mod state;
pub mod upload;
pub mod validate;

pub use engine::{FormEngine, SubmitOutcome};
pub use error::EngineError;
