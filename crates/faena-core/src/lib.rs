//! faena-core
//!
//! Pure domain types for worksite safety forms: descriptors, answers,
//! backend envelopes and the view models handed to the front end.
//! No network or storage dependency: the shared vocabulary of Faena.

pub mod error;
pub mod keys;
pub mod models;
pub mod window;
