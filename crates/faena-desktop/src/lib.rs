//! faena-desktop library root.
//!
//! Config and backend wiring live here so integration tests can exercise
//! them without going through the Tauri command layer.

pub mod backends;
pub mod config;
pub mod progress;
