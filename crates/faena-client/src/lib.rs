//! faena-client
//!
//! JSON-over-HTTP access to the forms backend, plus the session key-value
//! store the client reads its bearer token from.

pub mod backend;
pub mod error;
pub mod http;
pub mod session;
