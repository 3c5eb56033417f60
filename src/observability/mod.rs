//! # Observability
//!
//! Structured JSON event logging for lifecycle operations.

pub mod logger;

pub use logger::{Logger, Severity};
