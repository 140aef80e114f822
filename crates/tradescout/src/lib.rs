//! Core library for the tradescout matching service.
//!
//! The `workflows` tree holds the ranking and pattern-inference engine
//! behind read-only store traits; `config`, `telemetry`, and `error`
//! provide the shared application plumbing consumed by `services/api`.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
