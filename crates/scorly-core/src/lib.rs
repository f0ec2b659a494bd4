//! scorly-core
//!
//! Pure domain types for the Scorly report pipeline: reports, roles and
//! report requests. No I/O here. This is the shared vocabulary of the
//! generate/download services and the dashboard frontend.

pub mod error;
pub mod models;
