//! scorly-audit
//!
//! Application-level audit events for report generation and download.

pub mod events;
