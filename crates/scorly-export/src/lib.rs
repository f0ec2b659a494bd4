//! scorly-export
//!
//! Renders stored reports into downloadable JSON or CSV artifacts.

pub mod artifact;
pub mod csv;
pub mod envelope;
pub mod error;
pub mod flatten;
