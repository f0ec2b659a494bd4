//! scorly-storage
//!
//! The report store and data computation collaborators. Thin wrapper
//! around Supabase's REST and auth endpoints, plus an in-memory backend
//! for local runs and tests.

pub mod backend;
pub mod error;
pub mod memory;
pub mod supabase;
