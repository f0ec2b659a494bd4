//! scorly-auth
//!
//! Caller identity and report read authorization. Supabase issues the
//! bearer tokens; this crate either verifies them locally or defers to an
//! [`identity::IdentityProvider`] that asks the auth server.

pub mod access;
pub mod error;
pub mod identity;
pub mod jwt;
