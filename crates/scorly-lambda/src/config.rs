use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use eyre::{WrapErr, bail, eyre};
use scorly_auth::jwt::JwtVerifier;
use scorly_storage::memory::MemoryBackend;
use scorly_storage::supabase::SupabaseClient;

use crate::state::AppState;

/// Where reports, roles and identities come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackendKind {
    Supabase,
    Memory,
}

/// Runtime configuration, read from the environment at startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub backend: BackendKind,
    pub supabase_url: Option<String>,
    pub supabase_anon_key: Option<String>,
    /// When set, bearer tokens are verified locally instead of asking the
    /// auth server on every request.
    pub jwt_secret: Option<String>,
    /// When set, serve plain HTTP here instead of running under Lambda.
    pub listen_addr: Option<SocketAddr>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let backend = match get("SCORLY_BACKEND").as_deref() {
            None | Some("supabase") => BackendKind::Supabase,
            Some("memory") => BackendKind::Memory,
            Some(other) => bail!("unknown SCORLY_BACKEND: {other}"),
        };

        let listen_addr = get("SCORLY_LISTEN_ADDR")
            .map(|raw| {
                raw.parse::<SocketAddr>()
                    .wrap_err_with(|| format!("invalid SCORLY_LISTEN_ADDR: {raw}"))
            })
            .transpose()?;

        let config = Self {
            backend,
            supabase_url: get("SUPABASE_URL"),
            supabase_anon_key: get("SUPABASE_ANON_KEY"),
            jwt_secret: get("SUPABASE_JWT_SECRET"),
            listen_addr,
        };

        if config.backend == BackendKind::Supabase {
            if config.supabase_url.is_none() {
                bail!("SUPABASE_URL is required for the supabase backend");
            }
            if config.supabase_anon_key.is_none() {
                bail!("SUPABASE_ANON_KEY is required for the supabase backend");
            }
        }

        Ok(config)
    }

    /// Wire up the collaborators this configuration names.
    pub fn build_state(&self) -> eyre::Result<AppState> {
        let state = match self.backend {
            BackendKind::Supabase => {
                let url = self
                    .supabase_url
                    .as_deref()
                    .ok_or_else(|| eyre!("SUPABASE_URL is not set"))?;
                let key = self
                    .supabase_anon_key
                    .as_deref()
                    .ok_or_else(|| eyre!("SUPABASE_ANON_KEY is not set"))?;
                AppState::from_backend(Arc::new(SupabaseClient::new(url, key)?))
            }
            BackendKind::Memory => AppState::from_backend(Arc::new(MemoryBackend::new())),
        };

        Ok(match &self.jwt_secret {
            Some(secret) => state.with_identity(Arc::new(JwtVerifier::new(secret))),
            None => state,
        })
    }
}
