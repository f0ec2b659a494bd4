use std::sync::Arc;

use scorly_auth::identity::{IdentityProvider, RoleDirectory};
use scorly_storage::backend::{ReportComputation, ReportStore, TemplateCatalog};

/// Shared application state, injected into all route handlers via Axum state.
///
/// Each collaborator is a trait object so tests can swap in fakes.
#[derive(Clone)]
pub struct AppState {
    pub identity: Arc<dyn IdentityProvider>,
    pub roles: Arc<dyn RoleDirectory>,
    pub computation: Arc<dyn ReportComputation>,
    pub store: Arc<dyn ReportStore>,
    pub templates: Arc<dyn TemplateCatalog>,
}

impl AppState {
    /// Use one backend for every collaborator.
    pub fn from_backend<B>(backend: Arc<B>) -> Self
    where
        B: IdentityProvider
            + RoleDirectory
            + ReportComputation
            + ReportStore
            + TemplateCatalog
            + 'static,
    {
        Self {
            identity: backend.clone(),
            roles: backend.clone(),
            computation: backend.clone(),
            store: backend.clone(),
            templates: backend,
        }
    }

    /// Replace how bearer tokens are resolved.
    pub fn with_identity(mut self, identity: Arc<dyn IdentityProvider>) -> Self {
        self.identity = identity;
        self
    }
}
