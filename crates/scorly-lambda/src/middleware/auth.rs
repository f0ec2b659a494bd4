use axum::extract::{Request, State};
use axum::http::header::AUTHORIZATION;
use axum::middleware::Next;
use axum::response::Response;

use scorly_auth::identity::bearer_token;

use crate::error::ApiError;
use crate::state::AppState;

/// Bearer authentication middleware.
///
/// Resolves the `Authorization: Bearer <token>` header through the
/// configured identity provider and inserts the resulting
/// [`scorly_auth::identity::Caller`] into request extensions for handlers.
pub async fn require_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let token = {
        let header = req
            .headers()
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok());
        bearer_token(header)?.to_string()
    };

    let caller = state.identity.authenticate(&token).await.map_err(|e| {
        tracing::warn!(error = %e, "rejected bearer token");
        ApiError::from(e)
    })?;

    req.extensions_mut().insert(caller);

    Ok(next.run(req).await)
}
