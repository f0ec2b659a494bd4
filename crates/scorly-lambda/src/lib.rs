//! scorly-lambda
//!
//! HTTP surface of the report pipeline: `generate-report`,
//! `download-report` and report housekeeping, served on AWS Lambda or as a
//! plain listener.

use axum::Router;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method};
use axum::middleware as axum_mw;
use axum::routing::{delete, get, post};
use tower_http::cors::{Any, CorsLayer};

pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod state;

use state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            AUTHORIZATION,
            CONTENT_TYPE,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
        ]);

    Router::new()
        // Protected routes
        .route("/generate-report", post(routes::generate::generate_report))
        .route("/download-report", get(routes::download::missing_report_id))
        .route("/download-report/", get(routes::download::missing_report_id))
        .route(
            "/download-report/{report_id}",
            get(routes::download::download_report),
        )
        .route("/reports", get(routes::reports::list_reports))
        .route("/reports/{report_id}", delete(routes::reports::delete_report))
        .route("/report-templates", get(routes::reports::list_templates))
        .route_layer(axum_mw::from_fn_with_state(
            state.clone(),
            middleware::auth::require_auth,
        ))
        // Health (no auth)
        .route("/health", get(routes::health::health_check))
        .layer(axum_mw::from_fn(middleware::audit::audit_log))
        .layer(cors)
        .with_state(state)
}
