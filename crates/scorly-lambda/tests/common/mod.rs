#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Method, Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use scorly_core::models::report::{Report, ReportFormat, ReportStatus, ReportType};
use scorly_core::models::role::{Role, UserRole};
use scorly_lambda::router;
use scorly_lambda::state::AppState;
use scorly_storage::memory::MemoryBackend;

pub const OWNER: (&str, &str) = ("owner-token", "owner-1");
pub const STRANGER: (&str, &str) = ("stranger-token", "stranger-1");
pub const ADMIN: (&str, &str) = ("admin-token", "admin-1");
pub const OFFICIAL: (&str, &str) = ("official-token", "official-1");

/// A backend with an owner, an unrelated user, an admin and a bank official.
pub fn backend() -> MemoryBackend {
    MemoryBackend::new()
        .with_user(OWNER.0, OWNER.1)
        .with_user(STRANGER.0, STRANGER.1)
        .with_role(STRANGER.1, UserRole::new(Role::User))
        .with_user(ADMIN.0, ADMIN.1)
        .with_role(ADMIN.1, UserRole::new(Role::Admin))
        .with_user(OFFICIAL.0, OFFICIAL.1)
        .with_role(OFFICIAL.1, UserRole::new(Role::BankOfficial).with_bank("Northwind"))
}

pub fn app(backend: Arc<MemoryBackend>) -> Router {
    router(AppState::from_backend(backend))
}

pub fn report(id: &str, owner: &str, report_type: ReportType, data: Value) -> Report {
    Report {
        id: id.to_string(),
        user_id: owner.to_string(),
        report_type,
        report_format: ReportFormat::Json,
        status: ReportStatus::Completed,
        title: "Seeded report".to_string(),
        description: None,
        parameters: None,
        generated_data: Some(data),
        file_url: None,
        file_size_bytes: None,
        generated_by: None,
        date_from: Some(jiff::civil::date(2024, 1, 1)),
        date_to: Some(jiff::civil::date(2024, 1, 31)),
        created_at: "2024-02-01T00:00:00Z".parse().unwrap(),
        completed_at: None,
        expires_at: None,
        download_count: Some(0),
        last_downloaded_at: None,
    }
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    pub fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }

    pub fn header(&self, name: &str) -> &str {
        self.headers.get(name).unwrap().to_str().unwrap()
    }
}

/// Send a request to the test router.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> TestResponse {
    let mut builder = Request::builder().method(method).uri(uri);

    if body.is_some() {
        builder = builder.header("content-type", "application/json");
    }
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }

    let body = body
        .map(|v| Body::from(serde_json::to_vec(&v).unwrap()))
        .unwrap_or_else(Body::empty);

    let response = app
        .clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let headers = response.headers().clone();
    let body = response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}
