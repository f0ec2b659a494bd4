use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::json;
use tracing::{debug, info};

use scorly_auth::error::AuthError;
use scorly_auth::identity::{Caller, IdentityProvider, RoleDirectory};
use scorly_core::models::report::Report;
use scorly_core::models::request::ReportRequest;
use scorly_core::models::role::UserRole;
use scorly_core::models::template::ReportTemplate;

use crate::backend::{
    MARK_DOWNLOADED_PROCEDURE, ReportComputation, ReportStore, TemplateCatalog,
    generation_procedure,
};
use crate::error::BackendError;

/// Client for a Supabase project.
///
/// Every call is made with the caller's own access token so the database's
/// row-level security applies, with the anon key as `apikey`.
#[derive(Clone)]
pub struct SupabaseClient {
    http: Client,
    base_url: String,
    anon_key: String,
}

/// The subset of the auth server's user object we need.
#[derive(Debug, Deserialize)]
struct AuthUser {
    id: String,
    #[serde(default)]
    email: Option<String>,
}

impl SupabaseClient {
    pub fn new(base_url: &str, anon_key: &str) -> Result<Self, BackendError> {
        if base_url.trim().is_empty() {
            return Err(BackendError::Config("Supabase URL is empty".to_string()));
        }
        let http = Client::builder().build()?;
        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            anon_key: anon_key.to_string(),
        })
    }

    fn rest_url(&self, path: &str) -> String {
        format!("{}/rest/v1/{path}", self.base_url)
    }

    fn auth_url(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.base_url)
    }

    fn with_token(&self, req: RequestBuilder, access_token: &str) -> RequestBuilder {
        req.header("apikey", &self.anon_key).bearer_auth(access_token)
    }

    /// Read rows of `table` as the caller.
    async fn select<T: DeserializeOwned>(
        &self,
        caller: &Caller,
        table: &str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>, BackendError> {
        let req = self.http.get(self.rest_url(table)).query(query);
        let resp = self.with_token(req, &caller.access_token).send().await?;

        if !resp.status().is_success() {
            return Err(status_error(table, resp).await);
        }
        Ok(serde_json::from_slice(&resp.bytes().await?)?)
    }

    /// Call a Postgres function through PostgREST.
    async fn rpc<T: DeserializeOwned>(
        &self,
        access_token: &str,
        procedure: &str,
        args: serde_json::Value,
    ) -> Result<T, BackendError> {
        let req = self
            .http
            .post(self.rest_url(&format!("rpc/{procedure}")))
            .json(&args);
        let resp = self.with_token(req, access_token).send().await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = error_message(resp).await;
            debug!(procedure, status, "rpc failed");
            return Err(BackendError::Procedure {
                procedure: procedure.to_string(),
                message,
            });
        }

        // Void functions come back as an empty body.
        let bytes = resp.bytes().await?;
        let body = if bytes.is_empty() { b"null".as_slice() } else { &bytes[..] };
        Ok(serde_json::from_slice(body)?)
    }
}

/// Best-effort extraction of PostgREST's `{"message": ...}` error body.
async fn error_message(resp: Response) -> String {
    let status = resp.status();
    let text = resp.text().await.unwrap_or_default();
    serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|v| {
            v.get("message")
                .or_else(|| v.get("msg"))
                .or_else(|| v.get("error_description"))
                .and_then(|m| m.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| {
            if text.is_empty() {
                status.to_string()
            } else {
                text
            }
        })
}

/// A failed table call. Token and permission rejections keep their meaning.
async fn status_error(endpoint: &str, resp: Response) -> BackendError {
    let status = resp.status();
    let message = error_message(resp).await;
    match status {
        StatusCode::UNAUTHORIZED => BackendError::Unauthorized(message),
        StatusCode::FORBIDDEN => BackendError::Forbidden(message),
        _ => BackendError::Status {
            endpoint: endpoint.to_string(),
            status: status.as_u16(),
            message,
        },
    }
}

/// PostgREST answers 400 for ids that are not UUIDs and 406 when a
/// single-row read matches nothing. Both mean "no such report" here.
fn is_missing_row(status: StatusCode) -> bool {
    matches!(status, StatusCode::BAD_REQUEST | StatusCode::NOT_ACCEPTABLE)
}

#[async_trait]
impl IdentityProvider for SupabaseClient {
    async fn authenticate(&self, access_token: &str) -> Result<Caller, AuthError> {
        let req = self.http.get(self.auth_url("user"));
        let resp = self
            .with_token(req, access_token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        match resp.status() {
            s if s.is_success() => {
                let user: AuthUser = resp
                    .json()
                    .await
                    .map_err(|e| AuthError::Provider(e.to_string()))?;
                Ok(Caller {
                    id: user.id,
                    email: user.email,
                    access_token: access_token.to_string(),
                })
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(AuthError::InvalidToken(error_message(resp).await))
            }
            _ => Err(AuthError::Provider(error_message(resp).await)),
        }
    }
}

#[async_trait]
impl RoleDirectory for SupabaseClient {
    async fn role_of(&self, caller: &Caller) -> Result<Option<UserRole>, AuthError> {
        let req = self
            .http
            .get(self.rest_url("user_roles"))
            .query(&[("id", format!("eq.{}", caller.id)), ("select", "role,bank".to_string())]);
        let resp = self
            .with_token(req, &caller.access_token)
            .send()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(AuthError::Provider(error_message(resp).await));
        }

        let rows: Vec<UserRole> = resp
            .json()
            .await
            .map_err(|e| AuthError::Provider(e.to_string()))?;
        Ok(rows.into_iter().next())
    }
}

#[async_trait]
impl ReportComputation for SupabaseClient {
    async fn generate(
        &self,
        caller: &Caller,
        request: &ReportRequest,
    ) -> Result<String, BackendError> {
        let procedure = generation_procedure(request.report_type)?;
        info!(procedure, user_id = %caller.id, "requesting report generation");

        let args = json!({
            "p_user_id": caller.id,
            "p_date_from": request.window.from().to_string(),
            "p_date_to": request.window.to().to_string(),
            "p_format": request.format.as_str(),
        });
        self.rpc::<String>(&caller.access_token, procedure, args).await
    }
}

#[async_trait]
impl ReportStore for SupabaseClient {
    async fn list(&self, caller: &Caller) -> Result<Vec<Report>, BackendError> {
        self.select(
            caller,
            "reports",
            &[
                ("select", "*".to_string()),
                ("order", "created_at.desc".to_string()),
            ],
        )
        .await
    }

    async fn fetch(&self, caller: &Caller, report_id: &str) -> Result<Option<Report>, BackendError> {
        let req = self
            .http
            .get(self.rest_url("reports"))
            .query(&[("id", format!("eq.{report_id}")), ("select", "*".to_string())]);
        let resp = self.with_token(req, &caller.access_token).send().await?;

        let status = resp.status();
        if is_missing_row(status) {
            debug!(report_id, status = status.as_u16(), "report lookup rejected");
            return Ok(None);
        }
        if !status.is_success() {
            return Err(status_error("reports", resp).await);
        }

        let rows: Vec<Report> = serde_json::from_slice(&resp.bytes().await?)?;
        Ok(rows.into_iter().next())
    }

    async fn delete(&self, caller: &Caller, report_id: &str) -> Result<bool, BackendError> {
        let req = self
            .http
            .delete(self.rest_url("reports"))
            .query(&[("id", format!("eq.{report_id}"))])
            .header("Prefer", "return=representation");
        let resp = self.with_token(req, &caller.access_token).send().await?;

        let status = resp.status();
        if is_missing_row(status) {
            return Ok(false);
        }
        if !status.is_success() {
            return Err(status_error("reports", resp).await);
        }

        // Rows hidden by row-level security are silently skipped, so an
        // empty representation means nothing was deleted.
        let deleted: Vec<serde_json::Value> = serde_json::from_slice(&resp.bytes().await?)?;
        info!(report_id, deleted = deleted.len(), "report delete");
        Ok(!deleted.is_empty())
    }

    async fn mark_downloaded(&self, caller: &Caller, report_id: &str) -> Result<(), BackendError> {
        self.rpc::<serde_json::Value>(
            &caller.access_token,
            MARK_DOWNLOADED_PROCEDURE,
            json!({ "p_report_id": report_id }),
        )
        .await?;
        Ok(())
    }
}

#[async_trait]
impl TemplateCatalog for SupabaseClient {
    async fn active_templates(&self, caller: &Caller) -> Result<Vec<ReportTemplate>, BackendError> {
        self.select(
            caller,
            "report_templates",
            &[
                ("select", "*".to_string()),
                ("is_active", "eq.true".to_string()),
                ("order", "name.asc".to_string()),
            ],
        )
        .await
    }
}
