//! Admin API handlers: auth and mock deploys

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use super::{session, ServerState};

/// Simulated deploy delays
const GITHUB_DEPLOY_DELAY: Duration = Duration::from_millis(2000);
const VERCEL_DEPLOY_DELAY: Duration = Duration::from_millis(1500);

/// API failure, rendered as `{success: false, error}` with a status code
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("password must not be empty")]
    PasswordRequired,

    #[error("invalid password")]
    InvalidPassword,

    #[error("admin password not configured")]
    AdminDisabled,

    #[error("missing deploy platform")]
    MissingPlatform,

    #[error("unsupported deploy platform: {0}")]
    UnsupportedPlatform(String),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::PasswordRequired | ApiError::MissingPlatform => StatusCode::BAD_REQUEST,
            ApiError::InvalidPassword => StatusCode::UNAUTHORIZED,
            ApiError::AdminDisabled => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::UnsupportedPlatform(_) => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = json!({
            "success": false,
            "error": self.to_string(),
        });
        (self.status(), Json(body)).into_response()
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthRequest {
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

/// POST /api/auth - check the admin password and issue a session token
pub async fn auth(
    State(state): State<Arc<ServerState>>,
    Json(req): Json<AuthRequest>,
) -> Result<Json<AuthResponse>, ApiError> {
    let Some(configured) = &state.admin_password else {
        return Err(ApiError::AdminDisabled);
    };

    if req.password.is_empty() {
        return Err(ApiError::PasswordRequired);
    }

    if !session::verify_password(&req.password, configured) {
        return Err(ApiError::InvalidPassword);
    }

    let issued_ms = chrono::Utc::now().timestamp_millis();
    let token = session::issue_token(&state.secret, issued_ms);

    Ok(Json(AuthResponse {
        success: true,
        message: Some("login successful".to_string()),
        token: Some(token),
    }))
}

/// GET /api/auth/verify - check a bearer token against its 8-hour window
pub async fn verify(
    State(state): State<Arc<ServerState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, ApiError> {
    if state.admin_password.is_none() {
        return Err(ApiError::AdminDisabled);
    }

    let token = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();

    let now_ms = chrono::Utc::now().timestamp_millis();
    if session::verify_token(&state.secret, token, now_ms) {
        Ok(Json(json!({ "success": true })))
    } else {
        Err(ApiError::InvalidPassword)
    }
}

#[derive(Debug, Deserialize)]
pub struct DeployRequest {
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub config: Value,
}

/// POST /api/deploy - mock deploy simulators
///
/// No network call occurs; each platform sleeps a fixed delay and returns a
/// hard-coded payload.
pub async fn deploy(
    State(_state): State<Arc<ServerState>>,
    Json(req): Json<DeployRequest>,
) -> Result<Json<Value>, ApiError> {
    if req.platform.is_empty() {
        return Err(ApiError::MissingPlatform);
    }

    match req.platform.to_lowercase().as_str() {
        "github" => {
            tokio::time::sleep(GITHUB_DEPLOY_DELAY).await;
            Ok(Json(github_payload(&req.config)))
        }
        "vercel" => {
            tokio::time::sleep(VERCEL_DEPLOY_DELAY).await;
            Ok(Json(vercel_payload(&req.config)))
        }
        other => Err(ApiError::UnsupportedPlatform(other.to_string())),
    }
}

/// Simulated GitHub Pages deploy result
fn github_payload(config: &Value) -> Value {
    let username = config["username"].as_str().unwrap_or("yourusername");
    let repo = config["repoName"].as_str().unwrap_or("personal-blog");
    let url = format!("https://{}.github.io/{}/", username, repo);

    json!({
        "success": true,
        "platform": "GitHub Pages",
        "url": url,
        "message": "Deployed! GitHub Pages is configured",
        "steps": [
            "1. Code pushed to the GitHub repository",
            "2. GitHub Actions workflow configured",
            "3. Static files built",
            "4. GitHub Pages deployment finished",
        ],
        "instructions": {
            "repository": format!("https://github.com/{}/{}", username, repo),
            "pagesSettings": format!("https://github.com/{}/{}/settings/pages", username, repo),
            "deployStatus": format!("https://github.com/{}/{}/actions", username, repo),
            "site": url,
        },
        "tips": [
            "The first deploy can take a few minutes",
            "Configure custom domains in the Pages settings",
            "Deploy logs are available under Actions",
        ],
    })
}

/// Simulated Vercel deploy result
fn vercel_payload(config: &Value) -> Value {
    let project = config["projectName"].as_str().unwrap_or("personal-blog");
    let url = format!("https://{}.vercel.app", project);

    json!({
        "success": true,
        "platform": "Vercel",
        "url": url,
        "message": "Deployed! Your blog is live",
        "steps": [
            "1. Code pushed to GitHub",
            "2. Vercel detected the change",
            "3. Static files built",
            "4. Deployment is live",
        ],
        "instructions": {
            "project": format!("https://vercel.com/dashboard/projects/{}", project),
            "domains": format!("https://vercel.com/dashboard/projects/{}/settings/domains", project),
            "site": url,
        },
        "tips": [
            "The free tier is plenty for a personal blog",
            "Preview deployments let you test before publishing",
            "HTTPS certificates are automatic",
        ],
    })
}
