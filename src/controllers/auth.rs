//! Login, logout and the GitHub configuration probe.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use crate::AppState;

#[derive(Debug, Deserialize)]
struct LoginRequest {
    username: String,
    password: String,
}

#[derive(Debug, Serialize)]
struct LoginResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Exchange credentials for an opaque session token. The failure message is
/// deliberately generic; there is no lockout or rate limiting.
async fn login(data: web::Data<AppState>, body: web::Json<LoginRequest>) -> impl Responder {
    if data.verifier.verify(&body.username, &body.password) {
        let token = data.sessions.issue();
        log::info!("[Auth] Login succeeded for {}", body.username);
        HttpResponse::Ok().json(LoginResponse {
            success: true,
            token: Some(token),
            message: None,
        })
    } else {
        log::warn!("[Auth] Login failed for {}", body.username);
        HttpResponse::Unauthorized().json(LoginResponse {
            success: false,
            token: None,
            message: Some("Invalid credentials".to_string()),
        })
    }
}

/// Revoke the presented session token.
async fn logout(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim_start_matches("Bearer "));

    let revoked = token.map(|t| data.sessions.revoke(t)).unwrap_or(false);
    HttpResponse::Ok().json(serde_json::json!({ "success": revoked }))
}

/// Configuration probe: reports whether a GitHub token exists, never the
/// token itself. The client uses this to warn about local-only persistence.
async fn github_token_status(data: web::Data<AppState>) -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({
        "hasToken": data.config.remote.is_some()
    }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/login").route(web::post().to(login)));
    cfg.service(web::resource("/api/logout").route(web::post().to(logout)));
    cfg.service(web::resource("/api/github-token").route(web::get().to(github_token_status)));
}
