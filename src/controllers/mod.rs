pub mod auth;
pub mod health;
pub mod notes;

use actix_web::{web, HttpRequest, HttpResponse};

use crate::AppState;

/// Validate the Bearer session token from a request.
pub(crate) fn validate_session_from_request(
    state: &web::Data<AppState>,
    req: &HttpRequest,
) -> Result<(), HttpResponse> {
    let token = req
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.trim_start_matches("Bearer ").to_string());

    let token = match token {
        Some(t) => t,
        None => {
            return Err(HttpResponse::Unauthorized().json(serde_json::json!({
                "success": false,
                "message": "No authorization token provided"
            })));
        }
    };

    if state.sessions.validate(&token) {
        Ok(())
    } else {
        Err(HttpResponse::Unauthorized().json(serde_json::json!({
            "success": false,
            "message": "Invalid or expired session"
        })))
    }
}
