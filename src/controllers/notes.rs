//! Notes REST API — aggregated listing, upload/create, and repo setup.

use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::{Deserialize, Serialize};

use super::validate_session_from_request;
use crate::config::defaults;
use crate::error::NoteError;
use crate::notes::github::GitHubStore;
use crate::notes::note::{self, Note};
use crate::AppState;

// --- List notes ---

#[derive(Debug, Serialize)]
struct ListNotesResponse {
    success: bool,
    notes: Vec<Note>,
}

/// Merged remote + local note collection. Best-effort: remote failures
/// degrade to local results inside the aggregator, so this never errors.
async fn list_notes(data: web::Data<AppState>) -> impl Responder {
    let notes = data.aggregator.collect().await;
    HttpResponse::Ok().json(ListNotesResponse {
        success: true,
        notes,
    })
}

// --- Upload / create note ---

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct UploadNoteRequest {
    file_name: String,
    content: String,
    category: String,
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct UploadNoteResponse {
    success: bool,
    /// "github" or "local"
    target: String,
    id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    url: Option<String>,
}

fn validation_error(message: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({
        "success": false,
        "message": message
    }))
}

/// Persist a submitted note: to GitHub when configured, otherwise to the
/// local JSON store. A failed remote write (other than bad credentials)
/// also falls back to the local store so the note is not lost.
async fn upload_note(
    data: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<UploadNoteRequest>,
) -> impl Responder {
    if let Err(resp) = validate_session_from_request(&data, &req) {
        return resp;
    }

    // Input validation happens before any store is touched
    if !note::is_valid_file_name(&body.file_name) {
        return validation_error("fileName must be a Markdown file name matching [A-Za-z0-9 _.-]+.md");
    }
    if !note::is_valid_category(&body.category) {
        return validation_error("category may only contain letters, digits, spaces, _ and -");
    }

    let message = body
        .message
        .clone()
        .unwrap_or_else(|| format!("Add note: {} in {}", body.file_name, body.category));

    if let Some(github) = &data.github {
        let path = GitHubStore::note_path(&body.category, &body.file_name);
        match github.put_file(&path, &body.content, &message).await {
            Ok(outcome) => {
                return HttpResponse::Ok().json(UploadNoteResponse {
                    success: true,
                    target: "github".to_string(),
                    id: outcome.sha.unwrap_or_else(|| body.file_name.clone()),
                    url: outcome.html_url,
                });
            }
            Err(NoteError::Unauthorized) => {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "success": false,
                    "message": "GitHub rejected the configured token"
                }));
            }
            Err(e) => {
                log::warn!("[Notes] Remote write failed, saving locally: {}", e);
            }
        }
    }

    save_local(&data, &body)
}

fn save_local(data: &web::Data<AppState>, body: &UploadNoteRequest) -> HttpResponse {
    let saved = Note::from_file(
        note::local_note_id(),
        &body.file_name,
        &body.category,
        body.content.clone(),
        None,
    );
    let id = saved.id.clone();

    match data.local.append(saved) {
        Ok(()) => HttpResponse::Ok().json(UploadNoteResponse {
            success: true,
            target: "local".to_string(),
            id,
            url: None,
        }),
        Err(e) => {
            log::error!("[Notes] Local store write failed: {}", e);
            HttpResponse::InternalServerError().json(serde_json::json!({
                "success": false,
                "message": "Failed to save note"
            }))
        }
    }
}

// --- Repo setup ---

#[derive(Debug, Serialize)]
struct SetupRepoResponse {
    success: bool,
    created: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

/// Materialize the default category directories in the remote repository
/// with README placeholders. No-op in local mode.
async fn setup_repo(data: web::Data<AppState>, req: HttpRequest) -> impl Responder {
    if let Err(resp) = validate_session_from_request(&data, &req) {
        return resp;
    }

    let github = match &data.github {
        Some(github) => github,
        None => {
            return HttpResponse::Ok().json(SetupRepoResponse {
                success: true,
                created: vec![],
                message: Some("GitHub not configured - nothing to set up".to_string()),
            });
        }
    };

    let mut created = Vec::new();
    for category in defaults::SETUP_CATEGORIES {
        match github.ensure_category(category).await {
            Ok(()) => created.push(category.to_string()),
            Err(NoteError::Unauthorized) => {
                return HttpResponse::Unauthorized().json(serde_json::json!({
                    "success": false,
                    "message": "GitHub rejected the configured token"
                }));
            }
            Err(e) => {
                log::warn!("[Notes] Setup of category {} failed: {}", category, e);
            }
        }
    }

    HttpResponse::Ok().json(SetupRepoResponse {
        success: true,
        created,
        message: None,
    })
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/notes").route(web::get().to(list_notes)));
    cfg.service(web::resource("/api/upload-note").route(web::post().to(upload_note)));
    cfg.service(web::resource("/api/setup-repo").route(web::post().to(setup_repo)));
}
