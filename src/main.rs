use actix_cors::Cors;
use actix_files::Files;
use actix_web::{middleware::Logger, web, App, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;

mod auth;
mod config;
mod controllers;
mod error;
mod http;
mod notes;

use auth::{CredentialVerifier, EnvCredentialVerifier, SessionStore};
use config::Config;
use notes::{GitHubStore, LocalNoteStore, NoteAggregator};

pub struct AppState {
    pub config: Config,
    pub github: Option<Arc<GitHubStore>>,
    pub local: Arc<LocalNoteStore>,
    pub aggregator: Arc<NoteAggregator>,
    pub sessions: Arc<SessionStore>,
    pub verifier: Arc<dyn CredentialVerifier>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;

    match &config.remote {
        Some(remote) => log::info!(
            "[Startup] GitHub persistence enabled for {}/{} on branch {}",
            remote.owner,
            remote.repo,
            remote.branch
        ),
        None => log::info!(
            "[Startup] No GitHub token configured - notes persist to {}",
            config.local_notes_file
        ),
    }

    let github = config
        .remote
        .clone()
        .map(|remote| Arc::new(GitHubStore::new(remote)));
    let local = Arc::new(LocalNoteStore::new(&config.local_notes_file));
    let aggregator = Arc::new(NoteAggregator::new(github.clone(), local.clone()));
    let sessions = Arc::new(SessionStore::new());
    let verifier: Arc<dyn CredentialVerifier> = Arc::new(EnvCredentialVerifier::new(
        &config.admin_user_b64,
        &config.admin_pass_b64,
    ));

    // Serve the front-end bundle only if the directory exists
    let public_dir = config.public_dir.clone();
    let serve_public = std::path::Path::new(&public_dir).exists();
    if serve_public {
        log::info!("[Startup] Serving static assets from {}", public_dir);
    }

    log::info!("Starting notehub server on port {}", port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        let mut app = App::new()
            .app_data(web::Data::new(AppState {
                config: config.clone(),
                github: github.clone(),
                local: local.clone(),
                aggregator: aggregator.clone(),
                sessions: sessions.clone(),
                verifier: verifier.clone(),
            }))
            .wrap(Logger::default())
            .wrap(cors)
            .configure(controllers::health::config)
            .configure(controllers::auth::config)
            .configure(controllers::notes::config);

        if serve_public {
            app = app.service(Files::new("/", public_dir.clone()).index_file("index.html"));
        }

        app
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
