//! Health check endpoints.

use actix_web::{get, web, HttpResponse};
use serde::Serialize;

use crate::models::AppState;

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// Service status.
    pub status: &'static str,
    /// Service version.
    pub version: &'static str,
    /// Service name.
    pub service: &'static str,
}

/// Readiness check response.
#[derive(Debug, Serialize)]
pub struct ReadyResponse {
    /// Service status.
    pub status: &'static str,
    /// Music folder accessible.
    pub music_folder: bool,
    /// Directory of the state file accessible.
    pub state_dir: bool,
}

/// Health check endpoint.
///
/// GET /health
///
/// Returns 200 if the service is running.
#[get("/health")]
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
        service: env!("CARGO_PKG_NAME"),
    })
}

/// Readiness check endpoint.
///
/// GET /ready
///
/// Returns 200 once both storage directories exist.
#[get("/ready")]
pub async fn ready(data: web::Data<AppState>) -> HttpResponse {
    let music_folder_ok = data.library.root().is_dir();
    let state_dir_ok = data
        .state_store
        .file_path()
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .map(|p| p.is_dir())
        .unwrap_or(true);

    let all_ok = music_folder_ok && state_dir_ok;

    let response = ReadyResponse {
        status: if all_ok { "ready" } else { "not_ready" },
        music_folder: music_folder_ok,
        state_dir: state_dir_ok,
    };

    if all_ok {
        HttpResponse::Ok().json(response)
    } else {
        HttpResponse::ServiceUnavailable().json(response)
    }
}

/// Configure health routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(health).service(ready);
}
