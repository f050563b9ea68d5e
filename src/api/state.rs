//! State document endpoints.

use actix_web::{get, post, web, HttpResponse};
use serde_json::Value;

use crate::error::AppResult;
use crate::models::{AppState, StatusResponse};

/// Persist the client's full application state.
///
/// POST /api/save-data
///
/// The server overwrites `lastSaved` with its own clock before writing.
#[post("/api/save-data")]
pub async fn save_data(
    data: web::Data<AppState>,
    body: web::Json<Value>,
) -> AppResult<HttpResponse> {
    let saved_at = data.state_store.save(body.into_inner()).await?;

    tracing::info!(saved_at, "State saved");

    Ok(HttpResponse::Ok().json(StatusResponse::success("Data saved.")))
}

/// Return the saved application state, or the default one.
///
/// GET /api/load-data
///
/// Always answers 200; a missing or corrupt file yields the default state.
#[get("/api/load-data")]
pub async fn load_data(data: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(data.state_store.load().await)
}

/// Configure state routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(save_data).service(load_data);
}
