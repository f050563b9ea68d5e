//! Music upload and delete endpoints.

use actix_files::Files;
use actix_multipart::{Multipart, MultipartError};
use actix_web::{post, web, HttpResponse};
use futures::TryStreamExt;
use std::path::Path;

use crate::error::{AppError, AppResult};
use crate::library::MUSIC_ROUTE;
use crate::models::{AppState, DeleteMusicRequest, StatusResponse};

/// Multipart field carrying the uploaded file.
const UPLOAD_FIELD: &str = "file";

fn bad_multipart(e: MultipartError) -> AppError {
    AppError::BadRequest(format!("Malformed upload: {}", e))
}

/// Upload a music file.
///
/// POST /api/upload-music
///
/// Expects `multipart/form-data` with the audio in a `file` field. The
/// stored name is the filename the client sent.
#[post("/api/upload-music")]
pub async fn upload_music(
    data: web::Data<AppState>,
    mut payload: Multipart,
) -> AppResult<HttpResponse> {
    while let Some(mut field) = payload.try_next().await.map_err(bad_multipart)? {
        if field.name() != UPLOAD_FIELD {
            continue;
        }

        let filename = field
            .content_disposition()
            .get_filename()
            .map(str::to_owned)
            .ok_or_else(|| AppError::BadRequest("Upload is missing a filename".to_string()))?;

        let mut bytes = Vec::new();
        while let Some(chunk) = field.try_next().await.map_err(bad_multipart)? {
            bytes.extend_from_slice(&chunk);
        }

        let track = data.library.upload(&filename, &bytes).await?;
        return Ok(HttpResponse::Ok().json(track));
    }

    Err(AppError::BadRequest(format!(
        "Missing '{}' field in upload",
        UPLOAD_FIELD
    )))
}

/// Delete an uploaded music file.
///
/// POST /api/delete-music
#[post("/api/delete-music")]
pub async fn delete_music(
    data: web::Data<AppState>,
    body: web::Json<DeleteMusicRequest>,
) -> AppResult<HttpResponse> {
    data.library.delete(&body.filename).await?;

    Ok(HttpResponse::Ok().json(StatusResponse::success(format!(
        "{} deleted.",
        body.filename
    ))))
}

/// Static service for `/music/<filename>`.
pub fn static_files(music_folder: &Path) -> Files {
    Files::new(MUSIC_ROUTE, music_folder)
}

/// Configure music routes.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(upload_music).service(delete_music);
}
