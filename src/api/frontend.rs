//! Front-end entry page.

use actix_files::NamedFile;
use actix_web::{get, web, HttpRequest, HttpResponse};

use crate::error::{AppError, AppResult};
use crate::models::AppState;

/// GET /
#[get("/")]
pub async fn index(req: HttpRequest, data: web::Data<AppState>) -> AppResult<HttpResponse> {
    let file = NamedFile::open_async(&data.index_file)
        .await
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::NotFound("Index page not found".to_string()),
            _ => AppError::Io(e),
        })?;

    Ok(file.into_response(&req))
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index);
}
