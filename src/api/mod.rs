//! HTTP endpoints.

pub mod frontend;
pub mod health;
pub mod music;
pub mod state;

use actix_web::web;

use crate::error::AppError;

/// JSON extractor settings shared by all endpoints.
///
/// Bodies are parsed as JSON whatever their `Content-Type`, since browser
/// clients often post `JSON.stringify` output as `text/plain` or with no
/// type at all. Malformed or oversized bodies are reported through the
/// usual error envelope instead of actix's plain-text default.
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .content_type_required(false)
        .content_type(|_| true)
        // Unparseable input is the client's fault: 400, not 500.
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into())
}
