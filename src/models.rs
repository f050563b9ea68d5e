use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::library::MusicLibrary;
use crate::state_store::StateStore;

#[derive(Clone)]
pub struct AppState {
    pub state_store: StateStore,
    pub library: MusicLibrary,
    pub index_file: PathBuf,
}

/// Generic `{status, message}` reply.
#[derive(Debug, Serialize)]
pub struct StatusResponse {
    pub status: &'static str,
    pub message: String,
}

impl StatusResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            status: "success",
            message: message.into(),
        }
    }
}

/// Where an uploaded file can be fetched from.
#[derive(Debug, Serialize)]
pub struct UploadedTrack {
    pub name: String,
    pub url: String,
}

#[derive(Debug, Deserialize)]
pub struct DeleteMusicRequest {
    pub filename: String,
}
