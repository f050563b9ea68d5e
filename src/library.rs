//! Uploaded music files.
//!
//! Files live flat inside one directory and are identified only by their
//! name. Both upload and delete go through [`MusicLibrary::resolve`], which
//! is the only place a client-supplied name is turned into a path.

use std::io;
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::models::UploadedTrack;

/// URL prefix under which the music folder is served.
pub const MUSIC_ROUTE: &str = "/music";

/// Validate and sanitize a filename to prevent path traversal attacks.
///
/// Returns an error if the filename contains path traversal sequences.
fn sanitize_filename(filename: &str) -> AppResult<&str> {
    // Reject empty filenames
    if filename.is_empty() {
        return Err(AppError::BadRequest("Filename cannot be empty".to_string()));
    }

    // Reject path traversal attempts and the directory itself
    if filename == "."
        || filename.contains("..")
        || filename.contains('/')
        || filename.contains('\\')
    {
        tracing::warn!(filename = %filename, "Path traversal attempt blocked");
        return Err(AppError::path_traversal());
    }

    // Reject drive-qualified names (Windows)
    if filename.chars().nth(1) == Some(':') {
        return Err(AppError::path_traversal());
    }

    Ok(filename)
}

/// Directory of uploaded audio files.
#[derive(Debug, Clone)]
pub struct MusicLibrary {
    root: PathBuf,
}

impl MusicLibrary {
    /// Create a library rooted at `root`. The directory must exist by the
    /// time any operation runs.
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// The directory files are stored in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Turn a client-supplied filename into a path inside the library.
    ///
    /// The name must be a single plain path component. If something already
    /// exists at that name it must still resolve inside the library once
    /// symlinks are followed. The returned path is the entry itself, not
    /// its symlink target.
    pub async fn resolve(&self, filename: &str) -> AppResult<PathBuf> {
        let filename = sanitize_filename(filename)?;

        let root = tokio::fs::canonicalize(&self.root)
            .await
            .map_err(|e| AppError::Internal(format!("Music folder error: {}", e)))?;
        let candidate = root.join(filename);

        if let Ok(resolved) = tokio::fs::canonicalize(&candidate).await {
            if !resolved.starts_with(&root) {
                tracing::warn!(
                    requested = %resolved.display(),
                    music_folder = %root.display(),
                    "Path escape attempt blocked"
                );
                return Err(AppError::path_traversal());
            }
        }

        Ok(candidate)
    }

    /// Store `bytes` as `filename`, replacing any file of the same name.
    pub async fn upload(&self, filename: &str, bytes: &[u8]) -> AppResult<UploadedTrack> {
        let path = self.resolve(filename).await?;

        tokio::fs::write(&path, bytes).await?;

        tracing::info!(filename = %filename, bytes = bytes.len(), "Stored music file");
        Ok(UploadedTrack {
            name: filename.to_string(),
            url: format!("{}/{}", MUSIC_ROUTE, filename),
        })
    }

    /// Remove `filename` from the library.
    ///
    /// # Errors
    /// `NotFound` if there is no such file, `Io` if removal fails.
    pub async fn delete(&self, filename: &str) -> AppResult<()> {
        let path = self.resolve(filename).await?;

        match tokio::fs::remove_file(&path).await {
            Ok(()) => {
                tracing::info!(filename = %filename, "Deleted music file");
                Ok(())
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(AppError::track_not_found(filename))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sanitize_filename_valid() {
        assert!(sanitize_filename("song.mp3").is_ok());
        assert!(sanitize_filename("My Song (2023).flac").is_ok());
    }

    #[test]
    fn test_sanitize_filename_path_traversal() {
        assert!(sanitize_filename("../etc/passwd").is_err());
        assert!(sanitize_filename("..\\windows\\system32").is_err());
        assert!(sanitize_filename("foo/../bar").is_err());
        assert!(sanitize_filename("/etc/passwd").is_err());
        assert!(sanitize_filename("C:evil.mp3").is_err());
        assert!(sanitize_filename("..").is_err());
        assert!(sanitize_filename(".").is_err());
    }

    #[test]
    fn test_sanitize_filename_empty() {
        assert!(sanitize_filename("").is_err());
    }

    #[actix_rt::test]
    async fn test_upload_writes_file_and_returns_url() {
        let dir = tempdir().unwrap();
        let library = MusicLibrary::new(dir.path());

        let track = library.upload("a.mp3", b"ID3 fake audio").await.unwrap();

        assert_eq!(track.name, "a.mp3");
        assert_eq!(track.url, "/music/a.mp3");
        assert_eq!(std::fs::read(dir.path().join("a.mp3")).unwrap(), b"ID3 fake audio");
    }

    #[actix_rt::test]
    async fn test_upload_same_name_overwrites() {
        let dir = tempdir().unwrap();
        let library = MusicLibrary::new(dir.path());

        library.upload("a.mp3", b"first").await.unwrap();
        library.upload("a.mp3", b"second").await.unwrap();

        assert_eq!(std::fs::read(dir.path().join("a.mp3")).unwrap(), b"second");
    }

    #[actix_rt::test]
    async fn test_delete_removes_file() {
        let dir = tempdir().unwrap();
        let library = MusicLibrary::new(dir.path());
        library.upload("a.mp3", b"bytes").await.unwrap();

        library.delete("a.mp3").await.unwrap();

        assert!(!dir.path().join("a.mp3").exists());
        assert!(matches!(
            library.delete("a.mp3").await,
            Err(AppError::NotFound(_))
        ));
    }

    #[actix_rt::test]
    async fn test_delete_rejects_traversal_even_if_target_exists() {
        let dir = tempdir().unwrap();
        let music = dir.path().join("music");
        std::fs::create_dir(&music).unwrap();
        std::fs::write(dir.path().join("secret.txt"), b"keep me").unwrap();
        let library = MusicLibrary::new(&music);

        let result = library.delete("../secret.txt").await;

        assert!(matches!(result, Err(AppError::BadRequest(_))));
        assert!(dir.path().join("secret.txt").exists());
    }

    #[cfg(unix)]
    #[actix_rt::test]
    async fn test_resolve_rejects_symlink_escaping_library() {
        let dir = tempdir().unwrap();
        let music = dir.path().join("music");
        std::fs::create_dir(&music).unwrap();
        std::fs::write(dir.path().join("outside.mp3"), b"outside").unwrap();
        std::os::unix::fs::symlink(dir.path().join("outside.mp3"), music.join("link.mp3")).unwrap();
        let library = MusicLibrary::new(&music);

        assert!(matches!(
            library.resolve("link.mp3").await,
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            library.upload("link.mp3", b"overwrite").await,
            Err(AppError::BadRequest(_))
        ));
        assert_eq!(std::fs::read(dir.path().join("outside.mp3")).unwrap(), b"outside");
    }
}
