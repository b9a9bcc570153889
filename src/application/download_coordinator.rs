use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tokio::io::AsyncWriteExt;

use crate::{
    api::{ApiClient, Payload},
    domain::{AppError, DownloadOutcome, SavedFile},
    utils::{candidate_names, resolve_filename, sanitize_filename},
};

/// Upper bound on ` (n)` suffixes tried before giving up on a free name.
const MAX_NAME_ATTEMPTS: usize = 1000;

/// Platform facilities for handing a URL off to something outside this window.
pub trait UrlLauncher: Send + Sync {
    /// Let the system URL handler deal with `url`.
    fn hand_off(&self, url: &str) -> io::Result<()>;

    /// Open `url` in a new browser window or tab.
    fn open_window(&self, url: &str) -> io::Result<()>;
}

pub struct SystemLauncher;

impl UrlLauncher for SystemLauncher {
    fn hand_off(&self, url: &str) -> io::Result<()> {
        open::that_detached(url)
    }

    fn open_window(&self, url: &str) -> io::Result<()> {
        webbrowser::open(url)
    }
}

#[derive(Clone)]
pub struct DownloadCoordinator {
    api_client: ApiClient,
    launcher: Arc<dyn UrlLauncher>,
}

impl DownloadCoordinator {
    pub fn new(api_client: ApiClient, launcher: Arc<dyn UrlLauncher>) -> Self {
        Self {
            api_client,
            launcher,
        }
    }

    /// Whatever the handler does with the URL is invisible to us, so this always
    /// reports the hand-off as triggered.
    pub fn trigger_native(&self, url: &str) -> DownloadOutcome {
        if let Err(e) = self.launcher.hand_off(url) {
            tracing::debug!(%url, "system handler refused the URL: {}", e);
        }
        DownloadOutcome::NativeNavigationTriggered
    }

    /// Only a refusal to open the window is observable, never the HTTP result.
    pub fn open_in_new_window(&self, url: &str) -> Result<DownloadOutcome, AppError> {
        self.launcher
            .open_window(url)
            .map(|()| DownloadOutcome::NewWindowOpened)
            .map_err(|e| AppError::WindowRefused(e.to_string()))
    }

    /// Request `url`, reject error statuses, then save the buffered body into `dir`.
    pub async fn fetch_and_save(&self, url: String, dir: PathBuf) -> Result<SavedFile, AppError> {
        let payload = self
            .api_client
            .fetch(&url)
            .await
            .map_err(|e| AppError::Fetch(e.to_string()))?;

        if payload.is_empty() {
            tracing::warn!(%url, "server returned an empty body");
        }

        let filename = resolve_filename(payload.content_disposition.as_deref(), &payload.url);
        tracing::debug!(
            %url,
            %filename,
            content_type = payload.content_type.as_deref().unwrap_or("unknown"),
            "resolved filename"
        );

        save_payload(payload, &dir, &filename).await
    }
}

/// Write the body to a fresh file in `dir`. The payload is consumed and its
/// buffer released once the file is written.
async fn save_payload(payload: Payload, dir: &Path, filename: &str) -> Result<SavedFile, AppError> {
    tokio::fs::create_dir_all(dir)
        .await
        .map_err(|e| AppError::Io(format!("Failed to create {}: {}", dir.display(), e)))?;

    let safe_name = sanitize_filename(filename);
    for candidate in candidate_names(&safe_name).take(MAX_NAME_ATTEMPTS) {
        let path = dir.join(&candidate);
        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(e) => {
                return Err(AppError::Io(format!(
                    "Failed to create file {}: {}",
                    path.display(),
                    e
                )))
            }
        };

        file.write_all(&payload.body)
            .await
            .map_err(|e| AppError::Io(format!("Write error: {}", e)))?;
        file.sync_all()
            .await
            .map_err(|e| AppError::Io(format!("Failed to sync file: {}", e)))?;

        return Ok(SavedFile {
            filename: candidate,
            path,
            size: payload.len(),
        });
    }

    Err(AppError::Io(format!(
        "No free file name for {} in {}",
        safe_name,
        dir.display()
    )))
}
