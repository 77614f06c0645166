//! Background file loading.
//!
//! Reading a file is the only suspension point in the application. The
//! main loop records a pending load, hands it to [`TaskSpawner`], keeps
//! rendering, and picks the result up from the channel with `try_recv()`.
//! Ordering per load is strictly: file selected, read completes, parse,
//! render.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Errors that can occur while reading a selected file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The file does not exist.
    #[error("File not found: {}", .0.display())]
    NotFound(PathBuf),

    /// The file is not valid UTF-8 text.
    #[error("File is not valid UTF-8 text: {}", .0.display())]
    NotText(PathBuf),

    /// The file contains no data.
    #[error("File is empty: {}", .0.display())]
    Empty(PathBuf),

    /// Any other read failure.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// A file read to run in the background.
///
/// Each selection gets a fresh `generation`, so results of older reads of
/// the same path can be told apart and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    pub generation: u64,
    pub path: PathBuf,
}

/// Messages sent from background tasks to the main event loop.
#[derive(Debug)]
pub enum LoadMessage {
    /// A file read finished.
    FileLoaded {
        generation: u64,
        path: PathBuf,
        result: Result<String, LoadError>,
    },
}

/// Read a file as text.
pub async fn load_file(path: &Path) -> Result<String, LoadError> {
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|source| match source.kind() {
            std::io::ErrorKind::NotFound => LoadError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::InvalidData => LoadError::NotText(path.to_path_buf()),
            _ => LoadError::Read {
                path: path.to_path_buf(),
                source,
            },
        })?;

    if text.trim().is_empty() {
        return Err(LoadError::Empty(path.to_path_buf()));
    }

    debug!(path = %path.display(), bytes = text.len(), "File read");
    Ok(text)
}

/// Spawns background tasks for file reads.
#[derive(Clone)]
pub struct TaskSpawner {
    tx: mpsc::UnboundedSender<LoadMessage>,
}

impl TaskSpawner {
    /// Create a new TaskSpawner with the given channel sender.
    pub fn new(tx: mpsc::UnboundedSender<LoadMessage>) -> Self {
        Self { tx }
    }

    /// Spawn a task that reads the file and reports back.
    pub fn spawn_load_file(&self, request: LoadRequest) {
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let LoadRequest { generation, path } = request;
            let result = load_file(&path).await;
            if let Err(e) = &result {
                warn!(error = %e, generation, "File load failed");
            }
            let _ = tx.send(LoadMessage::FileLoaded {
                generation,
                path,
                result,
            });
        });
    }
}
