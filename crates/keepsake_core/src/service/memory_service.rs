//! Photo/video memories use-case service.
//!
//! # Responsibility
//! - Manage the blob-backed memory collection: first-run seeding,
//!   caption/date edits, deletion, and file uploads.
//!
//! # Invariants
//! - Each upload is converted on its own worker thread and written as
//!   an independent put; one failed file never affects the others.
//! - Uploads are not retried or cancellable; a slow one just finishes
//!   later from the caller's point of view.

use crate::clock::Clock;
use crate::model::memory::{Memory, MemoryKind};
use crate::model::new_record_id;
use crate::store::{MemoryStore, StoreError, StoreResult};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

const VIDEO_EXTENSIONS: &[&str] = &["mp4", "mov", "webm", "m4v", "avi"];
const DEFAULT_CAPTION: &str = "New Memory";

/// Per-file upload failure.
#[derive(Debug)]
pub enum UploadError {
    /// File could not be read into a storable payload.
    Read { path: PathBuf, source: std::io::Error },
    /// Conversion worker died before producing a result.
    WorkerFailed { path: PathBuf },
    /// Store rejected the converted payload (for example the size cap).
    Store { path: PathBuf, source: StoreError },
}

impl UploadError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } => path,
            Self::WorkerFailed { path } => path,
            Self::Store { path, .. } => path,
        }
    }
}

impl Display for UploadError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Read { path, source } => {
                write!(f, "could not read `{}`: {source}", path.display())
            }
            Self::WorkerFailed { path } => {
                write!(f, "upload worker failed for `{}`", path.display())
            }
            Self::Store { path, source } => {
                write!(f, "could not store `{}`: {source}", path.display())
            }
        }
    }
}

impl Error for UploadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Read { source, .. } => Some(source),
            Self::WorkerFailed { .. } => None,
            Self::Store { source, .. } => Some(source),
        }
    }
}

/// Outcome of a multi-file upload: what landed and what did not.
#[derive(Debug, Default)]
pub struct UploadReport {
    pub saved: Vec<Memory>,
    pub failed: Vec<UploadError>,
}

/// Memory collection management over any blob-capable store.
pub struct MemoryService<S: MemoryStore> {
    store: S,
}

impl<S: MemoryStore> MemoryService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Lists all memories, seeding the starter set on a first run.
    pub fn load_or_seed(&self) -> StoreResult<Vec<Memory>> {
        if self.store.seed_if_empty(&starter_memories())? {
            info!("event=memories_seeded module=memories status=ok");
        }
        self.store.list()
    }

    /// All memories in insertion order, without seeding.
    pub fn list(&self) -> StoreResult<Vec<Memory>> {
        self.store.list()
    }

    /// Inserts a memory or saves caption/date edits in place.
    pub fn save(&self, memory: &Memory) -> StoreResult<()> {
        self.store.put(memory, None)
    }

    /// Deletes a memory and its payload; no-op when absent.
    pub fn delete(&self, id: &str) -> StoreResult<()> {
        self.store.remove(id)
    }

    /// Stored payload bytes for a `blob:` memory, if any.
    pub fn payload(&self, id: &str) -> StoreResult<Option<Vec<u8>>> {
        self.store.payload(id)
    }

    /// Uploads a batch of files.
    ///
    /// Conversion (file read + kind detection) runs on one worker thread
    /// per file so a large video never blocks the caller between files;
    /// each converted memory is then written as its own put. Failures
    /// are collected per file.
    pub fn upload_files<C: Clock>(&self, clock: &C, paths: Vec<PathBuf>) -> UploadReport {
        let stamp = clock.today().format("%Y-%m-%d").to_string();
        let workers: Vec<_> = paths
            .into_iter()
            .map(|path| {
                let stamp = stamp.clone();
                let worker_path = path.clone();
                (
                    path,
                    std::thread::spawn(move || convert_upload(&worker_path, &stamp)),
                )
            })
            .collect();

        let mut report = UploadReport::default();
        for (path, worker) in workers {
            let converted = match worker.join() {
                Ok(result) => result,
                Err(_) => Err(UploadError::WorkerFailed { path: path.clone() }),
            };
            match converted {
                Ok((memory, payload)) => {
                    match self.store.put(&memory, Some(&payload)) {
                        Ok(()) => report.saved.push(memory),
                        Err(source) => {
                            warn!(
                                "event=upload_store_failed module=memories status=error path={} error={source}",
                                path.display()
                            );
                            report.failed.push(UploadError::Store { path, source });
                        }
                    }
                }
                Err(err) => {
                    warn!(
                        "event=upload_convert_failed module=memories status=error path={} error={err}",
                        path.display()
                    );
                    report.failed.push(err);
                }
            }
        }
        report
    }
}

fn convert_upload(path: &Path, date_stamp: &str) -> Result<(Memory, Vec<u8>), UploadError> {
    let payload = std::fs::read(path).map_err(|source| UploadError::Read {
        path: path.to_path_buf(),
        source,
    })?;

    let id = new_record_id();
    let memory = Memory {
        url: Memory::blob_url(&id),
        id,
        kind: detect_kind(path),
        caption: DEFAULT_CAPTION.to_string(),
        date: date_stamp.to_string(),
    };
    Ok((memory, payload))
}

fn detect_kind(path: &Path) -> MemoryKind {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase());
    match extension.as_deref() {
        Some(ext) if VIDEO_EXTENSIONS.contains(&ext) => MemoryKind::Video,
        _ => MemoryKind::Image,
    }
}

/// First-run sample content shown before any uploads exist.
pub fn starter_memories() -> Vec<Memory> {
    vec![
        Memory {
            id: "starter-call".to_string(),
            url: "https://images.unsplash.com/photo-1588196749597-9ff075ee6b5b?q=80&w=1200&auto=format"
                .to_string(),
            kind: MemoryKind::Image,
            caption: "Late night calls".to_string(),
            date: "2024-02-14".to_string(),
        },
        Memory {
            id: "starter-sunset".to_string(),
            url: "https://images.unsplash.com/photo-1516589174184-c6858b16ecb0?q=80&w=1200&auto=format"
                .to_string(),
            kind: MemoryKind::Image,
            caption: "Our first sunset together.".to_string(),
            date: "2023-03-12".to_string(),
        },
        Memory {
            id: "starter-smile".to_string(),
            url: "https://images.unsplash.com/photo-1518199266791-5375a83190b7?q=80&w=1200&auto=format"
                .to_string(),
            kind: MemoryKind::Image,
            caption: "The smile that changed my world.".to_string(),
            date: "2023-04-05".to_string(),
        },
    ]
}
