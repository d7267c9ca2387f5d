// Blob store adapters - Turn produced bytes into URLs

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;
use chrono::Local;
use tracing::info;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::ports::*;

/// File extension for a MIME type
fn extension_for(mime: &str) -> &str {
    match mime {
        "image/gif" => "gif",
        "image/webp" => "webp",
        "video/mp4" => "mp4",
        _ => "bin",
    }
}

/// Blob store writing into a directory and handing out `file://` URLs
pub struct FsBlobStore {
    output_dir: PathBuf,
    target: Option<PathBuf>,
}

impl FsBlobStore {
    /// Store blobs as `<stem>-<timestamp>.<ext>` inside `output_dir`
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            target: None,
        }
    }

    /// Store every blob at exactly `path`
    pub fn with_target(mut self, path: impl Into<PathBuf>) -> Self {
        self.target = Some(path.into());
        self
    }

    fn destination(&self, source: &MediaSource, mime: &str) -> PathBuf {
        if let Some(target) = &self.target {
            return target.clone();
        }
        let stamp = Local::now().format("%Y%m%d-%H%M%S");
        self.output_dir.join(format!(
            "{}-{}.{}",
            source.stem(),
            stamp,
            extension_for(mime)
        ))
    }
}

/// Local path behind a `file://` URL
pub fn path_from_url(url: &str) -> Option<PathBuf> {
    url.strip_prefix("file://").map(PathBuf::from)
}

#[async_trait]
impl BlobStorePort for FsBlobStore {
    async fn create_object_url(
        &self,
        source: &MediaSource,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<String, DomainError> {
        let path = self.destination(source, mime);
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(|e| {
                DomainError::FsFail(format!("Failed to create {}: {}", parent.display(), e))
            })?;
        }

        tokio::fs::write(&path, &bytes).await.map_err(|e| {
            DomainError::FsFail(format!("Failed to write {}: {}", path.display(), e))
        })?;

        let absolute = tokio::fs::canonicalize(&path).await.unwrap_or(path);
        info!(path = %absolute.display(), bytes = bytes.len(), mime, "Blob stored");
        Ok(format!("file://{}", absolute.display()))
    }
}

/// Stored blob
#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// In-memory blob store handing out `blob:` URLs
#[derive(Default)]
pub struct MemoryBlobStore {
    next_id: AtomicU64,
    blobs: Mutex<HashMap<String, Blob>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<String, Blob>> {
        self.blobs.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn get(&self, url: &str) -> Option<Blob> {
        self.lock().get(url).cloned()
    }

    /// Forget a blob; returns whether it existed
    pub fn revoke(&self, url: &str) -> bool {
        self.lock().remove(url).is_some()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl BlobStorePort for MemoryBlobStore {
    async fn create_object_url(
        &self,
        source: &MediaSource,
        bytes: Vec<u8>,
        mime: &str,
    ) -> Result<String, DomainError> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let url = format!("blob:gifcut/{}-{}", source.stem(), id);
        self.lock().insert(
            url.clone(),
            Blob {
                mime: mime.to_string(),
                bytes,
            },
        );
        Ok(url)
    }
}
