//! Filesystem implementation of ContentStore using Tokio.

use crate::error::StoreError;
use crate::store::{sort_newest_first, ContentStore};
use async_trait::async_trait;
use hazard_core::Lecture;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, warn};

/// Content store backed by a directory of JSON lecture documents.
///
/// Each lecture lives in `<root>/<id>.json`. The file stem is the document
/// id; an `id` field inside the document is overwritten by it.
pub struct FsContentStore {
    root: PathBuf,
}

impl FsContentStore {
    /// Creates a store over the given directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Creates an Arc-wrapped store for sharing across tasks.
    pub fn shared(root: impl Into<PathBuf>) -> Arc<Self> {
        Arc::new(Self::new(root))
    }

    /// Returns the backing directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps an id to its document path.
    ///
    /// Ids that could escape the root directory have no path.
    fn path_for(&self, id: &str) -> Option<PathBuf> {
        let valid = !id.is_empty()
            && id != "."
            && id != ".."
            && !id.contains(['/', '\\']);
        valid.then(|| self.root.join(format!("{}.json", id)))
    }

    async fn read_document(path: &Path, id: &str) -> Result<Lecture, StoreError> {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| StoreError::io(path, e))?;

        let mut lecture =
            Lecture::from_json(&text).map_err(|e| StoreError::decode(path.display().to_string(), e))?;
        if !lecture.id.is_empty() && lecture.id != id {
            warn!(
                "Lecture {} names itself '{}'; using '{}'",
                path.display(),
                lecture.id,
                id
            );
        }
        lecture.id = id.to_string();
        Ok(lecture)
    }
}

#[async_trait]
impl ContentStore for FsContentStore {
    async fn fetch_lecture(&self, id: &str) -> Result<Option<Lecture>, StoreError> {
        let Some(path) = self.path_for(id) else {
            debug!("Rejected lecture id '{}'", id);
            return Ok(None);
        };

        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => {}
            Ok(_) => return Ok(None),
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::io(path, e)),
        }

        Self::read_document(&path, id).await.map(Some)
    }

    async fn list_lectures(&self) -> Result<Vec<Lecture>, StoreError> {
        let mut dir = tokio::fs::read_dir(&self.root)
            .await
            .map_err(|e| StoreError::io(&self.root, e))?;

        let mut lectures = Vec::new();
        while let Some(entry) = dir
            .next_entry()
            .await
            .map_err(|e| StoreError::io(&self.root, e))?
        {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(id) = path.file_stem().and_then(|s| s.to_str()).map(str::to_string) else {
                continue;
            };
            lectures.push(Self::read_document(&path, &id).await?);
        }

        debug!("Listed {} lectures under {}", lectures.len(), self.root.display());
        sort_newest_first(&mut lectures);
        Ok(lectures)
    }
}
