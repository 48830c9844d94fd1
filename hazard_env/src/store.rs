//! Content store trait: where lecture documents come from.

use async_trait::async_trait;
use hazard_core::Lecture;

use crate::error::StoreError;

/// Read access to lecture documents.
///
/// The simulation engine never fetches anything itself; a store loads and
/// decodes a lecture, and the loader hands a vetted `Simulation` onward.
///
/// # Implementations
///
/// - **Filesystem**: `FsContentStore` - one `<id>.json` per lecture, read via `tokio::fs`
/// - **In-memory**: `MemoryContentStore` - for tests and demos
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Fetches a lecture by id.
    ///
    /// # Returns
    /// * `Ok(Some(lecture))` - The document exists and decoded
    /// * `Ok(None)` - No such document
    /// * `Err(StoreError)` - Backend failure or a corrupt document
    async fn fetch_lecture(&self, id: &str) -> Result<Option<Lecture>, StoreError>;

    /// Lists all lectures, newest first (by `createdAtMs`).
    async fn list_lectures(&self) -> Result<Vec<Lecture>, StoreError>;
}

/// Orders lectures newest first; ties fall back to id for stable output.
pub(crate) fn sort_newest_first(lectures: &mut [Lecture]) {
    lectures.sort_by(|a, b| {
        b.created_at_ms
            .cmp(&a.created_at_ms)
            .then_with(|| a.id.cmp(&b.id))
    });
}
