//! In-memory implementation of ContentStore.

use crate::error::StoreError;
use crate::store::{sort_newest_first, ContentStore};
use async_trait::async_trait;
use hazard_core::Lecture;
use std::collections::HashMap;
use std::sync::RwLock;

/// Content store holding lectures in a map. Used by tests and demos.
#[derive(Default)]
pub struct MemoryContentStore {
    lectures: RwLock<HashMap<String, Lecture>>,
}

impl MemoryContentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store from an iterator of lectures.
    pub fn with_lectures(lectures: impl IntoIterator<Item = Lecture>) -> Self {
        let map = lectures.into_iter().map(|l| (l.id.clone(), l)).collect();
        Self {
            lectures: RwLock::new(map),
        }
    }

    /// Inserts or replaces a lecture under its id.
    pub fn insert(&self, lecture: Lecture) -> Result<(), StoreError> {
        let mut map = self
            .lectures
            .write()
            .map_err(|_| StoreError::backend("lecture map lock poisoned"))?;
        map.insert(lecture.id.clone(), lecture);
        Ok(())
    }

    /// Removes a lecture, returning it if present.
    pub fn remove(&self, id: &str) -> Result<Option<Lecture>, StoreError> {
        let mut map = self
            .lectures
            .write()
            .map_err(|_| StoreError::backend("lecture map lock poisoned"))?;
        Ok(map.remove(id))
    }
}

#[async_trait]
impl ContentStore for MemoryContentStore {
    async fn fetch_lecture(&self, id: &str) -> Result<Option<Lecture>, StoreError> {
        let map = self
            .lectures
            .read()
            .map_err(|_| StoreError::backend("lecture map lock poisoned"))?;
        Ok(map.get(id).cloned())
    }

    async fn list_lectures(&self) -> Result<Vec<Lecture>, StoreError> {
        let mut lectures: Vec<Lecture> = {
            let map = self
                .lectures
                .read()
                .map_err(|_| StoreError::backend("lecture map lock poisoned"))?;
            map.values().cloned().collect()
        };
        sort_newest_first(&mut lectures);
        Ok(lectures)
    }
}
