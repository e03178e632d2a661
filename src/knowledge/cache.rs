//! Build-once knowledge base cache.
//!
//! The cache loads its CSV source on first use and then hands out the same
//! `Arc<KnowledgeBase>` until [`KnowledgeBaseCache::invalidate`] is called.

use std::path::{Path, PathBuf};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::error::DataSourceError;
use crate::knowledge::KnowledgeBase;

/// Lazily loaded, shareable knowledge base.
#[derive(Debug)]
pub struct KnowledgeBaseCache {
    path: PathBuf,
    slot: RwLock<Option<Arc<KnowledgeBase>>>,
}

impl KnowledgeBaseCache {
    /// Creates an empty cache for the given CSV path. Nothing is read yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            slot: RwLock::new(None),
        }
    }

    /// Source path of the cached knowledge base.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the cached knowledge base, loading it on first use.
    ///
    /// # Errors
    /// Propagates the loader's [`DataSourceError`]; a failed load leaves the
    /// cache empty so the next call retries.
    pub fn get(&self) -> Result<Arc<KnowledgeBase>, DataSourceError> {
        // The slot only ever holds an immutable Arc, so a poisoned lock is
        // still consistent.
        if let Some(kb) = self.slot.read().unwrap_or_else(PoisonError::into_inner).as_ref() {
            return Ok(Arc::clone(kb));
        }

        let mut slot = self.slot.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(kb) = slot.as_ref() {
            return Ok(Arc::clone(kb));
        }
        debug!(path = %self.path.display(), "loading knowledge base");
        let kb = Arc::new(KnowledgeBase::from_csv_path(&self.path)?);
        *slot = Some(Arc::clone(&kb));
        Ok(kb)
    }

    /// Drops the cached knowledge base; the next [`get`](Self::get) reloads.
    ///
    /// Callers still holding an `Arc` keep their (now stale) copy.
    pub fn invalidate(&self) {
        self.slot.write().unwrap_or_else(PoisonError::into_inner).take();
        debug!(path = %self.path.display(), "knowledge base cache invalidated");
    }

    /// Returns true if a knowledge base is currently cached.
    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.slot.read().unwrap_or_else(PoisonError::into_inner).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(dir: &Path, body: &str) -> PathBuf {
        let path = dir.join("ingredients.csv");
        let mut file = std::fs::File::create(&path).unwrap();
        file.write_all(body.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_loads_once_and_shares() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "ingredient,beneficial,description,alternatives\nWater,true,Solvent.,\n",
        );
        let cache = KnowledgeBaseCache::new(&path);
        assert!(!cache.is_loaded());

        let first = cache.get().unwrap();
        let second = cache.get().unwrap();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(cache.is_loaded());
    }

    #[test]
    fn test_invalidate_reloads_from_source() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_csv(
            dir.path(),
            "ingredient,beneficial,description,alternatives\nWater,true,Solvent.,\n",
        );
        let cache = KnowledgeBaseCache::new(&path);
        let before = cache.get().unwrap();
        assert_eq!(before.len(), 1);

        write_csv(
            dir.path(),
            "ingredient,beneficial,description,alternatives\nWater,true,Solvent.,\nGlycerin,true,Humectant.,\n",
        );
        // Still cached until invalidated.
        assert_eq!(cache.get().unwrap().len(), 1);

        cache.invalidate();
        assert!(!cache.is_loaded());
        let after = cache.get().unwrap();
        assert_eq!(after.len(), 2);
        assert_eq!(before.len(), 1);
    }

    #[test]
    fn test_failed_load_is_not_cached() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("late.csv");
        let cache = KnowledgeBaseCache::new(&path);
        assert!(matches!(cache.get(), Err(DataSourceError::NotFound { .. })));
        assert!(!cache.is_loaded());

        write_csv(dir.path(), "ingredient,beneficial,description,alternatives\n");
        std::fs::rename(dir.path().join("ingredients.csv"), &path).unwrap();
        assert!(cache.get().unwrap().is_empty());
    }
}
