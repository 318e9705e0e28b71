//! In-memory dataset cache: a mutex-guarded, atomically swapped snapshot.
//!
//! No TTL — the backing artifact is updated out-of-band, so staleness is
//! handled by explicit invalidation or forced reload, never by the clock.
//! Readers always see either no snapshot or a complete one.

use super::dataset::Dataset;
use std::sync::{Arc, Mutex};

#[derive(Default)]
pub struct DatasetCache {
    slot: Mutex<Option<Arc<Dataset>>>,
}

impl DatasetCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current snapshot, if one is resident.
    pub fn get(&self) -> Option<Arc<Dataset>> {
        self.slot.lock().unwrap().clone()
    }

    /// Swap in a new snapshot. Concurrent writers race benignly — last
    /// write wins and every reader sees some complete snapshot.
    pub fn store(&self, dataset: Arc<Dataset>) {
        *self.slot.lock().unwrap() = Some(dataset);
    }

    /// Drop the snapshot; the next load re-fetches.
    pub fn clear(&self) {
        *self.slot.lock().unwrap() = None;
    }

    pub fn is_empty(&self) -> bool {
        self.slot.lock().unwrap().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(body: &str) -> Arc<Dataset> {
        Arc::new(Dataset::parse(body).unwrap())
    }

    #[test]
    fn test_empty_until_stored() {
        let cache = DatasetCache::new();
        assert!(cache.is_empty());
        assert!(cache.get().is_none());

        cache.store(snapshot(r#"{"560001": [{"display_name": "Indiranagar"}]}"#));
        assert!(!cache.is_empty());
        assert_eq!(cache.get().unwrap().record_count, 1);
    }

    #[test]
    fn test_last_write_wins() {
        let cache = DatasetCache::new();
        cache.store(snapshot(r#"{"560001": [{"display_name": "Indiranagar"}]}"#));
        cache.store(snapshot(
            r#"{"560001": [{"display_name": "Indiranagar"}, {"display_name": "Ulsoor"}]}"#,
        ));
        assert_eq!(cache.get().unwrap().record_count, 2);
    }

    #[test]
    fn test_clear_empties_slot() {
        let cache = DatasetCache::new();
        cache.store(snapshot(r#"{"560001": [{"display_name": "Indiranagar"}]}"#));
        cache.clear();
        assert!(cache.get().is_none());
    }

    #[test]
    fn test_snapshot_outlives_clear() {
        // A reader holding an Arc keeps its snapshot after invalidation.
        let cache = DatasetCache::new();
        cache.store(snapshot(r#"{"560001": [{"display_name": "Indiranagar"}]}"#));
        let held = cache.get().unwrap();
        cache.clear();
        assert_eq!(held.record_count, 1);
    }
}
