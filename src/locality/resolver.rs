//! Locality resolver — pincode-scoped lookups over a cached snapshot.
//!
//! Lookup flow: validate pincode → cached snapshot (fetch on cold cache) →
//! linear scan of the pincode bucket. The dataset holds thousands of rows,
//! so no index beyond the per-pincode grouping is needed.

use super::cache::DatasetCache;
use super::dataset::Dataset;
use super::providers::{DatasetFetcher, FileFetcher, HttpFetcher};
use super::types::{is_valid_pincode, LocalityRecord, ResolverError};
use std::path::PathBuf;
use std::sync::Arc;

/// The locality resolver: owns the snapshot cache and the fetch seam.
pub struct LocalityResolver {
    cache: DatasetCache,
    fetcher: Box<dyn DatasetFetcher>,
}

impl LocalityResolver {
    pub fn new(fetcher: Box<dyn DatasetFetcher>) -> Self {
        Self {
            cache: DatasetCache::new(),
            fetcher,
        }
    }

    pub fn from_url(url: impl Into<String>) -> Self {
        Self::new(Box::new(HttpFetcher::new(url)))
    }

    pub fn from_file(path: impl Into<PathBuf>) -> Self {
        Self::new(Box::new(FileFetcher::new(path)))
    }

    /// Cached dataset snapshot, fetching on a cold cache or when forced.
    ///
    /// A failed fetch or parse leaves any previous good snapshot in place;
    /// if this was the first load the cache stays empty and the next call
    /// re-attempts the fetch.
    pub fn load_dataset(&self, force_reload: bool) -> Result<Arc<Dataset>, ResolverError> {
        if !force_reload {
            if let Some(snapshot) = self.cache.get() {
                return Ok(snapshot);
            }
        }

        // Fetch outside the lock. Concurrent cold callers may each fetch;
        // the artifact is immutable, so the race wastes work at worst.
        let body = self.fetcher.fetch()?;
        let dataset = Arc::new(Dataset::parse(&body)?);
        self.cache.store(Arc::clone(&dataset));
        Ok(dataset)
    }

    /// Clear the cached snapshot. The next load re-fetches. Never fails.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// Distinct locality names under a pincode, sorted ascending.
    /// An unknown pincode yields an empty list, not an error.
    pub fn list_localities(&self, pincode: &str) -> Result<Vec<String>, ResolverError> {
        let pincode = validated(pincode)?;
        let dataset = self.load_dataset(false)?;
        Ok(dataset.localities(pincode))
    }

    /// Full record for (pincode, locality). The name is matched
    /// case-insensitively and trimmed; first match in dataset order wins.
    pub fn get_locality_details(
        &self,
        pincode: &str,
        name: &str,
    ) -> Result<Option<LocalityRecord>, ResolverError> {
        let pincode = validated(pincode)?;
        let dataset = self.load_dataset(false)?;
        Ok(dataset.find(pincode, name).cloned())
    }
}

/// Fail fast on malformed pincodes, before any I/O is attempted.
fn validated(pincode: &str) -> Result<&str, ResolverError> {
    if is_valid_pincode(pincode) {
        Ok(pincode)
    } else {
        Err(ResolverError::InvalidPincode(pincode.to_string()))
    }
}
