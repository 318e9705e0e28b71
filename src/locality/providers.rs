//! Dataset providers: HTTP artifact fetch and local-file fallback.
//!
//! The artifact is produced out-of-band by the data pipeline; providers only
//! fetch the raw body. No retries here — retry policy belongs to the caller.

use super::types::ResolverError;
use std::fs;
use std::path::PathBuf;

/// Where the pipeline publishes the latest locality artifact.
pub const DEFAULT_DATASET_URL: &str = "https://data.wardatlas.in/locality-db/latest.json";

const USER_AGENT: &str = "WardAtlas/0.3 (locality-lookup)";

/// The fetch seam: how the resolver obtains a raw dataset body.
pub trait DatasetFetcher: Send + Sync {
    fn fetch(&self) -> Result<String, ResolverError>;
}

/// Fetches the dataset artifact over HTTP(S).
pub struct HttpFetcher {
    url: String,
}

impl HttpFetcher {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }
}

impl DatasetFetcher for HttpFetcher {
    fn fetch(&self) -> Result<String, ResolverError> {
        // ureq reports non-2xx statuses as errors, so both transport
        // failures and bad statuses land in DatasetUnavailable.
        let response = ureq::get(&self.url)
            .set("User-Agent", USER_AGENT)
            .call()
            .map_err(|e| ResolverError::DatasetUnavailable(e.to_string()))?;

        response
            .into_string()
            .map_err(|e| ResolverError::DatasetUnavailable(e.to_string()))
    }
}

/// Reads the dataset from a local JSON file (offline mode).
pub struct FileFetcher {
    path: PathBuf,
}

impl FileFetcher {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Default offline location: ~/.ward-atlas/dataset.json.
    pub fn default_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".ward-atlas")
            .join("dataset.json")
    }
}

impl DatasetFetcher for FileFetcher {
    fn fetch(&self) -> Result<String, ResolverError> {
        fs::read_to_string(&self.path).map_err(|e| {
            ResolverError::DatasetUnavailable(format!("{}: {}", self.path.display(), e))
        })
    }
}
