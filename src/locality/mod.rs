//! Locality lookup subsystem for Ward Atlas.
//!
//! Provides pincode → locality enumeration, (pincode, locality) →
//! representative lookup, an in-memory snapshot cache with explicit
//! invalidation, and adapters for both shapes of the dataset artifact.

pub mod cache;
pub mod dataset;
pub mod providers;
pub mod resolver;
pub mod types;

pub use dataset::Dataset;
pub use providers::{DatasetFetcher, FileFetcher, HttpFetcher, DEFAULT_DATASET_URL};
pub use resolver::LocalityResolver;
pub use types::{
    is_valid_pincode, LocalityRecord, MatchMethod, MlaInfo, MpInfo, ResolverError, Role, WardInfo,
};
