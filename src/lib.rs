//! Ward Atlas — pincode-to-representative lookup engine.
//!
//! The data core of a civic complaint reporting application: loads a
//! versioned locality dataset built by an offline pipeline, caches it as an
//! immutable in-memory snapshot, and answers "which localities are under
//! this pincode?" and "who represents this locality?" (ward councillor,
//! MLA, MP) for the complaint-filing and community-info screens.

pub mod locality;
pub mod server;
