use crate::locality::LocalityResolver;

/// Shared handler state. The resolver synchronizes its own snapshot cache,
/// so handlers call it directly through the Arc.
pub struct AppState {
    pub resolver: LocalityResolver,
}
