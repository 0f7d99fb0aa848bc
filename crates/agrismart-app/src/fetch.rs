//! ---
//! agri_section: "04-navigation-views"
//! agri_subsection: "module"
//! agri_type: "source"
//! agri_scope: "code"
//! agri_description: "Navigation guards and per-feature view models."
//! agri_version: "v0.1.0-alpha"
//! agri_owner: "tbd"
//! ---
use std::sync::atomic::{AtomicU64, Ordering};

/// Generation counter guarding against stale fetch completions.
///
/// Requests carry no cancellation; instead every load is tagged with a
/// generation and a completion whose generation has been superseded (by a
/// newer load or by navigation away) is discarded instead of applied.
#[derive(Debug, Default)]
pub struct FetchGate {
    generation: AtomicU64,
}

impl FetchGate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new load, invalidating all previously issued generations.
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Whether a completion tagged with `generation` may still be applied.
    pub fn is_current(&self, generation: u64) -> bool {
        self.generation.load(Ordering::SeqCst) == generation
    }

    /// Invalidate outstanding loads without starting a new one
    /// (navigation away).
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}
