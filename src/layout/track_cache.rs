use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::StepId;

/// Memoized step → track mapping reused across layout passes.
///
/// Entries are trusted as-is by the assigner, so the cache must be cleared in
/// full whenever any step's time range changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrackCache {
    assignments: IndexMap<StepId, usize>,
    generation: u64,
}

impl TrackCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, id: &StepId) -> Option<usize> {
        self.assignments.get(id).copied()
    }

    pub fn insert(&mut self, id: StepId, track: usize) {
        self.assignments.insert(id, track);
    }

    /// Drops every assignment and bumps the generation.
    pub fn invalidate(&mut self) {
        debug!(
            cleared = self.assignments.len(),
            generation = self.generation + 1,
            "invalidate track cache"
        );
        self.assignments.clear();
        self.generation += 1;
    }

    /// Number of full invalidations so far.
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&StepId, usize)> {
        self.assignments.iter().map(|(id, track)| (id, *track))
    }
}
