//! Collaborator contracts: item pool, memory-state persistence, recent
//! accuracy. The engine only ever sees immutable snapshots; everything
//! fallible lives behind these traits.

use thiserror::Error;

use crate::config::SrsConfig;
use crate::srs;
use crate::types::{AttemptOutcome, Item, MemoryState};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("version conflict for {learner_id}/{item_id}: expected {expected}, found {found}")]
    VersionConflict {
        learner_id: String,
        item_id: String,
        expected: i64,
        found: i64,
    },
    #[error("backend error: {0}")]
    Backend(String),
}

/// Pool filter applied by the caller before the engine runs, e.g. one cluster
/// for `cluster` mode or audio-only for `listen_identify`.
#[derive(Debug, Clone, Default)]
pub struct ItemFilter {
    pub cluster: Option<String>,
    pub with_audio: bool,
}

pub trait ItemSource {
    fn list_items(&self, filter: Option<&ItemFilter>) -> Result<Vec<Item>, StoreError>;
}

pub trait MemoryStateStore {
    fn get_memory_state(
        &self,
        learner_id: &str,
        item_id: &str,
    ) -> Result<Option<MemoryState>, StoreError>;

    /// Persist a state produced by the updater. Implementations must compare
    /// `state.version` against the stored row and fail with
    /// [`StoreError::VersionConflict`] on mismatch; the returned state carries
    /// the bumped version.
    fn persist_memory_state(&mut self, state: &MemoryState) -> Result<MemoryState, StoreError>;
}

pub trait AccuracyProvider {
    /// Rolling accuracy over the learner's last `window` attempts, in [0, 1].
    /// `Ok(None)` when there is no attempt history yet.
    fn recent_accuracy(&self, learner_id: &str, window: usize)
        -> Result<Option<f64>, StoreError>;
}

/// Read-modify-write of one memory state for one graded attempt.
///
/// Two concurrent submissions for the same (learner, item) pair can both read
/// the old state here and race on the write, silently dropping one attempt.
/// The engine cannot prevent that; callers must serialize writes per key,
/// e.g. with a per-key lock or by retrying on `VersionConflict` from a store
/// that compares versions.
pub fn record_attempt<S: MemoryStateStore>(
    store: &mut S,
    learner_id: &str,
    item_id: &str,
    outcome: &AttemptOutcome,
    config: &SrsConfig,
) -> Result<MemoryState, StoreError> {
    let current = store
        .get_memory_state(learner_id, item_id)?
        .unwrap_or_else(|| MemoryState::new(learner_id, item_id));
    let updated = srs::update_memory_state(&current, outcome, config);
    store.persist_memory_state(&updated)
}
