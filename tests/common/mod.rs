use std::collections::HashMap;

use beici_engine::{
    AccuracyProvider, Item, ItemFilter, ItemSource, MemoryState, MemoryStateStore, StoreError,
};

/// Minimal in-process stand-in for the persistence collaborator. Implements
/// the optimistic version check the way the real store is required to.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    pub items: Vec<Item>,
    pub states: HashMap<(String, String), MemoryState>,
    pub attempts: HashMap<String, Vec<bool>>,
}

impl InMemoryStore {
    pub fn with_items(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn states_for(&self, learner_id: &str) -> HashMap<String, MemoryState> {
        self.states
            .iter()
            .filter(|((learner, _), _)| learner == learner_id)
            .map(|((_, item_id), state)| (item_id.clone(), state.clone()))
            .collect()
    }

    pub fn log_attempt(&mut self, learner_id: &str, is_correct: bool) {
        self.attempts
            .entry(learner_id.to_string())
            .or_default()
            .push(is_correct);
    }
}

impl ItemSource for InMemoryStore {
    fn list_items(&self, filter: Option<&ItemFilter>) -> Result<Vec<Item>, StoreError> {
        let mut out = self.items.clone();
        if let Some(filter) = filter {
            if let Some(cluster) = &filter.cluster {
                out.retain(|item| item.clusters.contains(cluster));
            }
            if filter.with_audio {
                out.retain(|item| item.has_audio());
            }
        }
        Ok(out)
    }
}

impl MemoryStateStore for InMemoryStore {
    fn get_memory_state(
        &self,
        learner_id: &str,
        item_id: &str,
    ) -> Result<Option<MemoryState>, StoreError> {
        Ok(self
            .states
            .get(&(learner_id.to_string(), item_id.to_string()))
            .cloned())
    }

    fn persist_memory_state(&mut self, state: &MemoryState) -> Result<MemoryState, StoreError> {
        let key = (state.learner_id.clone(), state.item_id.clone());
        let stored_version = self.states.get(&key).map(|s| s.version).unwrap_or(0);
        if state.version != stored_version {
            return Err(StoreError::VersionConflict {
                learner_id: state.learner_id.clone(),
                item_id: state.item_id.clone(),
                expected: stored_version,
                found: state.version,
            });
        }

        let mut stored = state.clone();
        stored.version += 1;
        self.states.insert(key, stored.clone());
        Ok(stored)
    }
}

impl AccuracyProvider for InMemoryStore {
    fn recent_accuracy(
        &self,
        learner_id: &str,
        window: usize,
    ) -> Result<Option<f64>, StoreError> {
        let Some(history) = self.attempts.get(learner_id) else {
            return Ok(None);
        };
        if history.is_empty() || window == 0 {
            return Ok(None);
        }
        let recent: Vec<bool> = history.iter().rev().take(window).copied().collect();
        let correct = recent.iter().filter(|c| **c).count();
        Ok(Some(correct as f64 / recent.len() as f64))
    }
}
