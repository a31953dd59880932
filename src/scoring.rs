//! Review-priority scoring and deterministic ranking of the candidate pool.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::types::{Item, MemoryState};

/// Flat boost for never-attempted items; keeps unseen content ahead of
/// everything except a heavy review backlog.
pub const UNSEEN_BONUS: i64 = 50;
/// Applied to mastered items whose review date has not come up yet.
pub const MASTERED_PENALTY: i64 = -1000;
const WRONG_COUNT_WEIGHT: i64 = 2;
const DIRECTION_WEAKNESS_SCALE: f64 = 8.0;
const STRENGTH_PRIOR: f64 = 0.5;

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityScore {
    pub total: i64,
    pub recency_days: i64,
    pub direction_weakness: i64,
    pub mastered_suppressed: bool,
    pub unseen: bool,
}

#[derive(Debug, Clone)]
pub struct RankedItem {
    pub item: Item,
    pub score: PriorityScore,
}

/// Score one item against the learner's memory state.
pub fn score(item: &Item, state: Option<&MemoryState>, now: DateTime<Utc>) -> PriorityScore {
    let Some(state) = state else {
        return PriorityScore {
            total: item.difficulty * 2 + UNSEEN_BONUS,
            recency_days: 0,
            direction_weakness: 0,
            mastered_suppressed: false,
            unseen: true,
        };
    };

    let recency_days = days_since_last_seen(state, now);
    let direction_weakness = direction_weakness_bonus(state);
    let mastered_suppressed = state.mastery_level >= 4 && !state.is_due(now);

    let mut total = item.difficulty + recency_days + state.wrong_count * WRONG_COUNT_WEIGHT
        - state.correct_streak
        + direction_weakness;
    if mastered_suppressed {
        total += MASTERED_PENALTY;
    }

    PriorityScore {
        total,
        recency_days,
        direction_weakness,
        mastered_suppressed,
        unseen: false,
    }
}

/// Rank the pool by priority. The order is total (score desc, difficulty
/// desc, id asc), so identical input always yields identical output.
pub fn rank(
    items: &[Item],
    states: &HashMap<String, MemoryState>,
    now: DateTime<Utc>,
) -> Vec<RankedItem> {
    let mut ranked: Vec<RankedItem> = items
        .iter()
        .map(|item| RankedItem {
            score: score(item, states.get(&item.id), now),
            item: item.clone(),
        })
        .collect();

    ranked.sort_by(|a, b| {
        b.score
            .total
            .cmp(&a.score.total)
            .then_with(|| b.item.difficulty.cmp(&a.item.difficulty))
            .then_with(|| a.item.id.cmp(&b.item.id))
    });

    ranked
}

fn days_since_last_seen(state: &MemoryState, now: DateTime<Utc>) -> i64 {
    // An absent last_seen falls back to the epoch, which maximizes the score;
    // such states should not exist but must not break ranking if they do.
    let last_seen = state.last_seen.unwrap_or(DateTime::<Utc>::UNIX_EPOCH);
    (now - last_seen).num_days().max(0)
}

fn direction_weakness_bonus(state: &MemoryState) -> i64 {
    let s2t = state.source_to_target_strength.unwrap_or(STRENGTH_PRIOR);
    let t2s = state.target_to_source_strength.unwrap_or(STRENGTH_PRIOR);
    ((1.0 - s2t.min(t2s)) * DIRECTION_WEAKNESS_SCALE).round() as i64
}
