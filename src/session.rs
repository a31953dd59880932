//! Mode-driven session composition over the ranked candidate pool.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::debug;

use crate::config::ComposerConfig;
use crate::scoring::{self, RankedItem};
use crate::types::{Item, MemoryState, QuizMode};

/// Weak means the learner has stumbled repeatedly or let the review date slip.
const WEAK_WRONG_COUNT: i64 = 2;

#[derive(Debug, Clone)]
pub struct SessionRequest<'a> {
    pub mode: QuizMode,
    /// Requested session size; the result never exceeds it.
    pub count: usize,
    pub items: &'a [Item],
    pub states: &'a HashMap<String, MemoryState>,
    /// Rolling accuracy in [0, 1] from the statistics collaborator. Absent
    /// means no throttling.
    pub recent_accuracy: Option<f64>,
    pub now: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMeta {
    pub mode: QuizMode,
    pub requested: usize,
    pub pool_size: usize,
    pub due_count: usize,
    pub weak_count: usize,
    pub fresh_count: usize,
    /// Fresh-item target after the accuracy throttle, daily_review only.
    pub fresh_target: usize,
    pub throttled: bool,
}

#[derive(Debug, Clone)]
pub struct SessionPlan {
    pub items: Vec<Item>,
    pub meta: SessionMeta,
}

/// Select and order up to `count` items for a session.
pub fn compose(request: &SessionRequest<'_>, config: &ComposerConfig) -> Vec<Item> {
    compose_plan(request, config).items
}

/// Like [`compose`], but also reports how the mix was built.
pub fn compose_plan(request: &SessionRequest<'_>, config: &ComposerConfig) -> SessionPlan {
    // listen_identify is the only mode with a pre-ranking pool filter.
    let pool: Vec<Item> = match request.mode {
        QuizMode::ListenIdentify => request
            .items
            .iter()
            .filter(|item| item.has_audio())
            .cloned()
            .collect(),
        _ => request.items.to_vec(),
    };

    let ranked = scoring::rank(&pool, request.states, request.now);

    let due: Vec<&RankedItem> = ranked
        .iter()
        .filter(|r| {
            request
                .states
                .get(&r.item.id)
                .is_some_and(|s| s.is_due(request.now))
        })
        .collect();
    let weak: Vec<&RankedItem> = ranked
        .iter()
        .filter(|r| {
            request.states.get(&r.item.id).is_some_and(|s| {
                s.wrong_count >= WEAK_WRONG_COUNT || s.is_overdue(request.now)
            })
        })
        .collect();
    let fresh: Vec<&RankedItem> = ranked
        .iter()
        .filter(|r| !request.states.contains_key(&r.item.id))
        .collect();

    let mut picked: Vec<Item> = Vec::with_capacity(request.count);
    let mut seen: HashSet<String> = HashSet::with_capacity(request.count);
    let mut fresh_target = 0;
    let mut throttled = false;

    match request.mode {
        QuizMode::ListenIdentify | QuizMode::Cluster => {
            // cluster pools arrive pre-filtered upstream; both modes take the
            // ranking as-is.
            backfill(&mut picked, &mut seen, &ranked, request.count);
        }
        QuizMode::NewWords => {
            take_from(&mut picked, &mut seen, &fresh, request.count);
            backfill(&mut picked, &mut seen, &ranked, request.count);
        }
        QuizMode::WeakWords => {
            take_from(&mut picked, &mut seen, &weak, request.count);
            backfill(&mut picked, &mut seen, &ranked, request.count);
        }
        QuizMode::DailyReview => {
            let due_target = share_of(request.count, config.due_share);
            fresh_target = share_of(request.count, config.fresh_share);
            (fresh_target, throttled) =
                throttle_fresh_target(fresh_target, request.recent_accuracy, config);
            let weak_target = request
                .count
                .saturating_sub(due_target.saturating_add(fresh_target));

            take_from(&mut picked, &mut seen, &due, due_target);
            take_from(&mut picked, &mut seen, &fresh, fresh_target);
            take_from(&mut picked, &mut seen, &weak, weak_target);
            backfill(&mut picked, &mut seen, &ranked, request.count);
        }
        QuizMode::ComplexWorkout => {
            // Weak-and-hard first: weakness dominates, then difficulty, with
            // the priority rank as the stable tail.
            let weak_ids: HashSet<&str> = weak.iter().map(|r| r.item.id.as_str()).collect();
            let mut workout: Vec<(usize, &RankedItem)> = ranked.iter().enumerate().collect();
            workout.sort_by(|(a_pos, a), (b_pos, b)| {
                let a_weak = weak_ids.contains(a.item.id.as_str());
                let b_weak = weak_ids.contains(b.item.id.as_str());
                b_weak
                    .cmp(&a_weak)
                    .then_with(|| b.item.difficulty.cmp(&a.item.difficulty))
                    .then_with(|| a_pos.cmp(b_pos))
            });
            for (_, entry) in workout {
                if picked.len() >= request.count {
                    break;
                }
                if seen.insert(entry.item.id.clone()) {
                    picked.push(entry.item.clone());
                }
            }
        }
    }

    picked.truncate(request.count);

    let meta = SessionMeta {
        mode: request.mode,
        requested: request.count,
        pool_size: pool.len(),
        due_count: due.len(),
        weak_count: weak.len(),
        fresh_count: fresh.len(),
        fresh_target,
        throttled,
    };
    debug!(
        mode = request.mode.as_str(),
        requested = meta.requested,
        pool = meta.pool_size,
        due = meta.due_count,
        weak = meta.weak_count,
        fresh = meta.fresh_count,
        throttled = meta.throttled,
        selected = picked.len(),
        "session composed"
    );

    SessionPlan { items: picked, meta }
}

fn share_of(count: usize, share: f64) -> usize {
    (count as f64 * share).round() as usize
}

/// Scale the fresh-item target down when the learner is struggling. Linear in
/// accuracy below the floor, identity at or above it: lower accuracy never
/// raises the target.
fn throttle_fresh_target(
    target: usize,
    recent_accuracy: Option<f64>,
    config: &ComposerConfig,
) -> (usize, bool) {
    let accuracy = recent_accuracy.unwrap_or(1.0);
    if !accuracy.is_finite() || accuracy >= config.accuracy_floor {
        return (target, false);
    }
    let scale = (accuracy / config.accuracy_floor).clamp(0.0, 1.0);
    ((target as f64 * scale).floor() as usize, true)
}

fn take_from(
    picked: &mut Vec<Item>,
    seen: &mut HashSet<String>,
    bucket: &[&RankedItem],
    target: usize,
) {
    let mut taken = 0;
    for entry in bucket {
        if taken >= target {
            break;
        }
        if seen.insert(entry.item.id.clone()) {
            picked.push(entry.item.clone());
            taken += 1;
        }
    }
}

fn backfill(
    picked: &mut Vec<Item>,
    seen: &mut HashSet<String>,
    ranked: &[RankedItem],
    count: usize,
) {
    for entry in ranked {
        if picked.len() >= count {
            break;
        }
        if seen.insert(entry.item.id.clone()) {
            picked.push(entry.item.clone());
        }
    }
}
