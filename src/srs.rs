//! SM-2 style memory-state update. Pure: `(state, outcome, config) -> state`,
//! never fails, inputs defensively defaulted.

use chrono::Duration;

use crate::config::SrsConfig;
use crate::types::{AttemptOutcome, MemoryState, RecallDirection};

const BASE_QUALITY: f64 = 3.0;
const FAST_RESPONSE_MS: i64 = 3_000;
const SLOW_RESPONSE_MS: i64 = 10_000;
const SECOND_STREAK_INTERVAL_DAYS: i64 = 6;

const STRENGTH_PRIOR: f64 = 0.5;
const STRENGTH_GAIN: f64 = 0.12;
const STRENGTH_LOSS: f64 = 0.18;
const STRENGTH_CONFIDENCE_STEP_CORRECT: f64 = 0.04;
const STRENGTH_CONFIDENCE_STEP_INCORRECT: f64 = 0.02;

/// Answer quality on the 0..=5 SM-2 scale. Incorrect answers are always
/// quality 1; correct answers start at 3 and move with confidence and speed.
pub fn quality_score(outcome: &AttemptOutcome) -> i64 {
    if !outcome.is_correct {
        return 1;
    }

    let confidence = i64::from(outcome.confidence_level).clamp(1, 3);
    let mut quality = BASE_QUALITY;
    if confidence >= 3 {
        quality += 1.0;
    }
    if confidence <= 1 {
        quality -= 0.5;
    }
    if let Some(rt) = outcome.response_time_ms {
        if rt <= FAST_RESPONSE_MS {
            quality += 0.5;
        } else if rt >= SLOW_RESPONSE_MS {
            quality -= 0.5;
        }
    }

    (quality.round() as i64).clamp(0, 5)
}

/// Mastery is a step function of the correct streak: 0,1,3,5,7 -> 0,1,2,3,4.
pub fn mastery_for_streak(streak: i64) -> u8 {
    match streak {
        s if s >= 7 => 4,
        s if s >= 5 => 3,
        s if s >= 3 => 2,
        s if s >= 1 => 1,
        _ => 0,
    }
}

/// Recompute the memory state for one graded attempt.
///
/// The failure branch (quality < 3) resets the streak and interval and takes
/// the configured penalty out of the ease factor. The success branch applies
/// the SM-2 ease adjustment `EF' = EF + (0.1 - (5-q)(0.08 + (5-q)*0.02))`
/// and grows the interval 1 -> 6 -> round(interval * EF').
pub fn update_memory_state(
    state: &MemoryState,
    outcome: &AttemptOutcome,
    config: &SrsConfig,
) -> MemoryState {
    let config = config.sanitized();
    let quality = quality_score(outcome);

    let mut next = state.clone();

    if quality < 3 {
        next.correct_streak = 0;
        next.wrong_count = state.wrong_count + 1;
        next.interval_days = 1;
        next.ease_factor = (state.ease_factor - config.incorrect_ease_penalty)
            .clamp(config.ease_min, config.ease_max);
    } else {
        next.correct_streak = state.correct_streak + 1;
        let gap = (5 - quality) as f64;
        next.ease_factor = (state.ease_factor + 0.1 - gap * (0.08 + gap * 0.02))
            .clamp(config.ease_min, config.ease_max);
        next.interval_days = match next.correct_streak {
            1 => 1,
            2 => SECOND_STREAK_INTERVAL_DAYS,
            _ => ((state.interval_days as f64 * next.ease_factor).round() as i64).max(1),
        };
    }

    next.mastery_level = mastery_for_streak(next.correct_streak);

    let confidence = i64::from(outcome.confidence_level).clamp(1, 3);
    match outcome.direction {
        Some(RecallDirection::SourceToTarget) => {
            next.source_to_target_strength = Some(updated_strength(
                state.source_to_target_strength,
                outcome.is_correct,
                confidence,
            ));
        }
        Some(RecallDirection::TargetToSource) => {
            next.target_to_source_strength = Some(updated_strength(
                state.target_to_source_strength,
                outcome.is_correct,
                confidence,
            ));
        }
        // Legacy submissions carry no direction; count the attempt for both.
        None => {
            next.source_to_target_strength = Some(updated_strength(
                state.source_to_target_strength,
                outcome.is_correct,
                confidence,
            ));
            next.target_to_source_strength = Some(updated_strength(
                state.target_to_source_strength,
                outcome.is_correct,
                confidence,
            ));
        }
    }

    next.last_seen = Some(outcome.answered_at);
    next.next_review = Some(outcome.answered_at + Duration::days(next.interval_days));
    next.srs_config_version = config.version;

    next
}

fn updated_strength(previous: Option<f64>, is_correct: bool, confidence: i64) -> f64 {
    let prior = previous.unwrap_or(STRENGTH_PRIOR);
    let (base, step) = if is_correct {
        (STRENGTH_GAIN, STRENGTH_CONFIDENCE_STEP_CORRECT)
    } else {
        (-STRENGTH_LOSS, STRENGTH_CONFIDENCE_STEP_INCORRECT)
    };
    (prior + base + (confidence - 2) as f64 * step).clamp(0.0, 1.0)
}
