//! Multiple-choice question assembly for a selected item.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use crate::distractor::{self, DEFAULT_DISTRACTOR_COUNT};
use crate::types::{Item, RecallDirection};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizOption {
    pub item_id: String,
    pub label: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    pub item_id: String,
    /// The form shown to the learner; the options carry the opposite form.
    pub prompt: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    pub direction: RecallDirection,
    pub options: Vec<QuizOption>,
    /// Position of the correct option after shuffling.
    pub answer_index: usize,
}

/// Assemble one question: pick distractors from the pool, add the correct
/// answer, shuffle the option order with the injected RNG.
pub fn build_question<R: Rng + ?Sized>(
    target: &Item,
    pool: &[Item],
    direction: RecallDirection,
    rng: &mut R,
) -> QuizQuestion {
    build_question_with_options(target, pool, direction, DEFAULT_DISTRACTOR_COUNT, rng)
}

pub fn build_question_with_options<R: Rng + ?Sized>(
    target: &Item,
    pool: &[Item],
    direction: RecallDirection,
    distractor_count: usize,
    rng: &mut R,
) -> QuizQuestion {
    let distractors = distractor::choose_distractors(target, pool, distractor_count, rng);

    let mut options: Vec<QuizOption> = Vec::with_capacity(distractors.len() + 1);
    options.push(option_for(target, direction));
    options.extend(distractors.iter().map(|item| option_for(item, direction)));
    options.shuffle(rng);

    let answer_index = options
        .iter()
        .position(|option| option.item_id == target.id)
        .unwrap_or(0);

    QuizQuestion {
        item_id: target.id.clone(),
        prompt: prompt_for(target, direction),
        audio_url: target.audio_url.clone(),
        direction,
        options,
        answer_index,
    }
}

fn prompt_for(item: &Item, direction: RecallDirection) -> String {
    match direction {
        RecallDirection::SourceToTarget => item.source_form.clone(),
        RecallDirection::TargetToSource => item.target_form.clone(),
    }
}

fn option_for(item: &Item, direction: RecallDirection) -> QuizOption {
    let label = match direction {
        RecallDirection::SourceToTarget => item.target_form.clone(),
        RecallDirection::TargetToSource => item.source_form.clone(),
    };
    QuizOption {
        item_id: item.id.clone(),
        label,
    }
}
