//! Plausible wrong-answer selection for multiple-choice questions.
//!
//! Distractors should look like the answer (same topic, same grammar
//! category, similar sound) so the quiz tests recall rather than elimination.
//! The caller injects the random source; a seeded RNG makes the whole
//! selection replayable.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::Item;

pub const DEFAULT_DISTRACTOR_COUNT: usize = 3;

/// Seeded RNG for deterministic replay of distractor choice and option
/// shuffling. Production callers pass `rand::thread_rng()` instead.
pub fn seeded_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Pick up to `count` distractors for `target` from `pool`. The target itself
/// is never returned and the result carries no duplicate ids.
pub fn choose_distractors<R: Rng + ?Sized>(
    target: &Item,
    pool: &[Item],
    count: usize,
    rng: &mut R,
) -> Vec<Item> {
    struct Candidate<'a> {
        same_cluster: u8,
        same_pos: u8,
        prefix_len: usize,
        draw: f64,
        item: &'a Item,
    }

    let mut candidates: Vec<Candidate<'_>> = pool
        .iter()
        .filter(|candidate| candidate.id != target.id)
        .map(|candidate| Candidate {
            same_cluster: u8::from(candidate.shares_cluster(target)),
            same_pos: u8::from(candidate.part_of_speech == target.part_of_speech),
            prefix_len: common_prefix_len(&candidate.transliteration, &target.transliteration),
            draw: rng.gen::<f64>(),
            item: candidate,
        })
        .collect();

    candidates.sort_by(|a, b| {
        b.same_cluster
            .cmp(&a.same_cluster)
            .then_with(|| b.same_pos.cmp(&a.same_pos))
            .then_with(|| b.prefix_len.cmp(&a.prefix_len))
            .then_with(|| {
                a.draw
                    .partial_cmp(&b.draw)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .then_with(|| a.item.id.cmp(&b.item.id))
    });

    let mut picked: Vec<Item> = Vec::with_capacity(count.min(candidates.len()));
    for candidate in candidates {
        if picked.len() >= count {
            break;
        }
        if picked.iter().all(|existing| existing.id != candidate.item.id) {
            picked.push(candidate.item.clone());
        }
    }
    picked
}

/// Length of the shared case-insensitive prefix of two pronunciation strings.
pub fn common_prefix_len(a: &str, b: &str) -> usize {
    a.chars()
        .flat_map(char::to_lowercase)
        .zip(b.chars().flat_map(char::to_lowercase))
        .take_while(|(x, y)| x == y)
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, pos: &str, translit: &str, clusters: &[&str]) -> Item {
        Item {
            id: id.to_string(),
            source_form: format!("source-{id}"),
            target_form: format!("target-{id}"),
            transliteration: translit.to_string(),
            difficulty: 2,
            part_of_speech: pos.to_string(),
            audio_url: None,
            clusters: clusters.iter().map(|c| c.to_string()).collect(),
        }
    }

    #[test]
    fn prefix_length_is_case_insensitive() {
        assert_eq!(common_prefix_len("Kara", "kartoffel"), 3);
        assert_eq!(common_prefix_len("abc", "xyz"), 0);
        assert_eq!(common_prefix_len("", "anything"), 0);
    }

    #[test]
    fn target_is_never_a_distractor() {
        let target = item("t", "noun", "tabemono", &["food"]);
        let pool = vec![target.clone(), item("a", "noun", "tabako", &["food"])];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let picked = choose_distractors(&target, &pool, 3, &mut rng);
        assert!(picked.iter().all(|i| i.id != "t"));
        assert_eq!(picked.len(), 1);
    }

    #[test]
    fn plausibility_keys_dominate_random_draw() {
        let target = item("t", "noun", "kawa", &["nature"]);
        let pool = vec![
            item("far", "verb", "zzz", &["office"]),
            item("sound", "verb", "kawaii", &["office"]),
            item("pos", "noun", "zzz", &["office"]),
            item("cluster", "verb", "zzz", &["nature"]),
        ];

        for seed in 0..10 {
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let picked = choose_distractors(&target, &pool, 4, &mut rng);
            let ids: Vec<&str> = picked.iter().map(|i| i.id.as_str()).collect();
            // cluster > part of speech > shared prefix > nothing, whatever the seed.
            assert_eq!(ids, ["cluster", "pos", "sound", "far"]);
        }
    }

    #[test]
    fn tied_candidates_are_ordered_by_seeded_draw() {
        let target = item("t", "noun", "kawa", &["nature"]);
        let pool: Vec<Item> = (0..8)
            .map(|i| item(&format!("same-{i}"), "noun", "kawa", &["nature"]))
            .collect();

        let mut first_rng = seeded_rng(42);
        let first = choose_distractors(&target, &pool, 3, &mut first_rng);
        let mut second_rng = seeded_rng(42);
        let second = choose_distractors(&target, &pool, 3, &mut second_rng);

        let first_ids: Vec<&str> = first.iter().map(|i| i.id.as_str()).collect();
        let second_ids: Vec<&str> = second.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(first_ids, second_ids);
    }

    #[test]
    fn no_duplicates_and_count_is_respected() {
        let target = item("t", "noun", "kawa", &[]);
        let pool: Vec<Item> = (0..10)
            .map(|i| item(&format!("c{i}"), "noun", "kawa", &[]))
            .collect();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let picked = choose_distractors(&target, &pool, 3, &mut rng);
        assert_eq!(picked.len(), 3);
        let mut ids: Vec<&str> = picked.iter().map(|i| i.id.as_str()).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 3);
    }

    #[test]
    fn small_pool_yields_fewer_distractors() {
        let target = item("t", "noun", "kawa", &[]);
        let pool = vec![target.clone()];
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        assert!(choose_distractors(&target, &pool, 3, &mut rng).is_empty());
    }
}
