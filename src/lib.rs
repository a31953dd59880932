//! # beici-engine - spaced-repetition scheduling for vocabulary quizzes
//!
//! Pure scheduling core of the vocabulary learning platform. Everything here
//! is a synchronous function over in-memory snapshots: no I/O, no clocks, no
//! ambient randomness. The HTTP and persistence layers wrap this crate and
//! own everything fallible.
//!
//! Modules:
//!
//! - [`srs`] - per-(learner, item) memory-state update (SM-2 style)
//! - [`scoring`] - review-priority scoring and deterministic ranking
//! - [`session`] - mode-driven session composition with new-intake throttling
//! - [`distractor`] - plausible wrong-answer selection
//! - [`question`] - multiple-choice question assembly
//! - [`config`] - versioned scoring parameters and composer tuning
//! - [`store`] - collaborator contracts (item pool, persistence, accuracy)
//! - [`types`] - items, memory states, quiz modes
//!
//! ```rust
//! use std::collections::HashMap;
//!
//! use beici_engine::{compose, ComposerConfig, QuizMode, SessionRequest};
//!
//! let request = SessionRequest {
//!     mode: QuizMode::DailyReview,
//!     count: 10,
//!     items: &[],
//!     states: &HashMap::new(),
//!     recent_accuracy: None,
//!     now: chrono::Utc::now(),
//! };
//! assert!(compose(&request, &ComposerConfig::default()).is_empty());
//! ```

pub mod config;
pub mod distractor;
pub mod question;
pub mod scoring;
pub mod session;
pub mod srs;
pub mod store;
pub mod types;

pub use config::{ComposerConfig, SrsConfig};
pub use distractor::{choose_distractors, seeded_rng, DEFAULT_DISTRACTOR_COUNT};
pub use question::{build_question, build_question_with_options, QuizOption, QuizQuestion};
pub use scoring::{rank, score, PriorityScore, RankedItem};
pub use session::{compose, compose_plan, SessionMeta, SessionPlan, SessionRequest};
pub use srs::{mastery_for_streak, quality_score, update_memory_state};
pub use store::{
    record_attempt, AccuracyProvider, ItemFilter, ItemSource, MemoryStateStore, StoreError,
};
pub use types::{
    AttemptOutcome, Item, LearningPhase, MemoryState, QuizMode, RecallDirection,
};
