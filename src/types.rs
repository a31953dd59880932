use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::DEFAULT_EASE_FACTOR;

/// A learnable vocabulary unit. Owned by the content subsystem and treated as
/// immutable during scheduling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Item {
    pub id: String,
    pub source_form: String,
    pub target_form: String,
    /// Romanized pronunciation, used for sound-alike distractor matching.
    pub transliteration: String,
    /// Content difficulty, >= 1.
    pub difficulty: i64,
    pub part_of_speech: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_url: Option<String>,
    /// Semantic grouping tags (many-to-many).
    #[serde(default)]
    pub clusters: Vec<String>,
}

impl Item {
    pub fn has_audio(&self) -> bool {
        self.audio_url.as_deref().is_some_and(|url| !url.is_empty())
    }

    pub fn shares_cluster(&self, other: &Item) -> bool {
        self.clusters.iter().any(|c| other.clusters.contains(c))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecallDirection {
    SourceToTarget,
    TargetToSource,
}

impl RecallDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SourceToTarget => "source_to_target",
            Self::TargetToSource => "target_to_source",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "source_to_target" => Some(Self::SourceToTarget),
            "target_to_source" => Some(Self::TargetToSource),
            _ => None,
        }
    }
}

/// Session composition policy. A closed enum so an unhandled mode is a compile
/// error rather than a silent fallthrough.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
#[derive(Default)]
pub enum QuizMode {
    #[default]
    DailyReview,
    NewWords,
    Cluster,
    WeakWords,
    ComplexWorkout,
    ListenIdentify,
}

impl QuizMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DailyReview => "daily_review",
            Self::NewWords => "new_words",
            Self::Cluster => "cluster",
            Self::WeakWords => "weak_words",
            Self::ComplexWorkout => "complex_workout",
            Self::ListenIdentify => "listen_identify",
        }
    }

    /// Strict parse for the request-validation layer. Unknown strings are the
    /// caller's error to reject; they never reach the engine.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim() {
            "daily_review" => Some(Self::DailyReview),
            "new_words" => Some(Self::NewWords),
            "cluster" => Some(Self::Cluster),
            "weak_words" => Some(Self::WeakWords),
            "complex_workout" => Some(Self::ComplexWorkout),
            "listen_identify" => Some(Self::ListenIdentify),
            _ => None,
        }
    }
}

/// One graded quiz attempt, as reported by the answer-submission endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttemptOutcome {
    pub is_correct: bool,
    /// Self-reported confidence, 1..=3. Out-of-range values are clamped.
    pub confidence_level: u8,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub response_time_ms: Option<i64>,
    /// Recall direction of the question. Absent for legacy clients that do not
    /// report it; both direction strengths are updated in that case.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<RecallDirection>,
    pub answered_at: DateTime<Utc>,
}

/// Coarse lifecycle bucket derived from a memory state. Never stored; the
/// stored source of truth is `correct_streak`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LearningPhase {
    New,
    Learning,
    Reviewing,
    Mastered,
}

impl LearningPhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Learning => "LEARNING",
            Self::Reviewing => "REVIEWING",
            Self::Mastered => "MASTERED",
        }
    }
}

/// Per-(learner, item) spaced-repetition state. Created lazily on the first
/// attempt; mutated only through `srs::update_memory_state`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryState {
    pub learner_id: String,
    pub item_id: String,
    pub correct_streak: i64,
    pub wrong_count: i64,
    pub ease_factor: f64,
    pub interval_days: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_seen: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next_review: Option<DateTime<Utc>>,
    /// 0..=4, always re-derived from `correct_streak`.
    pub mastery_level: u8,
    /// Recall strength per direction, in [0, 1]. `None` until the direction
    /// has been attempted at least once.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_to_target_strength: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_to_source_strength: Option<f64>,
    /// Version tag of the scoring-parameter set used for the last update.
    pub srs_config_version: String,
    /// Optimistic-concurrency counter, bumped by the store on every persist.
    pub version: i64,
}

impl MemoryState {
    pub fn new(learner_id: &str, item_id: &str) -> Self {
        Self {
            learner_id: learner_id.to_string(),
            item_id: item_id.to_string(),
            correct_streak: 0,
            wrong_count: 0,
            ease_factor: DEFAULT_EASE_FACTOR,
            interval_days: 1,
            last_seen: None,
            next_review: None,
            mastery_level: 0,
            source_to_target_strength: None,
            target_to_source_strength: None,
            srs_config_version: String::new(),
            version: 0,
        }
    }

    /// Due means the scheduled review date has passed. An absent
    /// `next_review` counts as not due.
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.next_review.is_some_and(|at| at <= now)
    }

    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.next_review.is_some_and(|at| at < now)
    }

    pub fn phase(&self) -> LearningPhase {
        if self.last_seen.is_none() {
            LearningPhase::New
        } else if self.mastery_level >= 4 {
            LearningPhase::Mastered
        } else if self.mastery_level >= 2 {
            LearningPhase::Reviewing
        } else {
            LearningPhase::Learning
        }
    }
}
