use serde::{Deserialize, Serialize};

pub const DEFAULT_EASE_FACTOR: f64 = 2.5;
pub const DEFAULT_EASE_MIN: f64 = 1.3;
pub const DEFAULT_EASE_MAX: f64 = 3.0;
pub const DEFAULT_INCORRECT_EASE_PENALTY: f64 = 0.2;
pub const DEFAULT_SRS_CONFIG_VERSION: &str = "srs-default-v1";

/// Versioned scoring-parameter bundle. The caller resolves which config is
/// active (e.g. from a versioned config store) and passes an immutable
/// snapshot per call; the engine keeps no global.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SrsConfig {
    pub version: String,
    pub ease_min: f64,
    pub ease_max: f64,
    pub incorrect_ease_penalty: f64,
}

impl Default for SrsConfig {
    fn default() -> Self {
        Self {
            version: DEFAULT_SRS_CONFIG_VERSION.to_string(),
            ease_min: DEFAULT_EASE_MIN,
            ease_max: DEFAULT_EASE_MAX,
            incorrect_ease_penalty: DEFAULT_INCORRECT_EASE_PENALTY,
        }
    }
}

impl SrsConfig {
    /// A config is usable only when its bounds are finite, ordered and the
    /// penalty is positive. Stored configs can drift (manual edits, partial
    /// migrations), so this is checked on every update.
    pub fn is_consistent(&self) -> bool {
        self.ease_min.is_finite()
            && self.ease_max.is_finite()
            && self.incorrect_ease_penalty.is_finite()
            && self.ease_min > 0.0
            && self.ease_max > self.ease_min
            && self.incorrect_ease_penalty > 0.0
    }

    /// Returns the config itself when consistent, otherwise the hard-coded
    /// default (version tag included, so the state records which parameter
    /// set actually produced it).
    pub fn sanitized(&self) -> SrsConfig {
        if self.is_consistent() {
            self.clone()
        } else {
            SrsConfig::default()
        }
    }
}

/// Tuning for session composition. Shares are fractions of the requested
/// session size; the throttle scales the fresh share down when recent
/// accuracy drops below `accuracy_floor` (monotonically in accuracy).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComposerConfig {
    pub due_share: f64,
    pub fresh_share: f64,
    pub accuracy_floor: f64,
    /// Attempts considered by the recent-accuracy collaborator.
    pub default_accuracy_window: usize,
}

impl Default for ComposerConfig {
    fn default() -> Self {
        Self {
            due_share: 0.3,
            fresh_share: 0.5,
            accuracy_floor: 0.6,
            default_accuracy_window: 20,
        }
    }
}
