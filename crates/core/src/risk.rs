//! Risk classification for website records.
//!
//! Maps a continuous risk score (expected range 0..=100) plus the
//! `is_official` flag onto a discrete [`RiskLevel`] and the derived
//! `is_not_trusted` flag. Evaluated once when a website is created; stored
//! values are never recomputed afterwards.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

pub const RISK_UNKNOWN: &str = "unknown";
pub const RISK_NONE: &str = "none";
pub const RISK_LOW: &str = "low";
pub const RISK_MEDIUM: &str = "medium";
pub const RISK_HIGH: &str = "high";
pub const RISK_CRITICAL: &str = "critical";

/// All valid risk level strings.
pub const VALID_RISK_LEVELS: &[&str] = &[
    RISK_UNKNOWN,
    RISK_NONE,
    RISK_LOW,
    RISK_MEDIUM,
    RISK_HIGH,
    RISK_CRITICAL,
];

/// Scores at or below this value clear the pessimistic `is_not_trusted` flag.
pub const TRUSTED_SCORE_CEILING: f64 = 20.0;

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// Discrete risk label stored in `websites.risk_level`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Unknown,
    None,
    Low,
    Medium,
    High,
    Critical,
}

impl RiskLevel {
    /// Convert from a database / wire string value.
    pub fn from_str_value(s: &str) -> Result<Self, String> {
        match s {
            RISK_UNKNOWN => Ok(Self::Unknown),
            RISK_NONE => Ok(Self::None),
            RISK_LOW => Ok(Self::Low),
            RISK_MEDIUM => Ok(Self::Medium),
            RISK_HIGH => Ok(Self::High),
            RISK_CRITICAL => Ok(Self::Critical),
            _ => Err(format!(
                "invalid risk_level '{s}'. Must be one of: {}",
                VALID_RISK_LEVELS.join(", ")
            )),
        }
    }

    /// Convert to the database string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => RISK_UNKNOWN,
            Self::None => RISK_NONE,
            Self::Low => RISK_LOW,
            Self::Medium => RISK_MEDIUM,
            Self::High => RISK_HIGH,
            Self::Critical => RISK_CRITICAL,
        }
    }
}

/// Output of [`classify`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Classification {
    pub risk_level: RiskLevel,
    pub is_not_trusted: bool,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a risk score.
///
/// Brackets are evaluated in order and do not overlap:
///
/// | Condition                     | Level      |
/// |-------------------------------|------------|
/// | `score == 0 && is_official`   | `none`     |
/// | `0 < score <= 10`             | `low`      |
/// | `10 < score <= 50`            | `medium`   |
/// | `50 < score < 90`             | `high`     |
/// | `90 <= score <= 100`          | `critical` |
/// | anything else                 | `unknown`  |
///
/// A zero score on a non-official site falls through every bracket and
/// yields `unknown`. NaN compares false everywhere and also yields `unknown`.
pub fn classify(score: f64, is_official: bool) -> Classification {
    let risk_level = if score == 0.0 && is_official {
        RiskLevel::None
    } else if score > 0.0 && score <= 10.0 {
        RiskLevel::Low
    } else if score > 10.0 && score <= 50.0 {
        RiskLevel::Medium
    } else if score > 50.0 && score < 90.0 {
        RiskLevel::High
    } else if (90.0..=100.0).contains(&score) {
        RiskLevel::Critical
    } else {
        RiskLevel::Unknown
    };

    Classification {
        risk_level,
        is_not_trusted: !is_trusted_score(score),
    }
}

/// Whether a score is low enough to clear the `is_not_trusted` flag.
pub fn is_trusted_score(score: f64) -> bool {
    score <= TRUSTED_SCORE_CEILING
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
