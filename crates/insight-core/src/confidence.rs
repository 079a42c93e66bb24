//! Confidence classification for analysis narratives

use serde::{Deserialize, Serialize};
use std::fmt;

/// Coarse certainty classification attached to an analysis narrative
///
/// The backend emits the label as free text inside the narrative reply;
/// anything it produces maps onto one of these three values via
/// [`Confidence::from_label`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Confidence {
    Low,
    #[default]
    Medium,
    High,
}

impl Confidence {
    /// Parse a backend-provided confidence label
    ///
    /// Only `Low` and `High` (case-insensitive) are distinguished; an
    /// absent or unrecognized label collapses to `Medium`.
    pub fn from_label(label: Option<&str>) -> Self {
        match label.map(str::trim) {
            Some(l) if l.eq_ignore_ascii_case("low") => Self::Low,
            Some(l) if l.eq_ignore_ascii_case("high") => Self::High,
            _ => Self::Medium,
        }
    }

    /// Display category consumed by presentation layers
    ///
    /// Deterministic and total: every confidence value has exactly one tone.
    pub fn tone(self) -> ConfidenceTone {
        match self {
            Self::Low => ConfidenceTone::Caution,
            Self::Medium => ConfidenceTone::Neutral,
            Self::High => ConfidenceTone::Positive,
        }
    }

    /// Canonical label as the backend spells it
    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Presentation category derived from a confidence value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConfidenceTone {
    /// Low certainty, rendered as a warning accent
    Caution,
    /// Middling certainty, rendered without accent
    Neutral,
    /// High certainty, rendered as a positive accent
    Positive,
}
