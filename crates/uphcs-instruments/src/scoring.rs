use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Labels for the four ordinal responses every item accepts, indexed by value.
pub const RESPONSE_LABELS: [&str; 4] = [
    "Not at all",
    "Several days",
    "More than half the days",
    "Nearly every day",
];

/// Inclusive range of values a single item accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemRange {
    pub min: u8,
    pub max: u8,
}

impl ItemRange {
    /// The 0-3 frequency scale shared by PHQ-9 and GAD-7.
    pub const FREQUENCY: ItemRange = ItemRange { min: 0, max: 3 };

    pub fn contains(&self, value: u8) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// A single question on an instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: String,
    pub prompt: String,
}

/// Clinical severity of a total score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Minimal,
    Mild,
    Moderate,
    ModeratelySevere,
    Severe,
}

impl Severity {
    pub fn label(&self) -> &'static str {
        match self {
            Severity::Minimal => "Minimal",
            Severity::Mild => "Mild",
            Severity::Moderate => "Moderate",
            Severity::ModeratelySevere => "Moderately Severe",
            Severity::Severe => "Severe",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A contiguous band of total scores sharing one severity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub min: u8,
    pub max: u8,
    pub severity: Severity,
}

impl Band {
    pub const fn new(min: u8, max: u8, severity: Severity) -> Self {
        Band { min, max, severity }
    }

    pub fn contains(&self, score: u8) -> bool {
        (self.min..=self.max).contains(&score)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
pub enum ValidationError {
    #[error("{instrument}: expected {expected} answers, got {actual}")]
    WrongLength {
        instrument: String,
        expected: usize,
        actual: usize,
    },

    #[error("{instrument}: item {item} answer {value} is outside range [{}, {}]", .range.min, .range.max)]
    OutOfRange {
        instrument: String,
        /// 1-based question number.
        item: usize,
        value: u8,
        range: ItemRange,
    },
}
