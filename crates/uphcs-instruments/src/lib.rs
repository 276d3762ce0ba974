//! uphcs-instruments
//!
//! Standardized screening instruments administered by care managers.
//! Pure data and arithmetic with no I/O. Defines the items, response
//! scale, and severity bands for each supported instrument.

pub mod error;
pub mod instruments;
pub mod scoring;

use error::InstrumentError;
use scoring::{Band, Item, ItemRange, Severity, ValidationError};
use uphcs_core::models::assessment::Measure;

/// Trait implemented by each screening instrument.
pub trait Instrument: Send + Sync {
    /// Unique identifier for this instrument (e.g., "phq9", "gad7").
    fn id(&self) -> &str;

    /// Human-readable name (e.g., "PHQ-9").
    fn name(&self) -> &str;

    fn measure(&self) -> Measure;

    /// The questions, in administration order.
    fn items(&self) -> &[Item];

    /// Severity bands covering `0..=max_score()` without gaps.
    fn bands(&self) -> &[Band];

    fn item_range(&self) -> ItemRange {
        ItemRange::FREQUENCY
    }

    fn max_score(&self) -> u8 {
        let per_item = usize::from(self.item_range().max);
        u8::try_from(self.items().len() * per_item).unwrap_or(u8::MAX)
    }

    /// Check answer count and per-item range. Empty means valid.
    fn validate_answers(&self, answers: &[u8]) -> Vec<ValidationError> {
        let mut errors = Vec::new();
        if answers.len() != self.items().len() {
            errors.push(ValidationError::WrongLength {
                instrument: self.name().to_string(),
                expected: self.items().len(),
                actual: answers.len(),
            });
        }

        let range = self.item_range();
        for (idx, &value) in answers.iter().enumerate() {
            if !range.contains(value) {
                errors.push(ValidationError::OutOfRange {
                    instrument: self.name().to_string(),
                    item: idx + 1,
                    value,
                    range,
                });
            }
        }
        errors
    }

    /// Total score: the sum of all answers, once they validate.
    fn score(&self, answers: &[u8]) -> Result<u8, InstrumentError> {
        if let Some(err) = self.validate_answers(answers).into_iter().next() {
            return Err(err.into());
        }
        Ok(answers.iter().sum())
    }

    fn severity(&self, score: u8) -> Result<Severity, InstrumentError> {
        self.bands()
            .iter()
            .find(|b| b.contains(score))
            .map(|b| b.severity)
            .ok_or_else(|| InstrumentError::ScoreOutOfRange {
                instrument: self.name().to_string(),
                score,
                max: self.max_score(),
            })
    }

    /// Dashboard text for a possibly missing score, e.g. `12/27, Moderate`.
    ///
    /// A score above the maximum is shown without a band.
    fn describe(&self, score: Option<u8>) -> String {
        let Some(score) = score else {
            return "N/A".to_string();
        };
        match self.severity(score) {
            Ok(severity) => format!("{score}/{}, {severity}", self.max_score()),
            Err(_) => format!("{score}/{}", self.max_score()),
        }
    }
}

/// Return all registered instruments.
pub fn all_instruments() -> Vec<Box<dyn Instrument>> {
    vec![
        Box::new(instruments::phq9::Phq9),
        Box::new(instruments::gad7::Gad7),
    ]
}

/// Look up an instrument by ID.
pub fn get_instrument(id: &str) -> Option<Box<dyn Instrument>> {
    all_instruments().into_iter().find(|i| i.id() == id)
}

/// The instrument that produces scores for `measure`.
pub fn for_measure(measure: Measure) -> &'static dyn Instrument {
    match measure {
        Measure::Phq9 => &instruments::phq9::Phq9,
        Measure::Gad7 => &instruments::gad7::Gad7,
    }
}

/// Shorthand for `for_measure(measure).describe(score)`.
pub fn describe(measure: Measure, score: Option<u8>) -> String {
    for_measure(measure).describe(score)
}
