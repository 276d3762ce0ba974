use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// `assessment_type` value the backend records for a patient's first
/// PHQ-9/GAD-7 administration.
pub const INITIAL_ASSESSMENT: &str = "Initial Assessment";

/// The two standardized measures tracked per patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Measure {
    #[serde(rename = "PHQ-9")]
    Phq9,
    #[serde(rename = "GAD-7")]
    Gad7,
}

impl Measure {
    pub const ALL: [Measure; 2] = [Measure::Phq9, Measure::Gad7];

    pub fn as_str(&self) -> &'static str {
        match self {
            Measure::Phq9 => "PHQ-9",
            Measure::Gad7 => "GAD-7",
        }
    }
}

impl fmt::Display for Measure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Measure {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "").as_str() {
            "phq9" => Ok(Measure::Phq9),
            "gad7" => Ok(Measure::Gad7),
            _ => Err(CoreError::UnknownMeasure(s.to_string())),
        }
    }
}

/// Which assessment endpoint a submission goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssessmentStage {
    Initial,
    FollowUp,
}

/// One row of `GET /api/patients/:id/treatment-history`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreatmentHistoryEntry {
    #[serde(with = "crate::dates::lenient")]
    pub assessment_date: Date,
    pub assessment_by: String,
    #[serde(default)]
    pub user_role: Option<String>,
    pub assessment_type: String,
    #[serde(default)]
    pub phq9_score: Option<u8>,
    #[serde(default)]
    pub gad7_score: Option<u8>,
    #[serde(default)]
    pub psych_consultation_recommended: Option<String>,
    #[serde(default)]
    pub interaction_mode: Option<String>,
    #[serde(default)]
    pub duration_minutes: Option<u32>,
}

impl TreatmentHistoryEntry {
    pub fn is_initial_assessment(&self) -> bool {
        self.assessment_type == INITIAL_ASSESSMENT
    }
}

/// Body of `POST /api/initial-assessment` and `POST /api/followup-assessment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssessmentSubmission {
    pub patient_id: i64,
    pub clinic_id: i64,
    pub created_by: i64,
    #[serde(with = "crate::dates::lenient")]
    pub contact_date: Date,
    pub phq9_score: u8,
    pub gad7_score: u8,
    pub phq9_answers: Vec<u8>,
    pub gad7_answers: Vec<u8>,
    pub discuss_with_consultant: bool,
    pub psychiatric_consultant_id: Option<String>,
    pub consultant_notes: Option<String>,
    pub session_type: String,
    pub session_duration: u32,
}

/// A point on the score trend for one measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreHistoryPoint {
    #[serde(alias = "assessmentDate", with = "crate::dates::lenient")]
    pub date: Date,
    pub score: u8,
}

/// Who last recorded a score for a measure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastUpdate {
    pub updated_by: String,
    pub updated_date: String,
    #[serde(default)]
    pub score: Option<u8>,
}

impl LastUpdate {
    /// Display text for the "Last updated by" line.
    pub fn describe(update: Option<&LastUpdate>) -> String {
        match update {
            Some(u) if u.updated_by != "N/A" => format!("{}, {}", u.updated_by, u.updated_date),
            _ => "Not available".to_string(),
        }
    }
}
