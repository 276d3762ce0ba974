use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// Notes recorded when the clinician leaves the field blank.
pub const DEFAULT_NOTES: &str = "Contact attempt made";

/// How the care manager reached (or tried to reach) the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InteractionMode {
    ByPhone,
    ByVideo,
    InClinic,
}

impl InteractionMode {
    pub const ALL: [InteractionMode; 3] = [
        InteractionMode::ByPhone,
        InteractionMode::ByVideo,
        InteractionMode::InClinic,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InteractionMode::ByPhone => "by_phone",
            InteractionMode::ByVideo => "by_video",
            InteractionMode::InClinic => "in_clinic",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InteractionMode::ByPhone => "By Phone",
            InteractionMode::ByVideo => "By Video",
            InteractionMode::InClinic => "In Clinic",
        }
    }
}

impl fmt::Display for InteractionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InteractionMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|m| m.as_str() == s)
            .ok_or_else(|| format!("invalid interaction mode: {s}"))
    }
}

/// A recorded contact attempt, as listed on the patient dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactAttempt {
    pub id: i64,
    #[serde(with = "crate::dates::lenient")]
    pub attempt_date: Date,
    pub attempted_by: String,
    #[serde(default)]
    pub user_role: Option<String>,
    pub minutes: u32,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Sum of minutes across all attempts.
pub fn total_minutes(attempts: &[ContactAttempt]) -> u32 {
    attempts.iter().map(|a| a.minutes).sum()
}

/// Body of `POST /api/contact-attempts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContactAttempt {
    pub patient_id: i64,
    pub user_id: i64,
    #[serde(with = "crate::dates::lenient")]
    pub attempt_date: Date,
    pub minutes: u32,
    pub interaction_mode: InteractionMode,
    pub notes: String,
}

/// The most recent contact, shown in the dashboard sidebar.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LastContact {
    pub contact_date: String,
    pub contact_type: String,
    pub contact_person: String,
    pub clinic_name: String,
}
