use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::user::Role;

/// Program status of a patient. Serialized as the backend's one-letter code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PatientStatus {
    #[serde(rename = "E")]
    Enrolled,
    #[serde(rename = "A")]
    Active,
    #[serde(rename = "R")]
    RelapsePlan,
    #[serde(rename = "T")]
    Transferred,
    #[serde(rename = "D")]
    Deactivated,
}

impl PatientStatus {
    pub const ALL: [PatientStatus; 5] = [
        PatientStatus::Enrolled,
        PatientStatus::Active,
        PatientStatus::RelapsePlan,
        PatientStatus::Transferred,
        PatientStatus::Deactivated,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            PatientStatus::Enrolled => "E",
            PatientStatus::Active => "A",
            PatientStatus::RelapsePlan => "R",
            PatientStatus::Transferred => "T",
            PatientStatus::Deactivated => "D",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PatientStatus::Enrolled => "Enrolled",
            PatientStatus::Active => "Active",
            PatientStatus::RelapsePlan => "Relapse Prevention Plan",
            PatientStatus::Transferred => "Transferred",
            PatientStatus::Deactivated => "Inactive",
        }
    }
}

impl fmt::Display for PatientStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for PatientStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|st| st.code().eq_ignore_ascii_case(s) || st.label().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownStatus(s.to_string()))
    }
}

/// A provider assignment on a patient (care manager, consultant, PCP).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Provider {
    #[serde(default)]
    pub id: Option<i64>,
    pub provider_type: String,
    pub name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub service_begin_date: Option<Date>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub service_end_date: Option<Date>,
}

impl Provider {
    /// Whether this assignment is `user_id` acting in `role`.
    pub fn is_assignment_of(&self, role: Role, user_id: i64) -> bool {
        role.provider_type() == Some(self.provider_type.as_str()) && self.id == Some(user_id)
    }
}

/// Full patient record from `GET /api/patients/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub patient_id: i64,
    pub clinic_id: i64,
    #[serde(default)]
    pub clinic_name: Option<String>,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "crate::dates::lenient")]
    pub dob: Date,
    #[serde(with = "crate::dates::lenient")]
    pub enrollment_date: Date,
    pub status: PatientStatus,
    #[serde(default)]
    pub phq9_first: Option<u8>,
    #[serde(default)]
    pub phq9_last: Option<u8>,
    #[serde(default)]
    pub gad7_first: Option<u8>,
    #[serde(default)]
    pub gad7_last: Option<u8>,
    #[serde(default)]
    pub providers: Vec<Provider>,
}

impl Patient {
    /// `Last, First`, as shown in dashboard headers.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.last_name, self.first_name)
    }

    /// Whether the record is attached to a named clinic.
    pub fn has_clinic(&self) -> bool {
        self.clinic_name.as_deref().is_some_and(|n| !n.trim().is_empty())
    }

    /// Age in calendar years relative to `today`, counted from the birth year.
    pub fn age_on(&self, today: Date) -> i16 {
        today.year() - self.dob.year()
    }

    /// The provider assignment for `user_id` in `role`, if any.
    pub fn assignment(&self, role: Role, user_id: i64) -> Option<&Provider> {
        self.providers
            .iter()
            .find(|p| p.is_assignment_of(role, user_id))
    }
}

/// Named markers the backend attaches to a patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatientFlag {
    PediatricPatient,
    PsychiatricConsult,
    SafetyPlan,
}

impl PatientFlag {
    pub const ALL: [PatientFlag; 3] = [
        PatientFlag::PediatricPatient,
        PatientFlag::PsychiatricConsult,
        PatientFlag::SafetyPlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PatientFlag::PediatricPatient => "Pediatric Patient",
            PatientFlag::PsychiatricConsult => "Psychiatric Consult",
            PatientFlag::SafetyPlan => "Safety Plan",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlagEntry {
    pub flag: String,
}

/// Response of `GET /api/patients/:id/flags`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PatientFlags {
    #[serde(default)]
    pub flags: Vec<FlagEntry>,
}

impl PatientFlags {
    pub fn has(&self, flag: PatientFlag) -> bool {
        self.flags.iter().any(|f| f.flag == flag.as_str())
    }

    pub fn names(&self) -> Vec<&str> {
        self.flags.iter().map(|f| f.flag.as_str()).collect()
    }
}

/// Row of the active patient list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivePatient {
    pub id: i64,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub status: PatientStatus,
    #[serde(default)]
    pub phq9_first: Option<u8>,
    #[serde(default)]
    pub phq9_last: Option<u8>,
    #[serde(default)]
    pub gad7_first: Option<u8>,
    #[serde(default)]
    pub gad7_last: Option<u8>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub initial_assessment_date: Option<Date>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub last_follow_up_date: Option<Date>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub last_psychiatric_consult_date: Option<Date>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub last_relapse_plan_date: Option<Date>,
    #[serde(default)]
    pub total_contacts: Option<u32>,
    #[serde(default)]
    pub weeks_since_initial_assessment: Option<u32>,
    #[serde(default)]
    pub minutes_this_month: Option<u32>,
}

/// Row of the inactive and enrolled patient lists.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientRow {
    pub id: i64,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub status: PatientStatus,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub dob: Option<Date>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub enrollment_date: Option<Date>,
    #[serde(default)]
    pub phq9_first: Option<u8>,
    #[serde(default)]
    pub phq9_last: Option<u8>,
    #[serde(default)]
    pub gad7_first: Option<u8>,
    #[serde(default)]
    pub gad7_last: Option<u8>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub deactivation_date: Option<Date>,
    #[serde(default)]
    pub deactivation_reason: Option<String>,
}

/// Row of a psychiatric consultant's assigned-patient list.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsultPatient {
    pub id: i64,
    pub mrn: String,
    pub first_name: String,
    pub last_name: String,
    pub status: PatientStatus,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub dob: Option<Date>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub referral_date: Option<Date>,
    #[serde(default)]
    pub phq9_score: Option<u8>,
    #[serde(default)]
    pub gad7_score: Option<u8>,
    #[serde(default)]
    pub referral_reason: Option<String>,
    #[serde(default)]
    pub care_manager_name: Option<String>,
}

/// Body of `POST /api/patients`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPatient {
    pub mrn: String,
    pub care_manager_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub psychiatric_consultant_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub primary_care_physician_id: Option<String>,
    pub first_name: String,
    pub last_name: String,
    #[serde(with = "crate::dates::us")]
    pub enrollment_date: Date,
    #[serde(with = "crate::dates::us")]
    pub dob: Date,
    pub clinic_id: i64,
}

/// A selectable staff member (care manager, consultant, PCP) for a clinic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffMember {
    pub id: i64,
    pub name: String,
}
