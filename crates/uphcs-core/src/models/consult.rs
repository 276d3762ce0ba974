use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A psychiatric consultation recorded against a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PsychConsultation {
    pub id: i64,
    #[serde(with = "crate::dates::lenient")]
    pub consult_date: Date,
    #[serde(default)]
    pub assessment_type: Option<String>,
    #[serde(default)]
    pub summary: Option<String>,
    pub recommendations: String,
    pub minutes: u32,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub consultant_name: Option<String>,
    #[serde(default)]
    pub consultant_phone: Option<String>,
    #[serde(default)]
    pub treatment_plan: Option<String>,
    #[serde(default)]
    pub medications: Option<String>,
    #[serde(default)]
    pub follow_up_needed: bool,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub next_follow_up_date: Option<Date>,
}

/// Body of `POST /api/psych/consult`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPsychConsult {
    pub patient_id: i64,
    pub user_id: i64,
    #[serde(with = "crate::dates::lenient")]
    pub consult_date: Date,
    pub minutes: u32,
    pub recommendations: String,
    pub treatment_plan: Option<String>,
    pub medications: Option<String>,
    pub follow_up_needed: bool,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub next_follow_up_date: Option<Date>,
}

/// A care manager's note, shown to the consultant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareManagerNote {
    pub id: i64,
    #[serde(with = "crate::dates::lenient")]
    pub note_date: Date,
    pub content: String,
    #[serde(default)]
    pub referral_needed: bool,
    #[serde(default)]
    pub psych_referral_note: Option<String>,
    pub created_by: String,
    #[serde(default)]
    pub user_role: Option<String>,
}
