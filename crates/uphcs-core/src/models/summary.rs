use serde::{Deserialize, Serialize};

/// Clinic metrics from `GET /api/clinics/:id/data`. Missing counters read as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ClinicData {
    pub total_patients: u32,
    pub active_patients: u32,
    pub total_minutes_tracked: u32,
    pub average_minutes_per_patient: f64,
    pub new_patients: u32,
}

/// Consultant metrics from `GET /api/psych/dashboard/:userId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PsychData {
    pub assigned_patients: u32,
    pub total_minutes_tracked: u32,
    pub average_minutes_per_patient: f64,
    pub upcoming_referrals: u32,
}
