//! REST path conventions.
//!
//! Pure string functions with no HTTP dependency. These define the canonical
//! layout of the case-management backend API, relative to its base URL.

use jiff::civil::Date;

use crate::models::assessment::Measure;
use crate::models::document::DocumentKind;
use crate::models::reminder::ReminderAction;

pub const LOGIN: &str = "/api/auth/login";

pub const USERS: &str = "/api/users";

pub const USER_ROLES: &str = "/api/users/roles";

pub const CLINICS: &str = "/api/clinics";

pub const PATIENTS: &str = "/api/patients";

pub const PATIENT_INTAKE: &str = "/api/patient-intake";

pub const INITIAL_ASSESSMENT: &str = "/api/initial-assessment";

pub const FOLLOWUP_ASSESSMENT: &str = "/api/followup-assessment";

pub const CONTACT_ATTEMPTS: &str = "/api/contact-attempts";

pub const PSYCH_CONSULT: &str = "/api/psych/consult";

pub fn user(id: i64) -> String {
    format!("/api/users/{id}")
}

pub fn clinic(id: i64) -> String {
    format!("/api/clinics/{id}")
}

pub fn clinic_data(id: i64) -> String {
    format!("/api/clinics/{id}/data")
}

pub fn active_patients(clinic_id: i64) -> String {
    format!("/api/patients/active?clinicId={clinic_id}")
}

pub fn inactive_patients(clinic_id: i64) -> String {
    format!("/api/patients/inactive?clinicId={clinic_id}")
}

pub fn enrolled_patients(clinic_id: i64) -> String {
    format!("/api/patients/enrolled?clinicId={clinic_id}")
}

pub fn care_managers(clinic_id: i64) -> String {
    format!("/api/patients/care-managers?clinicId={clinic_id}")
}

pub fn consultants(clinic_id: i64) -> String {
    format!("/api/patients/consultants?clinicId={clinic_id}")
}

pub fn primary_care_physicians(clinic_id: i64) -> String {
    format!("/api/patients/primary-care-physicians?clinicId={clinic_id}")
}

pub fn patient(id: i64) -> String {
    format!("/api/patients/{id}")
}

pub fn patient_flags(id: i64) -> String {
    format!("/api/patients/{id}/flags")
}

pub fn treatment_history(id: i64) -> String {
    format!("/api/patients/{id}/treatment-history")
}

pub fn last_contact(id: i64) -> String {
    format!("/api/patients/{id}/last-contact")
}

pub fn last_update(id: i64, measure: Measure) -> String {
    format!("/api/patients/{id}/last-update?type={}", measure.as_str())
}

pub fn assessment_history(id: i64, measure: Measure) -> String {
    format!("/api/patients/{id}/assessment-history?type={}", measure.as_str())
}

pub fn latest_intake(patient_id: i64) -> String {
    format!("/api/patient-intake/{patient_id}/latest")
}

pub fn contact_attempts(patient_id: i64) -> String {
    format!("/api/contact-attempts/{patient_id}")
}

pub fn patient_reminders(patient_id: i64) -> String {
    format!("/api/reminders/patient/{patient_id}")
}

pub fn care_manager_reminders(user_id: i64) -> String {
    format!("/api/reminders/care-manager/{user_id}")
}

pub fn reminder_action(reminder_id: i64, action: ReminderAction) -> String {
    format!("/api/reminders/{reminder_id}/{}", action.as_str())
}

pub fn documents(patient_id: i64) -> String {
    format!("/api/patients/{patient_id}/documents")
}

/// PDF export path for a document of `kind` generated on `date`.
pub fn document_export(patient_id: i64, date: Date, kind: DocumentKind) -> String {
    match kind {
        DocumentKind::ContactAttempt => {
            format!("/api/patients/{patient_id}/contact-attempts/{date}/export")
        }
        DocumentKind::SafetyPlan => {
            format!("/api/patients/{patient_id}/safety-plans/{date}/export")
        }
        DocumentKind::Phq9 | DocumentKind::Gad7 => {
            format!(
                "/api/patients/{patient_id}/assessments/{date}/{}/export",
                kind.as_str()
            )
        }
    }
}

pub fn psych_consultations(patient_id: i64) -> String {
    format!("/api/psych/consultations/{patient_id}")
}

pub fn care_manager_notes(patient_id: i64) -> String {
    format!("/api/psych/care-manager-notes/{patient_id}")
}

pub fn psych_dashboard(user_id: i64, clinic_id: i64) -> String {
    format!("/api/psych/dashboard/{user_id}?clinicId={clinic_id}")
}

pub fn psych_assigned_patients(user_id: i64, clinic_id: i64) -> String {
    format!("/api/psych/assigned-patients/{user_id}?clinicId={clinic_id}")
}
