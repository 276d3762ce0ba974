//! Validation for every form that submits to the backend.
//!
//! Each draft holds raw, possibly incomplete input. `validate` either
//! returns the exact request body or every field error at once.

use std::fmt;

use jiff::civil::Date;
use serde::Serialize;
use uphcs_core::models::assessment::{AssessmentSubmission, Measure};
use uphcs_core::models::consult::NewPsychConsult;
use uphcs_core::models::contact_attempt::{DEFAULT_NOTES, InteractionMode, NewContactAttempt};
use uphcs_core::models::intake::{IntakeForm, IntakeSubmission};
use uphcs_core::models::patient::NewPatient;
use uphcs_core::models::user::{NewUser, Role};
use uphcs_instruments::for_measure;

use crate::error::WorkflowError;

/// Special characters a password may satisfy the symbol rule with.
pub const PASSWORD_SPECIALS: &str = "!@#^&*";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Who is submitting, and for which patient and clinic.
#[derive(Debug, Clone, Copy)]
pub struct Submitter {
    pub user_id: i64,
    pub patient_id: i64,
    pub clinic_id: i64,
}

fn finish<T>(errors: Vec<FieldError>, body: impl FnOnce() -> T) -> Result<T, WorkflowError> {
    if errors.is_empty() {
        Ok(body())
    } else {
        Err(WorkflowError::InvalidForm(errors))
    }
}

fn require_text(errors: &mut Vec<FieldError>, field: &'static str, value: &Option<String>, message: &str) -> String {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => {
            errors.push(FieldError::new(field, message));
            String::new()
        }
    }
}

fn require_date(errors: &mut Vec<FieldError>, field: &'static str, value: Option<Date>, message: &str) -> Date {
    value.unwrap_or_else(|| {
        errors.push(FieldError::new(field, message));
        Date::MIN
    })
}

fn positive_minutes(errors: &mut Vec<FieldError>, field: &'static str, value: Option<i64>, label: &str) -> u32 {
    match value {
        None => {
            errors.push(FieldError::new(field, format!("{label} is required")));
            0
        }
        Some(v) => match u32::try_from(v) {
            Ok(m) if m > 0 => m,
            _ => {
                errors.push(FieldError::new(field, format!("{label} must be a positive integer")));
                0
            }
        },
    }
}

fn answer_errors(errors: &mut Vec<FieldError>, field: &'static str, measure: Measure, answers: &[u8]) -> u8 {
    let instrument = for_measure(measure);
    match instrument.score(answers) {
        Ok(score) => score,
        Err(_) => {
            for err in instrument.validate_answers(answers) {
                errors.push(FieldError::new(field, err.to_string()));
            }
            0
        }
    }
}

/// Initial and follow-up assessments share one form.
#[derive(Debug, Clone, Default)]
pub struct AssessmentDraft {
    pub contact_date: Option<Date>,
    pub phq9_answers: Vec<u8>,
    pub gad7_answers: Vec<u8>,
    pub discuss_with_consultant: bool,
    pub psychiatric_consultant_id: Option<String>,
    pub consultant_notes: Option<String>,
    pub session_type: Option<String>,
    pub session_duration: Option<i64>,
}

impl AssessmentDraft {
    pub fn validate(self, who: Submitter) -> Result<AssessmentSubmission, WorkflowError> {
        let mut errors = Vec::new();
        let contact_date = require_date(&mut errors, "contactDate", self.contact_date, "Contact date is required");
        let phq9_score = answer_errors(&mut errors, "phq9Answers", Measure::Phq9, &self.phq9_answers);
        let gad7_score = answer_errors(&mut errors, "gad7Answers", Measure::Gad7, &self.gad7_answers);

        let (consultant_id, notes) = if self.discuss_with_consultant {
            let id = require_text(
                &mut errors,
                "psychiatricConsultantId",
                &self.psychiatric_consultant_id,
                "Psychiatric consultant is required when discussing with consultant",
            );
            let notes = require_text(
                &mut errors,
                "consultantNotes",
                &self.consultant_notes,
                "Notes are required when discussing with consultant",
            );
            (Some(id), Some(notes))
        } else {
            (None, None)
        };

        let session_type = require_text(&mut errors, "sessionType", &self.session_type, "Session type is required");
        let session_duration = positive_minutes(&mut errors, "sessionDuration", self.session_duration, "Session duration");

        finish(errors, || AssessmentSubmission {
            patient_id: who.patient_id,
            clinic_id: who.clinic_id,
            created_by: who.user_id,
            contact_date,
            phq9_score,
            gad7_score,
            phq9_answers: self.phq9_answers,
            gad7_answers: self.gad7_answers,
            discuss_with_consultant: self.discuss_with_consultant,
            psychiatric_consultant_id: consultant_id,
            consultant_notes: notes,
            session_type,
            session_duration,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct ContactAttemptDraft {
    pub attempt_date: Option<Date>,
    pub minutes: Option<i64>,
    pub interaction_mode: Option<String>,
    pub notes: Option<String>,
}

impl ContactAttemptDraft {
    pub fn validate(self, who: Submitter) -> Result<NewContactAttempt, WorkflowError> {
        let mut errors = Vec::new();
        let attempt_date = require_date(&mut errors, "attemptDate", self.attempt_date, "Attempt date is required");
        let minutes = positive_minutes(&mut errors, "minutes", self.minutes, "Minutes spent");

        let interaction_mode = match self.interaction_mode.as_deref().map(str::trim) {
            None | Some("") => {
                errors.push(FieldError::new("interactionMode", "Interaction mode is required"));
                InteractionMode::ByPhone
            }
            Some(raw) => raw.parse::<InteractionMode>().unwrap_or_else(|_| {
                errors.push(FieldError::new(
                    "interactionMode",
                    "Interaction mode must be one of by_phone, by_video, in_clinic",
                ));
                InteractionMode::ByPhone
            }),
        };

        let notes = match self.notes.as_deref().map(str::trim) {
            Some(n) if !n.is_empty() => n.to_string(),
            _ => DEFAULT_NOTES.to_string(),
        };

        finish(errors, || NewContactAttempt {
            patient_id: who.patient_id,
            user_id: who.user_id,
            attempt_date,
            minutes,
            interaction_mode,
            notes,
        })
    }
}

/// Intake and safety plan share the intake payload.
#[derive(Debug, Clone)]
pub struct IntakeDraft {
    pub form: IntakeForm,
    pub minutes: Option<i64>,
}

impl IntakeDraft {
    pub fn new(form: IntakeForm) -> Self {
        let minutes = (form.minutes > 0).then_some(i64::from(form.minutes));
        Self { form, minutes }
    }

    pub fn validate(self, who: Submitter) -> Result<IntakeSubmission, WorkflowError> {
        let mut errors = Vec::new();
        let minutes = positive_minutes(&mut errors, "minutes", self.minutes, "Minutes");
        let mut form = self.form;
        form.minutes = minutes;
        finish(errors, || IntakeSubmission {
            patient_id: who.patient_id,
            created_by: who.user_id,
            form,
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct PsychConsultDraft {
    pub consult_date: Option<Date>,
    pub minutes: Option<i64>,
    pub recommendations: Option<String>,
    pub treatment_plan: Option<String>,
    pub medications: Option<String>,
    pub follow_up_needed: bool,
    pub next_follow_up_date: Option<Date>,
}

impl PsychConsultDraft {
    pub fn validate(self, who: Submitter) -> Result<NewPsychConsult, WorkflowError> {
        let mut errors = Vec::new();
        let consult_date = require_date(&mut errors, "consultDate", self.consult_date, "Consult date is required");
        let minutes = positive_minutes(&mut errors, "minutes", self.minutes, "Minutes");
        let recommendations = require_text(
            &mut errors,
            "recommendations",
            &self.recommendations,
            "Recommendations are required",
        );

        finish(errors, || NewPsychConsult {
            patient_id: who.patient_id,
            user_id: who.user_id,
            consult_date,
            minutes,
            recommendations,
            treatment_plan: non_blank(self.treatment_plan),
            medications: non_blank(self.medications),
            follow_up_needed: self.follow_up_needed,
            next_follow_up_date: self.next_follow_up_date.filter(|_| self.follow_up_needed),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[derive(Debug, Clone, Default)]
pub struct EnrollmentDraft {
    pub mrn: Option<String>,
    pub care_manager_id: Option<String>,
    pub psychiatric_consultant_id: Option<String>,
    pub primary_care_physician_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub enrollment_date: Option<Date>,
    pub dob: Option<Date>,
}

impl EnrollmentDraft {
    pub fn validate(self, clinic_id: i64) -> Result<NewPatient, WorkflowError> {
        let mut errors = Vec::new();
        let mrn = require_text(&mut errors, "mrn", &self.mrn, "MRN is required");
        let care_manager_id = require_text(&mut errors, "careManagerId", &self.care_manager_id, "Care Manager is required");
        let first_name = require_text(&mut errors, "firstName", &self.first_name, "First Name is required");
        let last_name = require_text(&mut errors, "lastName", &self.last_name, "Last Name is required");
        let enrollment_date = require_date(&mut errors, "enrollmentDate", self.enrollment_date, "Enrollment Date is required");
        let dob = require_date(&mut errors, "dob", self.dob, "Date of Birth is required");

        finish(errors, || NewPatient {
            mrn,
            care_manager_id,
            psychiatric_consultant_id: non_blank(self.psychiatric_consultant_id),
            primary_care_physician_id: non_blank(self.primary_care_physician_id),
            first_name,
            last_name,
            enrollment_date,
            dob,
            clinic_id,
        })
    }
}

/// Which password rules a candidate satisfies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PasswordStrength {
    pub uppercase: bool,
    pub lowercase: bool,
    pub number: bool,
    pub special_char: bool,
    pub length: bool,
}

impl PasswordStrength {
    pub fn check(password: &str) -> Self {
        let len = password.chars().count();
        Self {
            uppercase: password.chars().any(|c| c.is_ascii_uppercase()),
            lowercase: password.chars().any(|c| c.is_ascii_lowercase()),
            number: password.chars().any(|c| c.is_ascii_digit()),
            special_char: password.chars().any(|c| PASSWORD_SPECIALS.contains(c)),
            length: (8..=12).contains(&len),
        }
    }

    pub fn is_strong(&self) -> bool {
        self.uppercase && self.lowercase && self.number && self.special_char && self.length
    }

    /// Human-readable descriptions of the unmet rules.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            (self.uppercase, "an uppercase letter"),
            (self.lowercase, "a lowercase letter"),
            (self.number, "a number"),
            (self.special_char, "a special character (!@#^&*)"),
            (self.length, "8-12 characters"),
        ]
        .into_iter()
        .filter(|(ok, _)| !ok)
        .map(|(_, rule)| rule)
        .collect()
    }
}

/// Loose `local@domain.tld` check.
pub fn is_valid_email(email: &str) -> bool {
    let Some((local, domain)) = email.trim().split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .rsplit_once('.')
            .is_some_and(|(host, tld)| !host.is_empty() && !tld.is_empty())
}

/// Admin create/edit user form. A password is required on create; on edit
/// an empty password keeps the current one.
#[derive(Debug, Clone, Default)]
pub struct UserDraft {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone_number: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub clinic_ids: Vec<i64>,
}

impl UserDraft {
    pub fn validate(self, creating: bool) -> Result<NewUser, WorkflowError> {
        let mut errors = Vec::new();
        let name = require_text(&mut errors, "name", &self.name, "Name is required");
        let email = require_text(&mut errors, "email", &self.email, "Email is required");
        if !email.is_empty() && !is_valid_email(&email) {
            errors.push(FieldError::new("email", "Invalid email address"));
        }

        let password = non_blank(self.password);
        match &password {
            None if creating => errors.push(FieldError::new("password", "Password is required")),
            Some(p) => {
                let strength = PasswordStrength::check(p);
                if !strength.is_strong() {
                    errors.push(FieldError::new(
                        "password",
                        format!("Password must contain {}", strength.missing().join(", ")),
                    ));
                }
            }
            None => {}
        }

        let role = self.role.unwrap_or_else(|| {
            errors.push(FieldError::new("role", "Role is required"));
            Role::Admin
        });

        finish(errors, || NewUser {
            name,
            email,
            phone_number: non_blank(self.phone_number),
            password,
            role,
            clinic_ids: self.clinic_ids,
        })
    }
}
