//! Everything the patient dashboard shows, fetched in one pass.
//!
//! The patient record is loaded first; every other section is fetched
//! concurrently afterwards and fails on its own without taking the rest
//! of the dashboard down.

use std::fmt;

use uphcs_core::models::assessment::{LastUpdate, Measure, ScoreHistoryPoint, TreatmentHistoryEntry};
use uphcs_core::models::contact_attempt::{ContactAttempt, LastContact};
use uphcs_core::models::intake::IntakeForm;
use uphcs_core::models::patient::{Patient, PatientFlags};
use uphcs_core::models::user::Role;
use uphcs_workflow::gating::{ProgressStep, WorkflowActions, WorkflowFacts, progress_steps};

use crate::client::ApiClient;
use crate::error::ClientError;

/// A dashboard section that could not be loaded.
#[derive(Debug)]
pub struct SectionError {
    pub section: &'static str,
    pub source: ClientError,
}

impl fmt::Display for SectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Failed to fetch {}: {}", self.section, self.source)
    }
}

pub type Section<T> = Result<T, SectionError>;

fn section<T>(name: &'static str, result: Result<T, ClientError>) -> Section<T> {
    result.map_err(|source| {
        tracing::warn!(section = name, error = %source, "dashboard section failed");
        SectionError { section: name, source }
    })
}

#[derive(Debug)]
pub struct PatientDashboard {
    pub patient: Patient,
    pub flags: Section<PatientFlags>,
    pub treatment_history: Section<Vec<TreatmentHistoryEntry>>,
    pub last_contact: Section<Option<LastContact>>,
    pub phq9_update: Section<Option<LastUpdate>>,
    pub gad7_update: Section<Option<LastUpdate>>,
    pub phq9_history: Section<Vec<ScoreHistoryPoint>>,
    pub gad7_history: Section<Vec<ScoreHistoryPoint>>,
    pub latest_intake: Section<Option<IntakeForm>>,
    pub contact_attempts: Section<Vec<ContactAttempt>>,
    pub actions: WorkflowActions,
    pub progress: Option<Vec<ProgressStep>>,
    pub intake_warning: bool,
}

impl PatientDashboard {
    pub fn failed_sections(&self) -> Vec<&SectionError> {
        [
            self.flags.as_ref().err(),
            self.treatment_history.as_ref().err(),
            self.last_contact.as_ref().err(),
            self.phq9_update.as_ref().err(),
            self.gad7_update.as_ref().err(),
            self.phq9_history.as_ref().err(),
            self.gad7_history.as_ref().err(),
            self.latest_intake.as_ref().err(),
            self.contact_attempts.as_ref().err(),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

impl ApiClient {
    /// Load the dashboard for `patient_id` as seen by `viewer`.
    ///
    /// Only a failure to load the patient record itself is an error.
    pub async fn load_dashboard(&self, patient_id: i64, viewer: Role) -> Result<PatientDashboard, ClientError> {
        let patient = self.patient(patient_id).await?;
        let id = patient.patient_id;

        let (flags, history, last_contact, phq9_update, gad7_update, phq9_history, gad7_history, intake, attempts) = tokio::join!(
            self.patient_flags(id),
            self.treatment_history(id),
            self.last_contact(id),
            self.last_update(id, Measure::Phq9),
            self.last_update(id, Measure::Gad7),
            self.assessment_history(id, Measure::Phq9),
            self.assessment_history(id, Measure::Gad7),
            self.latest_intake(id),
            self.contact_attempts(id),
        );

        let treatment_history = section("treatment history", history);
        let latest_intake = section("latest intake", intake);

        // Stage gating needs both intake and history. Without them, clinical
        // actions stay off rather than guessing.
        let (actions, progress, intake_warning) = match (&treatment_history, &latest_intake) {
            (Ok(history), Ok(intake)) => {
                let facts = WorkflowFacts::new(&patient, intake.is_some(), history);
                let actions = WorkflowActions::evaluate(&facts, viewer, patient.has_clinic());
                let progress = progress_steps(&facts, &actions);
                (actions, progress, facts.intake_warning())
            }
            _ => (WorkflowActions::records_only(), None, false),
        };

        tracing::debug!(patient_id = id, ?actions, "dashboard loaded");

        Ok(PatientDashboard {
            flags: section("patient flags", flags),
            treatment_history,
            last_contact: section("last contact information", last_contact),
            phq9_update: section("PHQ-9 last update info", phq9_update),
            gad7_update: section("GAD-7 last update info", gad7_update),
            phq9_history: section("PHQ-9 history", phq9_history),
            gad7_history: section("GAD-7 history", gad7_history),
            latest_intake,
            contact_attempts: section("contact attempts", attempts),
            actions,
            progress,
            intake_warning,
            patient,
        })
    }
}
