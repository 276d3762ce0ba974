//! Which dashboard actions a patient's workflow stage enables.
//!
//! Everything here is recomputed from freshly fetched data after each
//! submission. Nothing is cached between evaluations.

use serde::Serialize;
use uphcs_core::models::assessment::TreatmentHistoryEntry;
use uphcs_core::models::patient::{Patient, PatientStatus};
use uphcs_core::models::user::Role;

/// The facts about a patient that determine its workflow stage.
#[derive(Debug, Clone, Copy)]
pub struct WorkflowFacts<'a> {
    pub status: PatientStatus,
    pub intake_exists: bool,
    pub history: &'a [TreatmentHistoryEntry],
}

impl<'a> WorkflowFacts<'a> {
    pub fn new(patient: &Patient, intake_exists: bool, history: &'a [TreatmentHistoryEntry]) -> Self {
        Self {
            status: patient.status,
            intake_exists,
            history,
        }
    }

    /// An Active patient is treated as having completed intake even
    /// without a stored record.
    pub fn intake_completed(&self) -> bool {
        self.intake_exists || self.status == PatientStatus::Active
    }

    pub fn has_initial_assessment(&self) -> bool {
        self.history.iter().any(|e| e.is_initial_assessment())
    }

    /// Stage rule for the intake action, before role and clinic checks.
    pub fn intake_due(&self) -> bool {
        self.status == PatientStatus::Enrolled && !self.intake_exists
    }

    pub fn initial_assessment_due(&self) -> bool {
        matches!(self.status, PatientStatus::Enrolled | PatientStatus::Active)
            && self.intake_completed()
            && !self.has_initial_assessment()
    }

    pub fn follow_up_due(&self) -> bool {
        self.status == PatientStatus::Active && self.has_initial_assessment()
    }

    /// Whether to warn that the patient has no intake on file.
    pub fn intake_warning(&self) -> bool {
        self.status != PatientStatus::Active && !self.intake_exists
    }
}

/// The actions offered on a patient dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct WorkflowActions {
    pub intake: bool,
    pub initial_assessment: bool,
    pub follow_up_assessment: bool,
    pub contact_attempt: bool,
    pub documents: bool,
}

impl WorkflowActions {
    /// Evaluate the actions for `viewer` on this patient.
    ///
    /// Intake and assessments are care-manager actions and need the patient
    /// to belong to a clinic.
    pub fn evaluate(facts: &WorkflowFacts<'_>, viewer: Role, has_clinic: bool) -> Self {
        let care_manager = viewer == Role::CareManager && has_clinic;
        Self {
            intake: care_manager && facts.intake_due(),
            initial_assessment: care_manager && facts.initial_assessment_due(),
            follow_up_assessment: care_manager && facts.follow_up_due(),
            contact_attempt: true,
            documents: true,
        }
    }

    /// Actions left once intake or history could not be loaded: clinical
    /// steps stay off, contact attempts and documents stay on.
    pub fn records_only() -> Self {
        Self {
            intake: false,
            initial_assessment: false,
            follow_up_assessment: false,
            contact_attempt: true,
            documents: true,
        }
    }

    pub fn for_patient(
        patient: &Patient,
        intake_exists: bool,
        history: &[TreatmentHistoryEntry],
        viewer: Role,
    ) -> Self {
        let facts = WorkflowFacts::new(patient, intake_exists, history);
        Self::evaluate(&facts, viewer, patient.has_clinic())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepState {
    Done,
    /// The step the user can act on now.
    Current,
    Pending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub label: &'static str,
    pub state: StepState,
}

/// The three-step progress indicator. Only Enrolled and Active patients
/// have one.
pub fn progress_steps(facts: &WorkflowFacts<'_>, actions: &WorkflowActions) -> Option<Vec<ProgressStep>> {
    let intake = if facts.intake_completed() {
        StepState::Done
    } else if actions.intake {
        StepState::Current
    } else {
        StepState::Pending
    };
    let initial = if facts.has_initial_assessment() {
        StepState::Done
    } else if actions.initial_assessment {
        StepState::Current
    } else {
        StepState::Pending
    };

    let last = match facts.status {
        PatientStatus::Enrolled => ProgressStep {
            label: "Begin Treatment",
            state: StepState::Pending,
        },
        PatientStatus::Active => ProgressStep {
            label: "Continue with Follow-up Assessments",
            state: if actions.follow_up_assessment {
                StepState::Current
            } else {
                StepState::Pending
            },
        },
        _ => return None,
    };

    Some(vec![
        ProgressStep {
            label: "Complete Patient Intake",
            state: intake,
        },
        ProgressStep {
            label: "Complete Initial Assessment",
            state: initial,
        },
        last,
    ])
}
