use jiff::civil::date;
use uphcs_core::models::assessment::{INITIAL_ASSESSMENT, TreatmentHistoryEntry};
use uphcs_core::models::patient::{Patient, PatientStatus};
use uphcs_core::models::user::Role;
use uphcs_workflow::gating::{StepState, WorkflowActions, WorkflowFacts, progress_steps};

fn patient(status: PatientStatus) -> Patient {
    Patient {
        patient_id: 42,
        clinic_id: 3,
        clinic_name: Some("Main Street".to_string()),
        mrn: "MRN-0042".to_string(),
        first_name: "Dana".to_string(),
        last_name: "Reyes".to_string(),
        dob: date(1990, 6, 15),
        enrollment_date: date(2024, 1, 10),
        status,
        phq9_first: None,
        phq9_last: None,
        gad7_first: None,
        gad7_last: None,
        providers: Vec::new(),
    }
}

fn history(kind: &str) -> TreatmentHistoryEntry {
    TreatmentHistoryEntry {
        assessment_date: date(2024, 2, 1),
        assessment_by: "Sam Ortiz".to_string(),
        user_role: Some("BHCM".to_string()),
        assessment_type: kind.to_string(),
        phq9_score: Some(12),
        gad7_score: Some(8),
        psych_consultation_recommended: None,
        interaction_mode: None,
        duration_minutes: None,
    }
}

fn only(intake: bool, initial: bool, follow_up: bool) -> WorkflowActions {
    WorkflowActions {
        intake,
        initial_assessment: initial,
        follow_up_assessment: follow_up,
        contact_attempt: true,
        documents: true,
    }
}

#[test]
fn enrolled_without_intake_offers_only_intake() {
    let p = patient(PatientStatus::Enrolled);
    let actions = WorkflowActions::for_patient(&p, false, &[], Role::CareManager);
    assert_eq!(actions, only(true, false, false));
}

#[test]
fn enrolled_with_intake_offers_initial_assessment() {
    let p = patient(PatientStatus::Enrolled);
    let actions = WorkflowActions::for_patient(&p, true, &[], Role::CareManager);
    assert_eq!(actions, only(false, true, false));
}

#[test]
fn active_with_initial_assessment_offers_only_follow_up() {
    let p = patient(PatientStatus::Active);
    let hist = [history(INITIAL_ASSESSMENT), history("Follow-up Assessment")];
    let actions = WorkflowActions::for_patient(&p, true, &hist, Role::CareManager);
    assert_eq!(actions, only(false, false, true));
}

#[test]
fn active_without_intake_record_counts_as_intake_done() {
    let p = patient(PatientStatus::Active);
    let actions = WorkflowActions::for_patient(&p, false, &[], Role::CareManager);
    assert_eq!(actions, only(false, true, false));
}

#[test]
fn other_statuses_offer_no_clinical_actions() {
    for status in [PatientStatus::RelapsePlan, PatientStatus::Transferred, PatientStatus::Deactivated] {
        let p = patient(status);
        let hist = [history(INITIAL_ASSESSMENT)];
        let actions = WorkflowActions::for_patient(&p, true, &hist, Role::CareManager);
        assert_eq!(actions, only(false, false, false), "{status:?}");
    }
}

#[test]
fn non_care_managers_only_get_contacts_and_documents() {
    let p = patient(PatientStatus::Enrolled);
    for role in [Role::Admin, Role::PsychiatricConsultant] {
        let actions = WorkflowActions::for_patient(&p, false, &[], role);
        assert_eq!(actions, only(false, false, false));
    }
}

#[test]
fn patient_without_clinic_gets_no_clinical_actions() {
    let mut p = patient(PatientStatus::Enrolled);
    p.clinic_name = None;
    let actions = WorkflowActions::for_patient(&p, false, &[], Role::CareManager);
    assert_eq!(actions, only(false, false, false));
}

#[test]
fn intake_warning_only_for_non_active_without_intake() {
    let facts = WorkflowFacts {
        status: PatientStatus::Enrolled,
        intake_exists: false,
        history: &[],
    };
    assert!(facts.intake_warning());

    let facts = WorkflowFacts {
        status: PatientStatus::Active,
        intake_exists: false,
        history: &[],
    };
    assert!(!facts.intake_warning());

    let facts = WorkflowFacts {
        status: PatientStatus::Enrolled,
        intake_exists: true,
        history: &[],
    };
    assert!(!facts.intake_warning());
}

#[test]
fn progress_for_enrolled_patient() {
    let facts = WorkflowFacts {
        status: PatientStatus::Enrolled,
        intake_exists: true,
        history: &[],
    };
    let actions = WorkflowActions::evaluate(&facts, Role::CareManager, true);
    let steps = progress_steps(&facts, &actions).unwrap();
    let states: Vec<_> = steps.iter().map(|s| (s.label, s.state)).collect();
    assert_eq!(
        states,
        vec![
            ("Complete Patient Intake", StepState::Done),
            ("Complete Initial Assessment", StepState::Current),
            ("Begin Treatment", StepState::Pending),
        ]
    );
}

#[test]
fn progress_for_active_patient() {
    let hist = [history(INITIAL_ASSESSMENT)];
    let facts = WorkflowFacts {
        status: PatientStatus::Active,
        intake_exists: false,
        history: &hist,
    };
    let actions = WorkflowActions::evaluate(&facts, Role::CareManager, true);
    let steps = progress_steps(&facts, &actions).unwrap();
    assert_eq!(steps[0].state, StepState::Done);
    assert_eq!(steps[1].state, StepState::Done);
    assert_eq!(steps[2].label, "Continue with Follow-up Assessments");
    assert_eq!(steps[2].state, StepState::Current);
}

#[test]
fn no_progress_for_inactive_patient() {
    let facts = WorkflowFacts {
        status: PatientStatus::Deactivated,
        intake_exists: true,
        history: &[],
    };
    let actions = WorkflowActions::evaluate(&facts, Role::CareManager, true);
    assert!(progress_steps(&facts, &actions).is_none());
}
