use jiff::civil::date;
use uphcs_core::models::contact_attempt::InteractionMode;
use uphcs_core::models::intake::IntakeForm;
use uphcs_core::models::user::Role;
use uphcs_workflow::error::WorkflowError;
use uphcs_workflow::forms::{
    AssessmentDraft, ContactAttemptDraft, EnrollmentDraft, FieldError, IntakeDraft, PasswordStrength,
    PsychConsultDraft, Submitter, UserDraft, is_valid_email,
};

const WHO: Submitter = Submitter {
    user_id: 7,
    patient_id: 42,
    clinic_id: 3,
};

fn field_errors(result: Result<impl std::fmt::Debug, WorkflowError>) -> Vec<FieldError> {
    match result {
        Err(WorkflowError::InvalidForm(errors)) => errors,
        other => panic!("expected invalid form, got {other:?}"),
    }
}

fn fields(errors: &[FieldError]) -> Vec<&'static str> {
    errors.iter().map(|e| e.field).collect()
}

fn valid_assessment() -> AssessmentDraft {
    AssessmentDraft {
        contact_date: Some(date(2024, 2, 1)),
        phq9_answers: vec![1, 2, 1, 1, 2, 1, 1, 2, 1],
        gad7_answers: vec![0, 1, 1, 2, 0, 1, 3],
        discuss_with_consultant: false,
        psychiatric_consultant_id: Some("9".to_string()),
        consultant_notes: Some("ignored".to_string()),
        session_type: Some("by_phone".to_string()),
        session_duration: Some(30),
    }
}

#[test]
fn assessment_computes_scores_and_nulls_consultant_fields() {
    let body = valid_assessment().validate(WHO).unwrap();
    assert_eq!(body.phq9_score, 12);
    assert_eq!(body.gad7_score, 8);
    assert_eq!(body.created_by, 7);
    assert_eq!(body.psychiatric_consultant_id, None);
    assert_eq!(body.consultant_notes, None);
    assert_eq!(body.session_duration, 30);
}

#[test]
fn assessment_requires_consultant_fields_when_discussing() {
    let mut draft = valid_assessment();
    draft.discuss_with_consultant = true;
    draft.psychiatric_consultant_id = None;
    draft.consultant_notes = Some("   ".to_string());
    let errors = field_errors(draft.validate(WHO));
    assert_eq!(fields(&errors), vec!["psychiatricConsultantId", "consultantNotes"]);

    let mut draft = valid_assessment();
    draft.discuss_with_consultant = true;
    let body = draft.validate(WHO).unwrap();
    assert_eq!(body.psychiatric_consultant_id.as_deref(), Some("9"));
}

#[test]
fn assessment_reports_every_problem_at_once() {
    let draft = AssessmentDraft {
        phq9_answers: vec![1, 2, 3],
        gad7_answers: vec![0, 1, 1, 2, 0, 1, 4],
        session_duration: Some(0),
        ..AssessmentDraft::default()
    };
    let errors = field_errors(draft.validate(WHO));
    assert_eq!(
        fields(&errors),
        vec!["contactDate", "phq9Answers", "gad7Answers", "sessionType", "sessionDuration"]
    );
    assert!(errors[4].message.contains("positive integer"));
}

#[test]
fn contact_attempt_defaults_blank_notes() {
    let body = ContactAttemptDraft {
        attempt_date: Some(date(2024, 2, 1)),
        minutes: Some(15),
        interaction_mode: Some("by_video".to_string()),
        notes: Some("  ".to_string()),
    }
    .validate(WHO)
    .unwrap();
    assert_eq!(body.notes, "Contact attempt made");
    assert_eq!(body.interaction_mode, InteractionMode::ByVideo);
    assert_eq!(body.user_id, 7);
}

#[test]
fn contact_attempt_rejects_bad_input() {
    let errors = field_errors(
        ContactAttemptDraft {
            attempt_date: None,
            minutes: Some(-5),
            interaction_mode: Some("carrier_pigeon".to_string()),
            notes: None,
        }
        .validate(WHO),
    );
    assert_eq!(fields(&errors), vec!["attemptDate", "minutes", "interactionMode"]);
}

#[test]
fn intake_requires_positive_minutes() {
    let form = IntakeForm::blank(date(2024, 2, 1));
    let errors = field_errors(IntakeDraft::new(form.clone()).validate(WHO));
    assert_eq!(fields(&errors), vec!["minutes"]);

    let mut draft = IntakeDraft::new(form);
    draft.minutes = Some(45);
    let body = draft.validate(WHO).unwrap();
    assert_eq!(body.form.minutes, 45);
    assert_eq!(body.created_by, 7);
}

#[test]
fn psych_consult_drops_next_date_without_follow_up() {
    let draft = PsychConsultDraft {
        consult_date: Some(date(2024, 2, 1)),
        minutes: Some(20),
        recommendations: Some("Increase sertraline".to_string()),
        treatment_plan: Some(String::new()),
        medications: None,
        follow_up_needed: false,
        next_follow_up_date: Some(date(2024, 3, 1)),
    };
    let body = draft.clone().validate(WHO).unwrap();
    assert_eq!(body.next_follow_up_date, None);
    assert_eq!(body.treatment_plan, None);

    let body = PsychConsultDraft {
        follow_up_needed: true,
        ..draft
    }
    .validate(WHO)
    .unwrap();
    assert_eq!(body.next_follow_up_date, Some(date(2024, 3, 1)));
}

#[test]
fn psych_consult_required_fields() {
    let errors = field_errors(PsychConsultDraft::default().validate(WHO));
    assert_eq!(fields(&errors), vec!["consultDate", "minutes", "recommendations"]);
}

#[test]
fn enrollment_required_fields() {
    let errors = field_errors(EnrollmentDraft::default().validate(3));
    assert_eq!(
        fields(&errors),
        vec!["mrn", "careManagerId", "firstName", "lastName", "enrollmentDate", "dob"]
    );

    let body = EnrollmentDraft {
        mrn: Some("MRN-1".to_string()),
        care_manager_id: Some("7".to_string()),
        psychiatric_consultant_id: Some(" ".to_string()),
        primary_care_physician_id: None,
        first_name: Some("Dana".to_string()),
        last_name: Some("Reyes".to_string()),
        enrollment_date: Some(date(2024, 1, 10)),
        dob: Some(date(1990, 6, 15)),
    }
    .validate(3)
    .unwrap();
    assert_eq!(body.clinic_id, 3);
    assert_eq!(body.psychiatric_consultant_id, None);
}

#[test]
fn password_rules() {
    assert!(PasswordStrength::check("Abcdef1!").is_strong());
    assert!(PasswordStrength::check("Abcdefgh12#x").is_strong());
    assert!(!PasswordStrength::check("Abcdefgh12#xy").is_strong());
    assert!(!PasswordStrength::check("Abc1!").is_strong());

    let weak = PasswordStrength::check("abcdefgh$");
    assert_eq!(
        weak.missing(),
        vec!["an uppercase letter", "a number", "a special character (!@#^&*)"]
    );
}

#[test]
fn email_check() {
    assert!(is_valid_email("sam@example.org"));
    assert!(!is_valid_email("sam@example"));
    assert!(!is_valid_email("sam example@x.org"));
    assert!(!is_valid_email("@example.org"));
}

#[test]
fn user_form_password_required_only_on_create() {
    let draft = UserDraft {
        name: Some("Sam Ortiz".to_string()),
        email: Some("sam@example.org".to_string()),
        phone_number: None,
        password: None,
        role: Some(Role::CareManager),
        clinic_ids: vec![3],
    };
    let errors = field_errors(draft.clone().validate(true));
    assert_eq!(fields(&errors), vec!["password"]);

    let body = draft.clone().validate(false).unwrap();
    assert_eq!(body.password, None);

    let errors = field_errors(
        UserDraft {
            password: Some("weakpass".to_string()),
            ..draft
        }
        .validate(true),
    );
    assert!(errors[0].message.starts_with("Password must contain"));
}
