use std::str::FromStr;

use eyre::{Result, eyre};
use uphcs_cli::render;
use uphcs_client::patients::StaffKind;
use uphcs_core::models::assessment::{AssessmentStage, Measure};
use uphcs_core::models::clinic::ClinicInput;
use uphcs_core::models::intake::IntakeForm;
use uphcs_core::models::patient::Patient;
use uphcs_core::models::reminder::{ReminderAction, ReminderActionBody};
use uphcs_core::models::user::Role;
use uphcs_session::access::check_dashboard_access;
use uphcs_session::routing::home_route;
use uphcs_workflow::documents;
use uphcs_workflow::error::WorkflowError;
use uphcs_workflow::forms::{
    AssessmentDraft, ContactAttemptDraft, EnrollmentDraft, IntakeDraft, PsychConsultDraft, Submitter,
    UserDraft,
};
use uphcs_workflow::gating::WorkflowActions;
use uphcs_workflow::listing::{
    ACTIVE_PAGE_SIZE, ActiveColumn, CONTACT_HISTORY_PAGE_SIZE, ConsultColumn, ContactColumn,
    INACTIVE_PAGE_SIZE, ListQuery, PatientColumn, SortState,
};
use uphcs_workflow::reminders;

use crate::cli::{
    AdminCommand, AssessArgs, AssessCommand, ClinicArgs, ClinicCommand, Command, DocumentsCommand,
    EnrollArgs, ListArgs, PatientCommand, PatientsCommand, RemindersCommand, StaffArg, UserArgs,
};
use crate::state::{AppContext, Session};

pub async fn run(ctx: &mut AppContext, command: Command) -> Result<()> {
    match command {
        Command::Login { username, password } => login(ctx, &username, &password).await,
        Command::Logout => logout(ctx),
        Command::Whoami => whoami(ctx).await,
        Command::Clinic { command } => clinic(ctx, command).await,
        Command::Patients { command } => patients(ctx, command).await,
        Command::Patient { command } => patient(ctx, command).await,
        Command::Assess { stage } => assess(ctx, stage).await,
        Command::Contact {
            patient_id,
            date,
            minutes,
            mode,
            notes,
        } => {
            let draft = ContactAttemptDraft {
                attempt_date: date,
                minutes,
                interaction_mode: mode,
                notes,
            };
            contact(ctx, patient_id, draft).await
        }
        Command::Intake {
            patient_id,
            file,
            date,
            minutes,
            safety_plan_discussed,
        } => {
            let mut form = match file {
                Some(path) => {
                    let json = std::fs::read_to_string(&path)
                        .map_err(|e| eyre!("failed to read {}: {e}", path.display()))?;
                    serde_json::from_str::<IntakeForm>(&json)?
                }
                None => IntakeForm::blank(date.unwrap_or_else(AppContext::today)),
            };
            if let Some(date) = date {
                form.contact_date = date;
            }
            form.safety_plan_discussed |= safety_plan_discussed;
            let mut draft = IntakeDraft::new(form);
            if minutes.is_some() {
                draft.minutes = minutes;
            }
            intake(ctx, patient_id, draft).await
        }
        Command::Consult {
            patient_id,
            date,
            minutes,
            recommendations,
            treatment_plan,
            medications,
            follow_up,
        } => {
            let draft = PsychConsultDraft {
                consult_date: date,
                minutes,
                recommendations,
                treatment_plan,
                medications,
                follow_up_needed: follow_up.is_some(),
                next_follow_up_date: follow_up,
            };
            consult(ctx, patient_id, draft).await
        }
        Command::Reminders { command } => reminders(ctx, command).await,
        Command::Documents { command } => documents(ctx, command).await,
        Command::Enroll(args) => enroll(ctx, args).await,
        Command::Staff { kind } => staff(ctx, kind).await,
        Command::Summary => summary(ctx).await,
        Command::Admin { command } => admin(ctx, command).await,
    }
}

/// Turn list flags into a query. `--desc` selects the column twice, which
/// flips it to descending.
fn list_query<C>(args: &ListArgs, default_per_page: usize) -> Result<ListQuery<C>>
where
    C: FromStr<Err = WorkflowError> + Copy + Eq,
{
    let mut query = ListQuery::new(args.per_page.unwrap_or(default_per_page));
    query.search = args.search.clone();
    query.page = args.page.saturating_sub(1);
    if let Some(raw) = &args.sort {
        let column: C = raw.parse()?;
        let mut sort = SortState::new(column);
        if args.desc {
            sort = sort.select(column);
        }
        query.sort = Some(sort);
    }
    Ok(query)
}

/// Field errors are listed one per line instead of on a single line.
fn validated<T>(result: Result<T, WorkflowError>) -> Result<T> {
    match result {
        Ok(body) => Ok(body),
        Err(WorkflowError::InvalidForm(errors)) => Err(eyre!(
            "form has {} error(s):\n{}",
            errors.len(),
            render::field_errors(&errors)
        )),
        Err(e) => Err(e.into()),
    }
}

async fn login(ctx: &mut AppContext, username: &str, password: &str) -> Result<()> {
    let token = ctx.client.login(username, password).await?;
    ctx.client.set_token(Some(token.clone()));
    ctx.config.token = Some(token);
    let session = ctx.session().await?;
    ctx.save()?;
    println!("Signed in as {} ({})", session.user.name, session.user.role);
    if let Some(clinic) = session.clinics.selected() {
        println!("Clinic: {}", clinic.name);
    }
    println!("Home: {}", home_route(session.user.role));
    Ok(())
}

fn logout(ctx: &mut AppContext) -> Result<()> {
    ctx.config.clear_session();
    ctx.client.set_token(None);
    ctx.save()?;
    tracing::info!("signed out");
    println!("Signed out");
    Ok(())
}

async fn whoami(ctx: &mut AppContext) -> Result<()> {
    let session = ctx.session().await?;
    let user = &session.user;
    println!("{} <{}>", user.name, user.email);
    println!("Role: {}", user.role);
    println!("Clinic: {}", render::opt(session.clinics.selected().map(|c| c.name.as_str())));
    println!("Server: {}", ctx.client.base_url());
    Ok(())
}

async fn clinic(ctx: &mut AppContext, command: ClinicCommand) -> Result<()> {
    let mut session = ctx.session().await?;
    match command {
        ClinicCommand::List => {
            let selected = session.clinics.selected().map(|c| c.id);
            let rows: Vec<Vec<String>> = session
                .clinics
                .clinics()
                .iter()
                .map(|c| {
                    let mark = if Some(c.id) == selected { "*" } else { "" };
                    vec![mark.to_string(), c.id.to_string(), c.name.clone()]
                })
                .collect();
            print!("{}", render::table(&["", "ID", "Clinic"], &rows));
        }
        ClinicCommand::Select { clinic_id } => {
            let clinic = ctx.select_clinic(&mut session, clinic_id)?;
            println!("Selected clinic {} ({})", clinic.name, clinic.id);
        }
    }
    Ok(())
}

async fn patients(ctx: &mut AppContext, command: PatientsCommand) -> Result<()> {
    let session = ctx.session().await?;
    let clinic_id = session.clinic()?.id;
    let output = match command {
        PatientsCommand::Active(args) => {
            session.require_route("/active-patients")?;
            let rows = ctx.client.active_patients(clinic_id).await?;
            let query = list_query::<ActiveColumn>(&args, ACTIVE_PAGE_SIZE)?;
            render::active_patients(&query.apply(&rows))
        }
        PatientsCommand::Inactive(args) => {
            session.require_route("/patients")?;
            let rows = ctx.client.inactive_patients(clinic_id).await?;
            let query = list_query::<PatientColumn>(&args, INACTIVE_PAGE_SIZE)?;
            render::patient_rows(&query.apply(&rows))
        }
        PatientsCommand::Enrolled(args) => {
            session.require_route("/enrolled-patients")?;
            let rows = ctx.client.enrolled_patients(clinic_id).await?;
            let query = list_query::<PatientColumn>(&args, INACTIVE_PAGE_SIZE)?;
            render::patient_rows(&query.apply(&rows))
        }
        PatientsCommand::Assigned(args) => {
            session.require_route("/psych-patients")?;
            let rows = ctx
                .client
                .psych_assigned_patients(session.user.id, clinic_id)
                .await?;
            let query = list_query::<ConsultColumn>(&args, INACTIVE_PAGE_SIZE)?;
            render::consult_patients(&query.apply(&rows))
        }
    };
    println!("{output}");
    Ok(())
}

async fn patient(ctx: &mut AppContext, command: PatientCommand) -> Result<()> {
    let session = ctx.session().await?;
    match command {
        PatientCommand::Show { patient_id } => {
            open_patient(ctx, &session, patient_id).await?;
            let dashboard = ctx.client.load_dashboard(patient_id, session.user.role).await?;
            println!("{}", render::dashboard(&dashboard, AppContext::today()));
        }
        PatientCommand::Contacts { patient_id, list } => {
            open_patient(ctx, &session, patient_id).await?;
            let attempts = ctx.client.contact_attempts(patient_id).await?;
            let query = list_query::<ContactColumn>(&list, CONTACT_HISTORY_PAGE_SIZE)?;
            println!("{}", render::contact_attempts(&query.apply(&attempts)));
        }
        PatientCommand::Consults { patient_id } => {
            open_patient(ctx, &session, patient_id).await?;
            let (consults, notes) = tokio::join!(
                ctx.client.psych_consultations(patient_id),
                ctx.client.care_manager_notes(patient_id),
            );
            println!("Psychiatric consultations");
            for c in consults? {
                println!("  {}  {} min  {}", c.consult_date, c.minutes, c.recommendations);
                if let Some(next) = c.next_follow_up_date {
                    println!("    next follow-up {next}");
                }
            }
            println!("Care manager notes");
            for n in notes? {
                let referral = if n.referral_needed { "  [referral]" } else { "" };
                println!("  {}  {}{referral}  {}", n.note_date, n.created_by, n.content);
            }
        }
    }
    Ok(())
}

/// Fetch a patient the user may open.
async fn open_patient(ctx: &AppContext, session: &Session, patient_id: i64) -> Result<Patient> {
    session.require_route(&format!("/patients/{patient_id}"))?;
    let patient = ctx.client.patient(patient_id).await?;
    check_dashboard_access(&session.user, &patient)?;
    Ok(patient)
}

/// The patient plus which workflow actions are open to this user.
async fn gated_patient(ctx: &AppContext, session: &Session, patient_id: i64) -> Result<(Patient, WorkflowActions)> {
    let patient = open_patient(ctx, session, patient_id).await?;
    let actions = ctx.client.workflow_actions(&patient, session.user.role).await;
    Ok((patient, actions))
}

fn submitter(session: &Session, patient: &Patient) -> Submitter {
    Submitter {
        user_id: session.user.id,
        patient_id: patient.patient_id,
        clinic_id: patient.clinic_id,
    }
}

fn print_next_actions(actions: &WorkflowActions) {
    let next: Vec<&str> = [
        (actions.intake, "intake"),
        (actions.initial_assessment, "assess initial"),
        (actions.follow_up_assessment, "assess follow-up"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| name)
    .collect();
    if !next.is_empty() {
        println!("Next: {}", next.join(", "));
    }
}

async fn assess(ctx: &mut AppContext, command: AssessCommand) -> Result<()> {
    let session = ctx.session().await?;
    let (stage, args) = match command {
        AssessCommand::Initial(args) => (AssessmentStage::Initial, args),
        AssessCommand::FollowUp(args) => (AssessmentStage::FollowUp, args),
    };
    let AssessArgs {
        patient_id,
        date,
        phq9,
        gad7,
        session_type,
        duration,
        discuss,
        consultant_id,
        consultant_notes,
    } = args;

    let (patient, actions) = gated_patient(ctx, &session, patient_id).await?;
    let allowed = match stage {
        AssessmentStage::Initial => actions.initial_assessment,
        AssessmentStage::FollowUp => actions.follow_up_assessment,
    };
    if !allowed {
        return Err(eyre!(
            "{:?} assessment is not available for {} ({})",
            stage,
            patient.display_name(),
            patient.status.label()
        ));
    }

    let draft = AssessmentDraft {
        contact_date: date,
        phq9_answers: phq9,
        gad7_answers: gad7,
        discuss_with_consultant: discuss,
        psychiatric_consultant_id: consultant_id,
        consultant_notes,
        session_type,
        session_duration: duration,
    };
    let submission = validated(draft.validate(submitter(&session, &patient)))?;
    let next = ctx
        .client
        .record_assessment(stage, &submission, session.user.role)
        .await?;
    println!(
        "Recorded assessment for {}: PHQ-9 {}, GAD-7 {}",
        patient.display_name(),
        uphcs_instruments::describe(Measure::Phq9, Some(submission.phq9_score)),
        uphcs_instruments::describe(Measure::Gad7, Some(submission.gad7_score)),
    );
    print_next_actions(&next);
    Ok(())
}

async fn contact(ctx: &mut AppContext, patient_id: i64, draft: ContactAttemptDraft) -> Result<()> {
    let session = ctx.session().await?;
    let patient = open_patient(ctx, &session, patient_id).await?;
    let attempt = validated(draft.validate(submitter(&session, &patient)))?;
    ctx.client.record_contact_attempt(&attempt).await?;
    println!(
        "Recorded {} minute contact attempt ({}) for {}",
        attempt.minutes,
        attempt.interaction_mode.label(),
        patient.display_name()
    );
    Ok(())
}

async fn intake(ctx: &mut AppContext, patient_id: i64, draft: IntakeDraft) -> Result<()> {
    let session = ctx.session().await?;
    let (patient, actions) = gated_patient(ctx, &session, patient_id).await?;
    if !actions.intake {
        return Err(eyre!(
            "intake is not available for {} ({})",
            patient.display_name(),
            patient.status.label()
        ));
    }
    let submission = validated(draft.validate(submitter(&session, &patient)))?;
    let next = ctx.client.record_intake(&submission, session.user.role).await?;
    println!("Recorded intake for {}", patient.display_name());
    print_next_actions(&next);
    Ok(())
}

async fn consult(ctx: &mut AppContext, patient_id: i64, draft: PsychConsultDraft) -> Result<()> {
    let session = ctx.session().await?;
    if session.user.role != Role::PsychiatricConsultant {
        return Err(eyre!("only psychiatric consultants record consultations"));
    }
    let patient = open_patient(ctx, &session, patient_id).await?;
    let consult = validated(draft.validate(submitter(&session, &patient)))?;
    ctx.client.submit_psych_consult(&consult).await?;
    println!("Recorded consultation for {}", patient.display_name());
    Ok(())
}

async fn reminders(ctx: &mut AppContext, command: RemindersCommand) -> Result<()> {
    let session = ctx.session().await?;
    let (reminder_id, action, patient) = match command {
        RemindersCommand::List { status, patient } => {
            let list = match patient {
                Some(id) => {
                    open_patient(ctx, &session, id).await?;
                    ctx.client.patient_reminders(id).await?
                }
                None => {
                    session.require_route("/dashboard")?;
                    ctx.client.care_manager_reminders(session.user.id).await?
                }
            };
            let today = AppContext::today();
            let visible = reminders::filter(&list, status, today);
            println!("{}", render::reminders(&visible, reminders::counts(&list, today)));
            return Ok(());
        }
        RemindersCommand::Complete { reminder_id, patient } => (reminder_id, ReminderAction::Complete, patient),
        RemindersCommand::Dismiss { reminder_id, patient } => (reminder_id, ReminderAction::Dismiss, patient),
    };
    let body = ReminderActionBody {
        user_id: Some(session.user.id),
        patient_id: patient,
    };
    ctx.client.act_on_reminder(reminder_id, action, &body).await?;
    println!("Reminder {reminder_id}: {}", action.as_str());

    let list = match patient {
        Some(id) => ctx.client.patient_reminders(id).await?,
        None => ctx.client.care_manager_reminders(session.user.id).await?,
    };
    let counts = reminders::counts(&list, AppContext::today());
    println!(
        "{} overdue, {} today, {} upcoming",
        counts.overdue, counts.today, counts.upcoming
    );
    Ok(())
}

async fn documents(ctx: &mut AppContext, command: DocumentsCommand) -> Result<()> {
    let session = ctx.session().await?;
    match command {
        DocumentsCommand::List { patient_id, search } => {
            open_patient(ctx, &session, patient_id).await?;
            let folders = ctx.client.documents(patient_id).await?;
            let folders: Vec<_> = match search.as_deref() {
                Some(q) => documents::search(&folders, q).into_iter().cloned().collect(),
                None => folders,
            };
            print!("{}", render::document_groups(&documents::group(&folders)));
        }
        DocumentsCommand::Export {
            patient_id,
            date,
            kind,
            out,
        } => {
            open_patient(ctx, &session, patient_id).await?;
            let folders = ctx.client.documents(patient_id).await?;
            let pdf = ctx.client.export_document(&folders, patient_id, date, kind).await?;
            std::fs::create_dir_all(&out)?;
            let path = out.join(&pdf.filename);
            std::fs::write(&path, &pdf.bytes)?;
            println!("Saved {}", path.display());
        }
    }
    Ok(())
}

async fn enroll(ctx: &mut AppContext, args: EnrollArgs) -> Result<()> {
    let session = ctx.session().await?;
    session.require_route("/enrolled-patients")?;
    let clinic = session.clinic()?;
    let draft = EnrollmentDraft {
        mrn: args.mrn,
        care_manager_id: args.care_manager,
        psychiatric_consultant_id: args.consultant,
        primary_care_physician_id: args.pcp,
        first_name: args.first_name,
        last_name: args.last_name,
        enrollment_date: args.enrollment_date,
        dob: args.dob,
    };
    let patient = validated(draft.validate(clinic.id))?;
    ctx.client.enroll_patient(&patient).await?;
    println!(
        "Enrolled {}, {} (MRN {}) in {}",
        patient.last_name, patient.first_name, patient.mrn, clinic.name
    );
    Ok(())
}

async fn staff(ctx: &mut AppContext, kind: StaffArg) -> Result<()> {
    let session = ctx.session().await?;
    let clinic_id = session.clinic()?.id;
    let kind = match kind {
        StaffArg::CareManagers => StaffKind::CareManagers,
        StaffArg::Consultants => StaffKind::Consultants,
        StaffArg::Pcps => StaffKind::PrimaryCarePhysicians,
    };
    let members = ctx.client.staff(kind, clinic_id).await?;
    let rows: Vec<Vec<String>> = members
        .iter()
        .map(|m| vec![m.id.to_string(), m.name.clone()])
        .collect();
    print!("{}", render::table(&["ID", "Name"], &rows));
    Ok(())
}

async fn summary(ctx: &mut AppContext) -> Result<()> {
    let session = ctx.session().await?;
    let clinic = session.clinic()?;
    let text = match session.user.role {
        Role::PsychiatricConsultant => {
            let data = ctx.client.psych_dashboard(session.user.id, clinic.id).await?;
            render::psych_summary(&clinic.name, &data)
        }
        Role::Admin | Role::CareManager => {
            let data = ctx.client.clinic_data(clinic.id).await?;
            let mut text = render::clinic_summary(&clinic.name, &data);
            if session.user.role == Role::CareManager {
                let list = ctx.client.care_manager_reminders(session.user.id).await?;
                let counts = reminders::counts(&list, AppContext::today());
                text.push_str(&format!(
                    "\n  Reminders:           {} overdue, {} today, {} upcoming",
                    counts.overdue, counts.today, counts.upcoming
                ));
            }
            text
        }
    };
    println!("{text}");
    Ok(())
}

fn user_draft(args: UserArgs) -> UserDraft {
    UserDraft {
        name: args.name,
        email: args.email,
        phone_number: args.phone,
        password: args.password,
        role: args.role,
        clinic_ids: args.clinics,
    }
}

fn clinic_input(args: ClinicArgs) -> ClinicInput {
    ClinicInput {
        name: args.name,
        address: args.address,
        phone_number: args.phone,
        email: args.email,
        organization_id: args.organization,
    }
}

async fn admin(ctx: &mut AppContext, command: AdminCommand) -> Result<()> {
    let session = ctx.session().await?;
    session.require_route("/admin")?;
    match command {
        AdminCommand::Users => {
            let rows: Vec<Vec<String>> = ctx
                .client
                .users()
                .await?
                .into_iter()
                .map(|u| {
                    vec![
                        u.id.to_string(),
                        u.name,
                        u.email,
                        u.role,
                        render::opt(u.clinic_names),
                    ]
                })
                .collect();
            print!("{}", render::table(&["ID", "Name", "Email", "Role", "Clinics"], &rows));
        }
        AdminCommand::Roles => {
            for role in ctx.client.roles().await? {
                println!("{}  {}", role.id, role.name);
            }
        }
        AdminCommand::Clinics => {
            let rows: Vec<Vec<String>> = ctx
                .client
                .clinics()
                .await?
                .into_iter()
                .map(|c| {
                    vec![
                        c.id.to_string(),
                        c.name,
                        render::opt(c.address),
                        render::opt(c.phone_number),
                        render::opt(c.email),
                    ]
                })
                .collect();
            print!("{}", render::table(&["ID", "Name", "Address", "Phone", "Email"], &rows));
        }
        AdminCommand::AddUser(args) => {
            let user = validated(user_draft(args).validate(true))?;
            ctx.client.create_user(&user).await?;
            println!("Created user {} ({})", user.name, user.role);
        }
        AdminCommand::UpdateUser { user_id, user } => {
            let user = validated(user_draft(user).validate(false))?;
            ctx.client.update_user(user_id, &user).await?;
            println!("Updated user {user_id}");
        }
        AdminCommand::DeleteUser { user_id } => {
            ctx.client.delete_user(user_id).await?;
            println!("Deleted user {user_id}");
        }
        AdminCommand::AddClinic(args) => {
            let clinic = clinic_input(args);
            ctx.client.create_clinic(&clinic).await?;
            println!("Created clinic {}", clinic.name);
        }
        AdminCommand::UpdateClinic { clinic_id, clinic } => {
            ctx.client.update_clinic(clinic_id, &clinic_input(clinic)).await?;
            println!("Updated clinic {clinic_id}");
        }
        AdminCommand::DeleteClinic { clinic_id } => {
            ctx.client.delete_clinic(clinic_id).await?;
            println!("Deleted clinic {clinic_id}");
        }
    }
    Ok(())
}
