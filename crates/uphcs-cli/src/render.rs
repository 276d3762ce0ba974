//! Plain-text rendering for terminal output.

use std::fmt::{Display, Write};

use jiff::civil::Date;
use uphcs_client::dashboard::{PatientDashboard, Section};
use uphcs_core::models::assessment::{LastUpdate, Measure};
use uphcs_core::models::contact_attempt::{ContactAttempt, total_minutes};
use uphcs_core::models::document::DocumentFolder;
use uphcs_core::models::patient::{ActivePatient, ConsultPatient, PatientRow};
use uphcs_core::models::reminder::Reminder;
use uphcs_core::models::summary::{ClinicData, PsychData};
use uphcs_instruments::describe;
use uphcs_workflow::documents::DocumentCategory;
use uphcs_workflow::forms::FieldError;
use uphcs_workflow::gating::StepState;
use uphcs_workflow::listing::Page;
use uphcs_workflow::reminders::{ReminderCounts, ReminderStatus};

/// Cell text for an optional value.
pub fn opt<T: Display>(value: Option<T>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}

/// Left-aligned columns separated by two spaces.
pub fn table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if let Some(w) = widths.get_mut(i) {
                *w = (*w).max(cell.chars().count());
            }
        }
    }

    let mut out = String::new();
    let header: Vec<String> = headers.iter().map(|h| h.to_string()).collect();
    push_row(&mut out, &header, &widths);
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    push_row(&mut out, &rule, &widths);
    for row in rows {
        push_row(&mut out, row, &widths);
    }
    out
}

fn push_row(out: &mut String, cells: &[String], widths: &[usize]) {
    let line = cells
        .iter()
        .zip(widths)
        .map(|(cell, &w)| format!("{cell:<w$}"))
        .collect::<Vec<_>>()
        .join("  ");
    out.push_str(line.trim_end());
    out.push('\n');
}

/// `Page 2 of 3 (27 total)`, with the page shown one-based.
pub fn page_footer<R>(page: &Page<'_, R>) -> String {
    format!(
        "Page {} of {} ({} total)",
        page.page + 1,
        page.page_count.max(1),
        page.total
    )
}

pub fn active_patients(page: &Page<'_, ActivePatient>) -> String {
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.mrn.clone(),
                format!("{}, {}", p.last_name, p.first_name),
                p.status.label().to_string(),
                format!("{} → {}", opt(p.phq9_first), opt(p.phq9_last)),
                format!("{} → {}", opt(p.gad7_first), opt(p.gad7_last)),
                opt(p.initial_assessment_date),
                opt(p.last_follow_up_date),
                opt(p.last_psychiatric_consult_date),
                opt(p.last_relapse_plan_date),
                opt(p.total_contacts),
                opt(p.weeks_since_initial_assessment),
                opt(p.minutes_this_month),
            ]
        })
        .collect();
    let headers = [
        "ID", "MRN", "Name", "Status", "PHQ-9", "GAD-7", "Initial", "Follow-up", "Psych", "Relapse",
        "Contacts", "Weeks", "Minutes",
    ];
    format!("{}{}", table(&headers, &rows), page_footer(page))
}

pub fn patient_rows(page: &Page<'_, PatientRow>) -> String {
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.mrn.clone(),
                format!("{}, {}", p.last_name, p.first_name),
                p.status.label().to_string(),
                opt(p.dob),
                opt(p.enrollment_date),
                format!("{} → {}", opt(p.phq9_first), opt(p.phq9_last)),
                format!("{} → {}", opt(p.gad7_first), opt(p.gad7_last)),
                opt(p.deactivation_date),
                opt(p.deactivation_reason.as_deref()),
            ]
        })
        .collect();
    let headers = [
        "ID", "MRN", "Name", "Status", "DOB", "Enrolled", "PHQ-9", "GAD-7", "Deactivated", "Reason",
    ];
    format!("{}{}", table(&headers, &rows), page_footer(page))
}

pub fn consult_patients(page: &Page<'_, ConsultPatient>) -> String {
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|p| {
            vec![
                p.id.to_string(),
                p.mrn.clone(),
                format!("{}, {}", p.last_name, p.first_name),
                p.status.label().to_string(),
                opt(p.dob),
                opt(p.referral_date),
                describe(Measure::Phq9, p.phq9_score),
                describe(Measure::Gad7, p.gad7_score),
                opt(p.care_manager_name.as_deref()),
                opt(p.referral_reason.as_deref()),
            ]
        })
        .collect();
    let headers = [
        "ID", "MRN", "Name", "Status", "DOB", "Referred", "PHQ-9", "GAD-7", "Care Manager", "Reason",
    ];
    format!("{}{}", table(&headers, &rows), page_footer(page))
}

pub fn contact_attempts(page: &Page<'_, ContactAttempt>) -> String {
    let rows: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|a| {
            vec![
                a.attempt_date.to_string(),
                match &a.user_role {
                    Some(role) => format!("{} ({role})", a.attempted_by),
                    None => a.attempted_by.clone(),
                },
                a.minutes.to_string(),
                opt(a.notes.as_deref()),
            ]
        })
        .collect();
    format!(
        "{}{}",
        table(&["Date", "Attempted By", "Minutes", "Notes"], &rows),
        page_footer(page)
    )
}

pub fn reminders(visible: &[(&Reminder, ReminderStatus)], counts: ReminderCounts) -> String {
    let rows: Vec<Vec<String>> = visible
        .iter()
        .map(|(r, status)| {
            vec![
                r.id.to_string(),
                status.label().to_string(),
                r.reminder_date.to_string(),
                format!("{}, {}", r.last_name, r.first_name),
                r.mrn.clone(),
                r.reminder_type.clone(),
                r.description.clone(),
            ]
        })
        .collect();
    format!(
        "{}{} overdue, {} today, {} upcoming",
        table(&["ID", "Status", "Due", "Patient", "MRN", "Type", "Description"], &rows),
        counts.overdue,
        counts.today,
        counts.upcoming
    )
}

pub fn document_groups(groups: &[(DocumentCategory, Vec<&DocumentFolder>)]) -> String {
    let mut out = String::new();
    for (category, folders) in groups {
        let _ = writeln!(out, "{} ({})", category.label(), folders.len());
        for folder in folders {
            let _ = writeln!(out, "  {}  {}", folder.date, folder.folder_name);
            for file in &folder.files {
                let detail = match (file.score, file.minutes) {
                    (Some(score), _) => format!(" score {score}"),
                    (None, Some(minutes)) => format!(" {minutes} min"),
                    _ => String::new(),
                };
                let _ = writeln!(out, "    - {} [{}]{detail}", file.name, file.kind);
            }
        }
    }
    if out.is_empty() {
        out.push_str("No documents\n");
    }
    out
}

/// Failed validation, one field per line.
pub fn field_errors(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("  {}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn clinic_summary(clinic: &str, data: &ClinicData) -> String {
    format!(
        "{clinic}\n  Total patients:      {}\n  Active patients:     {}\n  New patients:        {}\n  Minutes tracked:     {}\n  Avg minutes/patient: {:.1}",
        data.total_patients,
        data.active_patients,
        data.new_patients,
        data.total_minutes_tracked,
        data.average_minutes_per_patient
    )
}

pub fn psych_summary(clinic: &str, data: &PsychData) -> String {
    format!(
        "{clinic}\n  Assigned patients:   {}\n  Upcoming referrals:  {}\n  Minutes tracked:     {}\n  Avg minutes/patient: {:.1}",
        data.assigned_patients,
        data.upcoming_referrals,
        data.total_minutes_tracked,
        data.average_minutes_per_patient
    )
}

fn section_text<T>(section: &Section<T>, ok: impl FnOnce(&T) -> String) -> String {
    match section {
        Ok(value) => ok(value),
        Err(e) => e.to_string(),
    }
}

fn last_update(section: &Section<Option<LastUpdate>>) -> String {
    section_text(section, |u| LastUpdate::describe(u.as_ref()))
}

/// The patient dashboard: header, progress, scores, and every section,
/// with failed sections shown inline.
pub fn dashboard(dash: &PatientDashboard, today: Date) -> String {
    let p = &dash.patient;
    let mut out = String::new();
    let _ = writeln!(out, "{} (MRN {})", p.display_name(), p.mrn);
    let _ = writeln!(
        out,
        "  Status: {}   DOB: {} (age {})   Enrolled: {}",
        p.status.label(),
        p.dob,
        p.age_on(today),
        p.enrollment_date
    );
    let _ = writeln!(out, "  Clinic: {}", opt(p.clinic_name.as_deref()));
    for provider in &p.providers {
        let _ = writeln!(out, "  {}: {}", provider.provider_type, provider.name);
    }
    let flags = section_text(&dash.flags, |f| {
        let names = f.names();
        if names.is_empty() { "none".to_string() } else { names.join(", ") }
    });
    let _ = writeln!(out, "  Flags: {flags}");

    if dash.intake_warning {
        let _ = writeln!(out, "\n! Intake has not been completed for this patient.");
    }

    if let Some(steps) = &dash.progress {
        let line = steps
            .iter()
            .map(|s| {
                let mark = match s.state {
                    StepState::Done => "x",
                    StepState::Current => ">",
                    StepState::Pending => " ",
                };
                format!("[{mark}] {}", s.label)
            })
            .collect::<Vec<_>>()
            .join("  ");
        let _ = writeln!(out, "\nProgress: {line}");
    }

    let _ = writeln!(out, "\nScores");
    let _ = writeln!(
        out,
        "  PHQ-9 first {}  last {}  (last updated: {})",
        describe(Measure::Phq9, p.phq9_first),
        describe(Measure::Phq9, p.phq9_last),
        last_update(&dash.phq9_update)
    );
    let _ = writeln!(
        out,
        "  GAD-7 first {}  last {}  (last updated: {})",
        describe(Measure::Gad7, p.gad7_first),
        describe(Measure::Gad7, p.gad7_last),
        last_update(&dash.gad7_update)
    );
    for (measure, history) in [(Measure::Phq9, &dash.phq9_history), (Measure::Gad7, &dash.gad7_history)] {
        let trend = section_text(history, |points| {
            if points.is_empty() {
                "no history".to_string()
            } else {
                points
                    .iter()
                    .map(|pt| format!("{} {}", pt.date, pt.score))
                    .collect::<Vec<_>>()
                    .join(", ")
            }
        });
        let _ = writeln!(out, "  {measure} trend: {trend}");
    }

    let last_contact = section_text(&dash.last_contact, |c| match c {
        Some(c) => format!("{} {} by {} at {}", c.contact_date, c.contact_type, c.contact_person, c.clinic_name),
        None => "none".to_string(),
    });
    let _ = writeln!(out, "\nLast contact: {last_contact}");

    let intake = section_text(&dash.latest_intake, |i| match i {
        Some(form) => {
            let symptoms = form.checked_symptoms();
            let symptoms = if symptoms.is_empty() { "none".to_string() } else { symptoms.join(", ") };
            format!("{} ({} min), symptoms: {symptoms}", form.contact_date, form.minutes)
        }
        None => "not recorded".to_string(),
    });
    let _ = writeln!(out, "Latest intake: {intake}");

    let _ = writeln!(out, "\nTreatment history");
    let history = section_text(&dash.treatment_history, |entries| {
        if entries.is_empty() {
            return "  none\n".to_string();
        }
        let rows: Vec<Vec<String>> = entries
            .iter()
            .map(|e| {
                vec![
                    e.assessment_date.to_string(),
                    e.assessment_type.clone(),
                    e.assessment_by.clone(),
                    opt(e.phq9_score),
                    opt(e.gad7_score),
                    opt(e.duration_minutes),
                ]
            })
            .collect();
        table(&["Date", "Type", "By", "PHQ-9", "GAD-7", "Minutes"], &rows)
    });
    out.push_str(&history);
    if !history.ends_with('\n') {
        out.push('\n');
    }

    let contacts = section_text(&dash.contact_attempts, |attempts| {
        format!("{} attempts, {} minutes", attempts.len(), total_minutes(attempts))
    });
    let _ = writeln!(out, "\nContact attempts: {contacts}");

    let a = &dash.actions;
    let offered: Vec<&str> = [
        (a.intake, "intake"),
        (a.initial_assessment, "assess initial"),
        (a.follow_up_assessment, "assess follow-up"),
        (a.contact_attempt, "contact"),
        (a.documents, "documents"),
    ]
    .into_iter()
    .filter(|(on, _)| *on)
    .map(|(_, name)| name)
    .collect();
    let _ = write!(out, "\nActions: {}", offered.join(", "));
    out
}
