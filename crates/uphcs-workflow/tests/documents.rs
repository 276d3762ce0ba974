use std::collections::BTreeMap;

use jiff::civil::{Date, date};
use uphcs_core::models::document::{DocumentFile, DocumentFolder, DocumentKind, DocumentListing};
use uphcs_workflow::documents::{DocumentCategory, download_filename, export_path, group, normalize, search};
use uphcs_workflow::error::WorkflowError;

fn file(name: &str, kind: DocumentKind) -> DocumentFile {
    DocumentFile {
        name: name.to_string(),
        kind,
        score: None,
        answers: Vec::new(),
        notes: None,
        attempt_date: None,
        minutes: None,
        details: BTreeMap::new(),
    }
}

fn folder(name: &str, date: Date, files: Vec<DocumentFile>) -> DocumentFolder {
    DocumentFolder {
        folder_name: name.to_string(),
        date,
        files,
    }
}

fn sample() -> Vec<DocumentFolder> {
    normalize(DocumentListing {
        folders: vec![
            folder("Initial_Assessment_2024-01-15", date(2024, 1, 15), vec![
                file("PHQ-9 Assessment", DocumentKind::Phq9),
                file("GAD-7 Assessment", DocumentKind::Gad7),
            ]),
            folder("Safety_Plan_2024-03-02", date(2024, 3, 2), vec![file("Safety Plan", DocumentKind::SafetyPlan)]),
            folder("Contact_Attempt_2024-02-20", date(2024, 2, 20), vec![file(
                "Contact Attempt",
                DocumentKind::ContactAttempt,
            )]),
        ],
    })
}

#[test]
fn folders_sort_newest_first() {
    let dates: Vec<Date> = sample().iter().map(|f| f.date).collect();
    assert_eq!(dates, vec![date(2024, 3, 2), date(2024, 2, 20), date(2024, 1, 15)]);
}

#[test]
fn folders_group_by_name_marker() {
    let folders = sample();
    let groups = group(&folders);
    let labels: Vec<(&str, usize)> = groups.iter().map(|(c, f)| (c.label(), f.len())).collect();
    assert_eq!(labels, vec![("Safety Plans", 1), ("Assessments", 1), ("Contact Attempts", 1)]);
    assert!(DocumentCategory::Assessments.contains(&folders[2]));
}

#[test]
fn search_matches_folder_or_file_names() {
    let folders = sample();
    let names: Vec<&str> = search(&folders, "gad").iter().map(|f| f.folder_name.as_str()).collect();
    assert_eq!(names, vec!["Initial_Assessment_2024-01-15"]);
    assert_eq!(search(&folders, "SAFETY").len(), 1);
    assert_eq!(search(&folders, "").len(), 3);
    assert!(search(&folders, "billing").is_empty());
}

#[test]
fn export_requires_a_folder_for_the_date() {
    let folders = sample();
    let path = export_path(&folders, 42, date(2024, 3, 2), DocumentKind::SafetyPlan).unwrap();
    assert_eq!(path, "/api/patients/42/safety-plans/2024-03-02/export");

    let err = export_path(&folders, 42, date(2024, 3, 3), DocumentKind::SafetyPlan).unwrap_err();
    assert!(matches!(err, WorkflowError::NoDocumentFolder(d) if d == date(2024, 3, 3)));
}

#[test]
fn filename_from_content_disposition() {
    let day = date(2024, 1, 15);
    assert_eq!(
        download_filename(Some("attachment; filename=\"PHQ-9_Reyes_2024-01-15.pdf\""), DocumentKind::Phq9, day),
        "PHQ-9_Reyes_2024-01-15.pdf"
    );
    assert_eq!(download_filename(Some("attachment"), DocumentKind::Phq9, day), "PHQ-9_2024-01-15.pdf");
    assert_eq!(download_filename(None, DocumentKind::ContactAttempt, day), "Contact_Attempt_2024-01-15.pdf");
    assert_eq!(
        download_filename(Some("attachment; filename=\"\""), DocumentKind::Gad7, day),
        "GAD-7_2024-01-15.pdf"
    );
}
