//! Grouping, search, and export rules for a patient's generated PDFs.

use jiff::civil::Date;
use serde::Serialize;
use uphcs_core::api_paths;
use uphcs_core::models::document::{DocumentFolder, DocumentKind, DocumentListing};

use crate::error::WorkflowError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DocumentCategory {
    SafetyPlans,
    Assessments,
    ContactAttempts,
}

impl DocumentCategory {
    pub const ALL: [DocumentCategory; 3] = [
        DocumentCategory::SafetyPlans,
        DocumentCategory::Assessments,
        DocumentCategory::ContactAttempts,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DocumentCategory::SafetyPlans => "Safety Plans",
            DocumentCategory::Assessments => "Assessments",
            DocumentCategory::ContactAttempts => "Contact Attempts",
        }
    }

    /// Substring of the folder name that places a folder in this category.
    fn marker(&self) -> &'static str {
        match self {
            DocumentCategory::SafetyPlans => "Safety_Plan",
            DocumentCategory::Assessments => "Assessment",
            DocumentCategory::ContactAttempts => "Contact_Attempt",
        }
    }

    pub fn contains(&self, folder: &DocumentFolder) -> bool {
        folder.folder_name.contains(self.marker())
    }
}

/// Folders newest first. Dates are already normalized to calendar days
/// by deserialization.
pub fn normalize(listing: DocumentListing) -> Vec<DocumentFolder> {
    let mut folders = listing.folders;
    folders.sort_by(|a, b| b.date.cmp(&a.date));
    folders
}

/// Folders per category, in category order. A folder whose name matches
/// several markers appears under each.
pub fn group(folders: &[DocumentFolder]) -> Vec<(DocumentCategory, Vec<&DocumentFolder>)> {
    DocumentCategory::ALL
        .into_iter()
        .map(|cat| (cat, folders.iter().filter(|f| cat.contains(f)).collect()))
        .collect()
}

/// Folders whose name, or any file name, contains `query` case-insensitively.
pub fn search<'a>(folders: &'a [DocumentFolder], query: &str) -> Vec<&'a DocumentFolder> {
    let needle = query.trim().to_lowercase();
    folders
        .iter()
        .filter(|folder| {
            needle.is_empty()
                || folder.folder_name.to_lowercase().contains(&needle)
                || folder
                    .files
                    .iter()
                    .any(|file| file.name.to_lowercase().contains(&needle))
        })
        .collect()
}

/// Export path for a document, refused when no folder exists for `date`.
pub fn export_path(
    folders: &[DocumentFolder],
    patient_id: i64,
    date: Date,
    kind: DocumentKind,
) -> Result<String, WorkflowError> {
    if !folders.iter().any(|f| f.date == date) {
        return Err(WorkflowError::NoDocumentFolder(date));
    }
    Ok(api_paths::document_export(patient_id, date, kind))
}

/// Download filename from a `Content-Disposition` header, falling back to
/// `{type}_{date}.pdf`.
pub fn download_filename(content_disposition: Option<&str>, kind: DocumentKind, date: Date) -> String {
    content_disposition
        .and_then(quoted_filename)
        .unwrap_or_else(|| format!("{}_{date}.pdf", kind.as_str()))
}

fn quoted_filename(header: &str) -> Option<String> {
    let start = header.find("filename=\"")? + "filename=\"".len();
    let rest = &header[start..];
    // Everything up to the last quote.
    let end = rest.rfind('"')?;
    let name = &rest[..end];
    (!name.is_empty()).then(|| name.to_string())
}
