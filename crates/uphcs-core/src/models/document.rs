use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Kind of generated PDF artifact.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    #[serde(rename = "PHQ-9")]
    Phq9,
    #[serde(rename = "GAD-7")]
    Gad7,
    #[serde(rename = "Contact_Attempt")]
    ContactAttempt,
    #[serde(rename = "Safety_Plan")]
    SafetyPlan,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 4] = [
        DocumentKind::Phq9,
        DocumentKind::Gad7,
        DocumentKind::ContactAttempt,
        DocumentKind::SafetyPlan,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentKind::Phq9 => "PHQ-9",
            DocumentKind::Gad7 => "GAD-7",
            DocumentKind::ContactAttempt => "Contact_Attempt",
            DocumentKind::SafetyPlan => "Safety_Plan",
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DocumentKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|k| k.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| CoreError::UnknownDocumentKind(s.to_string()))
    }
}

/// A file entry inside a document folder.
///
/// Safety-plan files carry the intake payload (symptoms, substance use, ...);
/// those fields are kept verbatim in `details`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFile {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: DocumentKind,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub answers: Vec<u8>,
    #[serde(default)]
    pub notes: Option<String>,
    #[serde(default, with = "crate::dates::lenient_opt")]
    pub attempt_date: Option<Date>,
    #[serde(default)]
    pub minutes: Option<u32>,
    #[serde(flatten)]
    pub details: BTreeMap<String, serde_json::Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFolder {
    pub folder_name: String,
    #[serde(with = "crate::dates::lenient")]
    pub date: Date,
    #[serde(default)]
    pub files: Vec<DocumentFile>,
}

/// Response of `GET /api/patients/:id/documents`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentListing {
    #[serde(default)]
    pub folders: Vec<DocumentFolder>,
}
