use jiff::civil::Date;
use thiserror::Error;

use crate::forms::FieldError;

#[derive(Debug, Error)]
pub enum WorkflowError {
    #[error("invalid form: {}", summarize(.0))]
    InvalidForm(Vec<FieldError>),

    #[error("Invalid date for the selected document: no folder exists for {0}")]
    NoDocumentFolder(Date),

    #[error("unknown column: {0}")]
    UnknownColumn(String),

    #[error("unknown reminder filter: {0}")]
    UnknownReminderTab(String),
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
