use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown patient status code: {0}")]
    UnknownStatus(String),

    #[error("unknown role: {0}")]
    UnknownRole(String),

    #[error("unknown measure: {0}")]
    UnknownMeasure(String),

    #[error("unknown document type: {0}")]
    UnknownDocumentKind(String),

    #[error("unrecognized date: {0}")]
    InvalidDate(String),
}
