use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request to {path} failed ({status}): {message}")]
    Fetch {
        path: String,
        status: u16,
        message: String,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),

    #[error("not logged in")]
    NotLoggedIn,

    #[error(transparent)]
    Workflow(#[from] uphcs_workflow::error::WorkflowError),
}

impl ClientError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Fetch { status, .. } => Some(*status),
            ClientError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    pub fn is_not_found(&self) -> bool {
        self.status() == Some(404)
    }
}
