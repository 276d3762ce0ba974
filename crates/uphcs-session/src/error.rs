use thiserror::Error;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("not logged in")]
    NotLoggedIn,

    #[error("session token expired")]
    TokenExpired,

    #[error("JWT error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("user is not a member of clinic {0}")]
    NotAClinicMember(i64),

    #[error("user has no clinics")]
    NoClinics,

    #[error("Access Denied: {0}")]
    AccessDenied(String),
}
