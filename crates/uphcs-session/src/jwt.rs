use jiff::Timestamp;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::error::SessionError;

/// Claims the backend puts in its session token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionClaims {
    /// User id, used to fetch `/api/users/:id`.
    pub id: i64,
    #[serde(default)]
    pub exp: Option<i64>,
}

impl SessionClaims {
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        self.exp.is_some_and(|exp| exp <= now.as_second())
    }
}

/// Read the claims without checking the signature.
///
/// The backend verifies every request; the client only needs the user id
/// and expiry.
pub fn decode_unverified(token: &str) -> Result<SessionClaims, SessionError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<SessionClaims>(token.trim(), &DecodingKey::from_secret(&[]), &validation)?;
    Ok(data.claims)
}

/// Decode and reject a token that has already expired at `now`.
pub fn check_token(token: &str, now: Timestamp) -> Result<SessionClaims, SessionError> {
    if token.trim().is_empty() {
        return Err(SessionError::NotLoggedIn);
    }
    let claims = decode_unverified(token)?;
    if claims.is_expired_at(now) {
        tracing::info!(user_id = claims.id, "session token expired");
        return Err(SessionError::TokenExpired);
    }
    Ok(claims)
}
