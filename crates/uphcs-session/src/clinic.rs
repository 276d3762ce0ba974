//! The clinic the user is currently operating against.

use uphcs_core::models::clinic::Clinic;
use uphcs_core::models::user::User;

use crate::error::SessionError;

/// Clinic selection for a signed-in user.
///
/// Persisting the selection is the caller's job; this only enforces that the
/// selection is one of the user's clinics.
#[derive(Debug, Clone)]
pub struct ClinicContext {
    clinics: Vec<Clinic>,
    selected: Option<Clinic>,
}

impl ClinicContext {
    /// Start from a stored selection when it is still one of the user's
    /// clinics, otherwise from the user's first clinic.
    pub fn initialize(user: &User, stored: Option<&Clinic>) -> Self {
        let selected = stored
            .and_then(|s| user.clinics.iter().find(|c| c.id == s.id))
            .or_else(|| user.clinics.first())
            .cloned();
        if let (Some(stored), Some(current)) = (stored, &selected)
            && stored.id != current.id
        {
            tracing::info!(stored = stored.id, selected = current.id, "stored clinic no longer available");
        }
        Self {
            clinics: user.clinics.clone(),
            selected,
        }
    }

    pub fn clinics(&self) -> &[Clinic] {
        &self.clinics
    }

    pub fn selected(&self) -> Option<&Clinic> {
        self.selected.as_ref()
    }

    pub fn require_selected(&self) -> Result<&Clinic, SessionError> {
        self.selected.as_ref().ok_or(SessionError::NoClinics)
    }

    pub fn select(&mut self, clinic_id: i64) -> Result<&Clinic, SessionError> {
        let clinic = self
            .clinics
            .iter()
            .find(|c| c.id == clinic_id)
            .cloned()
            .ok_or(SessionError::NotAClinicMember(clinic_id))?;
        tracing::info!(clinic_id, name = %clinic.name, "clinic selected");
        Ok(self.selected.insert(clinic))
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}
