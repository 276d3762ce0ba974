use uphcs_core::models::patient::Patient;
use uphcs_core::models::user::{Role, User};

use crate::error::SessionError;

/// Whether `user` may open this patient's dashboard.
///
/// Admins always may. Consultants and care managers must be assigned to the
/// patient in that capacity.
pub fn check_dashboard_access(user: &User, patient: &Patient) -> Result<(), SessionError> {
    match user.role {
        Role::Admin => Ok(()),
        Role::PsychiatricConsultant if patient.assignment(user.role, user.id).is_some() => Ok(()),
        Role::PsychiatricConsultant => Err(SessionError::AccessDenied(
            "You are not assigned as the Psychiatric Consultant for this patient.".to_string(),
        )),
        Role::CareManager if patient.assignment(user.role, user.id).is_some() => Ok(()),
        Role::CareManager => Err(SessionError::AccessDenied(
            "You are not assigned as the Behavioral Health Care Manager (BHCM) for this patient."
                .to_string(),
        )),
    }
}
