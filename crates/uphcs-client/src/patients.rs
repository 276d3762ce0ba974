use uphcs_core::api_paths;
use uphcs_core::models::assessment::{LastUpdate, Measure, ScoreHistoryPoint, TreatmentHistoryEntry};
use uphcs_core::models::contact_attempt::LastContact;
use uphcs_core::models::patient::{
    ActivePatient, NewPatient, Patient, PatientFlags, PatientRow, StaffMember,
};

use crate::client::ApiClient;
use crate::error::ClientError;

/// Which staff list to fetch for the enrollment form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StaffKind {
    CareManagers,
    Consultants,
    PrimaryCarePhysicians,
}

impl ApiClient {
    pub async fn active_patients(&self, clinic_id: i64) -> Result<Vec<ActivePatient>, ClientError> {
        self.get_json(&api_paths::active_patients(clinic_id)).await
    }

    pub async fn inactive_patients(&self, clinic_id: i64) -> Result<Vec<PatientRow>, ClientError> {
        self.get_json(&api_paths::inactive_patients(clinic_id)).await
    }

    pub async fn enrolled_patients(&self, clinic_id: i64) -> Result<Vec<PatientRow>, ClientError> {
        self.get_json(&api_paths::enrolled_patients(clinic_id)).await
    }

    pub async fn patient(&self, patient_id: i64) -> Result<Patient, ClientError> {
        self.get_json(&api_paths::patient(patient_id)).await
    }

    pub async fn patient_flags(&self, patient_id: i64) -> Result<PatientFlags, ClientError> {
        self.get_json(&api_paths::patient_flags(patient_id)).await
    }

    pub async fn treatment_history(&self, patient_id: i64) -> Result<Vec<TreatmentHistoryEntry>, ClientError> {
        self.get_json(&api_paths::treatment_history(patient_id)).await
    }

    pub async fn last_contact(&self, patient_id: i64) -> Result<Option<LastContact>, ClientError> {
        self.get_optional(&api_paths::last_contact(patient_id)).await
    }

    pub async fn last_update(&self, patient_id: i64, measure: Measure) -> Result<Option<LastUpdate>, ClientError> {
        self.get_optional(&api_paths::last_update(patient_id, measure)).await
    }

    pub async fn assessment_history(
        &self,
        patient_id: i64,
        measure: Measure,
    ) -> Result<Vec<ScoreHistoryPoint>, ClientError> {
        self.get_json(&api_paths::assessment_history(patient_id, measure)).await
    }

    pub async fn enroll_patient(&self, patient: &NewPatient) -> Result<(), ClientError> {
        self.post(api_paths::PATIENTS, patient).await?;
        tracing::info!(mrn = %patient.mrn, clinic_id = patient.clinic_id, "patient enrolled");
        Ok(())
    }

    pub async fn staff(&self, kind: StaffKind, clinic_id: i64) -> Result<Vec<StaffMember>, ClientError> {
        let path = match kind {
            StaffKind::CareManagers => api_paths::care_managers(clinic_id),
            StaffKind::Consultants => api_paths::consultants(clinic_id),
            StaffKind::PrimaryCarePhysicians => api_paths::primary_care_physicians(clinic_id),
        };
        self.get_json(&path).await
    }
}
