use uphcs_core::api_paths;
use uphcs_core::models::consult::{CareManagerNote, NewPsychConsult, PsychConsultation};
use uphcs_core::models::patient::ConsultPatient;
use uphcs_core::models::summary::PsychData;

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn submit_psych_consult(&self, consult: &NewPsychConsult) -> Result<(), ClientError> {
        self.post(api_paths::PSYCH_CONSULT, consult).await?;
        tracing::info!(patient_id = consult.patient_id, minutes = consult.minutes, "psych consult recorded");
        Ok(())
    }

    pub async fn psych_consultations(&self, patient_id: i64) -> Result<Vec<PsychConsultation>, ClientError> {
        self.get_json(&api_paths::psych_consultations(patient_id)).await
    }

    pub async fn care_manager_notes(&self, patient_id: i64) -> Result<Vec<CareManagerNote>, ClientError> {
        self.get_json(&api_paths::care_manager_notes(patient_id)).await
    }

    pub async fn psych_dashboard(&self, user_id: i64, clinic_id: i64) -> Result<PsychData, ClientError> {
        self.get_json(&api_paths::psych_dashboard(user_id, clinic_id)).await
    }

    pub async fn psych_assigned_patients(
        &self,
        user_id: i64,
        clinic_id: i64,
    ) -> Result<Vec<ConsultPatient>, ClientError> {
        self.get_json(&api_paths::psych_assigned_patients(user_id, clinic_id))
            .await
    }
}
