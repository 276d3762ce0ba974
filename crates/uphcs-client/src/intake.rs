use uphcs_core::api_paths;
use uphcs_core::models::intake::{IntakeForm, IntakeSubmission};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// The most recent intake, or `None` when the patient has none yet.
    pub async fn latest_intake(&self, patient_id: i64) -> Result<Option<IntakeForm>, ClientError> {
        let intake = self.get_optional(&api_paths::latest_intake(patient_id)).await?;
        if intake.is_none() {
            tracing::debug!(patient_id, "no intake on file");
        }
        Ok(intake)
    }

    /// Submit an intake. Safety plans go through the same endpoint.
    pub async fn submit_intake(&self, submission: &IntakeSubmission) -> Result<(), ClientError> {
        self.post(api_paths::PATIENT_INTAKE, submission).await?;
        tracing::info!(
            patient_id = submission.patient_id,
            safety_plan = submission.form.safety_plan_discussed,
            "intake submitted"
        );
        Ok(())
    }
}
