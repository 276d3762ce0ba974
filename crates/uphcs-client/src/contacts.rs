use uphcs_core::api_paths;
use uphcs_core::models::contact_attempt::{ContactAttempt, NewContactAttempt};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn contact_attempts(&self, patient_id: i64) -> Result<Vec<ContactAttempt>, ClientError> {
        self.get_json(&api_paths::contact_attempts(patient_id)).await
    }

    pub async fn record_contact_attempt(&self, attempt: &NewContactAttempt) -> Result<(), ClientError> {
        self.post(api_paths::CONTACT_ATTEMPTS, attempt).await?;
        tracing::info!(
            patient_id = attempt.patient_id,
            minutes = attempt.minutes,
            mode = %attempt.interaction_mode,
            "contact attempt recorded"
        );
        Ok(())
    }
}
