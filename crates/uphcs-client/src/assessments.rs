use uphcs_core::api_paths;
use uphcs_core::models::assessment::{AssessmentStage, AssessmentSubmission};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn submit_assessment(
        &self,
        stage: AssessmentStage,
        submission: &AssessmentSubmission,
    ) -> Result<(), ClientError> {
        let path = match stage {
            AssessmentStage::Initial => api_paths::INITIAL_ASSESSMENT,
            AssessmentStage::FollowUp => api_paths::FOLLOWUP_ASSESSMENT,
        };
        self.post(path, submission).await?;
        tracing::info!(
            patient_id = submission.patient_id,
            ?stage,
            phq9 = submission.phq9_score,
            gad7 = submission.gad7_score,
            "assessment submitted"
        );
        Ok(())
    }
}
