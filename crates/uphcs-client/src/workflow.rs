//! Workflow gating against live data.
//!
//! Gating is never cached: every submission is followed by a fresh fetch of
//! the patient, its intake, and its treatment history.

use uphcs_core::models::assessment::{AssessmentStage, AssessmentSubmission};
use uphcs_core::models::intake::IntakeSubmission;
use uphcs_core::models::patient::Patient;
use uphcs_core::models::user::Role;
use uphcs_workflow::gating::WorkflowActions;

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// The actions open to `viewer` on `patient` right now.
    ///
    /// A failed intake or history fetch turns the clinical actions off and
    /// leaves contact attempts and documents available.
    pub async fn workflow_actions(&self, patient: &Patient, viewer: Role) -> WorkflowActions {
        let id = patient.patient_id;
        let (history, intake) = tokio::join!(self.treatment_history(id), self.latest_intake(id));
        match (history, intake) {
            (Ok(history), Ok(intake)) => WorkflowActions::for_patient(patient, intake.is_some(), &history, viewer),
            (history, intake) => {
                if let Err(e) = &history {
                    tracing::warn!(patient_id = id, error = %e, "treatment history unavailable for gating");
                }
                if let Err(e) = &intake {
                    tracing::warn!(patient_id = id, error = %e, "latest intake unavailable for gating");
                }
                WorkflowActions::records_only()
            }
        }
    }

    /// Re-fetch the patient and evaluate its actions again.
    pub async fn refresh_actions(
        &self,
        patient_id: i64,
        viewer: Role,
    ) -> Result<(Patient, WorkflowActions), ClientError> {
        let patient = self.patient(patient_id).await?;
        let actions = self.workflow_actions(&patient, viewer).await;
        tracing::debug!(patient_id, ?actions, "workflow re-evaluated");
        Ok((patient, actions))
    }

    /// Submit an intake, then return the actions that are open afterwards.
    pub async fn record_intake(
        &self,
        submission: &IntakeSubmission,
        viewer: Role,
    ) -> Result<WorkflowActions, ClientError> {
        self.submit_intake(submission).await?;
        let (_, actions) = self.refresh_actions(submission.patient_id, viewer).await?;
        Ok(actions)
    }

    /// Submit an assessment, then return the actions that are open afterwards.
    pub async fn record_assessment(
        &self,
        stage: AssessmentStage,
        submission: &AssessmentSubmission,
        viewer: Role,
    ) -> Result<WorkflowActions, ClientError> {
        self.submit_assessment(stage, submission).await?;
        let (_, actions) = self.refresh_actions(submission.patient_id, viewer).await?;
        Ok(actions)
    }
}
