use uphcs_core::api_paths;
use uphcs_core::models::reminder::{Reminder, ReminderAction, ReminderActionBody};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn patient_reminders(&self, patient_id: i64) -> Result<Vec<Reminder>, ClientError> {
        self.get_json(&api_paths::patient_reminders(patient_id)).await
    }

    pub async fn care_manager_reminders(&self, user_id: i64) -> Result<Vec<Reminder>, ClientError> {
        self.get_json(&api_paths::care_manager_reminders(user_id)).await
    }

    pub async fn act_on_reminder(
        &self,
        reminder_id: i64,
        action: ReminderAction,
        body: &ReminderActionBody,
    ) -> Result<(), ClientError> {
        self.put(&api_paths::reminder_action(reminder_id, action), body)
            .await?;
        tracing::info!(reminder_id, action = action.as_str(), "reminder updated");
        Ok(())
    }
}
