use jiff::civil::Date;
use serde::{Deserialize, Serialize};

/// A scheduled follow-up task for a patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Reminder {
    pub id: i64,
    pub patient_id: i64,
    pub reminder_type: String,
    #[serde(with = "crate::dates::lenient")]
    pub reminder_date: Date,
    #[serde(default)]
    pub description: String,
    pub status: String,
    pub first_name: String,
    pub last_name: String,
    pub mrn: String,
    #[serde(default)]
    pub clinic_name: Option<String>,
}

/// What a user can do to a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReminderAction {
    Complete,
    Dismiss,
}

impl ReminderAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReminderAction::Complete => "complete",
            ReminderAction::Dismiss => "dismiss",
        }
    }
}

/// Body of `PUT /api/reminders/:id/:action`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReminderActionBody {
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub user_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub patient_id: Option<i64>,
}
