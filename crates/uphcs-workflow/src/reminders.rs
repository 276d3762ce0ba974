use std::fmt;
use std::str::FromStr;

use jiff::civil::Date;
use serde::Serialize;
use uphcs_core::models::reminder::Reminder;

use crate::error::WorkflowError;

/// Badge shown next to a reminder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Overdue,
    DueToday,
    Upcoming,
}

impl ReminderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            ReminderStatus::Overdue => "overdue",
            ReminderStatus::DueToday => "today",
            ReminderStatus::Upcoming => "upcoming",
        }
    }
}

impl fmt::Display for ReminderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Compares calendar days only.
pub fn classify(due: Date, today: Date) -> ReminderStatus {
    if due < today {
        ReminderStatus::Overdue
    } else if due == today {
        ReminderStatus::DueToday
    } else {
        ReminderStatus::Upcoming
    }
}

/// Tabs of the reminder list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReminderTab {
    #[default]
    All,
    Only(ReminderStatus),
}

impl ReminderTab {
    pub fn admits(&self, status: ReminderStatus) -> bool {
        match self {
            ReminderTab::All => true,
            ReminderTab::Only(s) => *s == status,
        }
    }
}

impl FromStr for ReminderTab {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "all" => Ok(ReminderTab::All),
            "overdue" => Ok(ReminderTab::Only(ReminderStatus::Overdue)),
            "today" => Ok(ReminderTab::Only(ReminderStatus::DueToday)),
            "upcoming" => Ok(ReminderTab::Only(ReminderStatus::Upcoming)),
            _ => Err(WorkflowError::UnknownReminderTab(s.to_string())),
        }
    }
}

/// Reminders visible under `tab`, each with its badge, in input order.
pub fn filter(reminders: &[Reminder], tab: ReminderTab, today: Date) -> Vec<(&Reminder, ReminderStatus)> {
    reminders
        .iter()
        .map(|r| (r, classify(r.reminder_date, today)))
        .filter(|(_, status)| tab.admits(*status))
        .collect()
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ReminderCounts {
    pub overdue: usize,
    pub today: usize,
    pub upcoming: usize,
}

pub fn counts(reminders: &[Reminder], today: Date) -> ReminderCounts {
    reminders
        .iter()
        .fold(ReminderCounts::default(), |mut acc, r| {
            match classify(r.reminder_date, today) {
                ReminderStatus::Overdue => acc.overdue += 1,
                ReminderStatus::DueToday => acc.today += 1,
                ReminderStatus::Upcoming => acc.upcoming += 1,
            }
            acc
        })
}
