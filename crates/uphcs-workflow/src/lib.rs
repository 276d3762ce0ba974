//! uphcs-workflow
//!
//! The rules the dashboard applies to fetched data: which actions a
//! patient's workflow stage enables, list search/sort/paging, reminder
//! badges, document grouping, and form validation. Pure functions over
//! `uphcs-core` types.

pub mod documents;
pub mod error;
pub mod forms;
pub mod gating;
pub mod listing;
pub mod reminders;
