//! uphcs-client
//!
//! Typed async client for the case-management REST backend. Thin wrapper
//! around `reqwest`; one module per backend resource.

pub mod admin;
pub mod assessments;
pub mod auth;
pub mod client;
pub mod contacts;
pub mod dashboard;
pub mod documents;
pub mod error;
pub mod intake;
pub mod patients;
pub mod psych;
pub mod reminders;
pub mod workflow;

pub use client::ApiClient;
