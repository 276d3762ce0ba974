//! uphcs-core
//!
//! Pure domain types, date handling, and REST path conventions for the
//! UPHCS case-management toolkit. No HTTP dependency.

pub mod api_paths;
pub mod dates;
pub mod error;
pub mod models;
