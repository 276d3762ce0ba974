//! uphcs command-line client library root.
//!
//! Config persistence and output rendering live here so integration tests
//! can exercise them without going through the command layer.

pub mod config;
pub mod render;
