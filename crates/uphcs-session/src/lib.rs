//! uphcs-session
//!
//! The signed-in session: token claims, role routing, patient access, and
//! the clinic the user is operating against.

pub mod access;
pub mod clinic;
pub mod error;
pub mod jwt;
pub mod routing;
