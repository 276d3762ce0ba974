pub mod assessment;
pub mod clinic;
pub mod consult;
pub mod contact_attempt;
pub mod document;
pub mod intake;
pub mod patient;
pub mod reminder;
pub mod summary;
pub mod user;
