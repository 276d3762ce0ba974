use serde::{Deserialize, Serialize};

/// A clinic as carried on the user record and in the clinic selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Clinic {
    pub id: i64,
    pub name: String,
}

/// Full clinic row as managed from the admin view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicRecord {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub organization_id: Option<i64>,
}

/// Body for creating or updating a clinic.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClinicInput {
    pub name: String,
    pub address: String,
    pub phone_number: String,
    pub email: String,
    pub organization_id: Option<i64>,
}
