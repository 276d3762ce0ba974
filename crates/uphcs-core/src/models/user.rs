use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::models::clinic::Clinic;

/// The roles a dashboard user can hold.
///
/// Serialized as the backend's role string. Anything else fails to
/// deserialize rather than falling through to a default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Role {
    Admin,
    CareManager,
    PsychiatricConsultant,
}

impl Role {
    pub const ALL: [Role; 3] = [Role::Admin, Role::CareManager, Role::PsychiatricConsultant];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "Admin",
            Role::CareManager => "BHCM",
            Role::PsychiatricConsultant => "Psychiatric Consultant",
        }
    }

    /// The `providerType` this role appears as on a patient's provider list.
    pub fn provider_type(&self) -> Option<&'static str> {
        match self {
            Role::Admin => None,
            Role::CareManager => Some("BHCM"),
            Role::PsychiatricConsultant => Some("Psychiatric Consultant"),
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.eq_ignore_ascii_case("admin") {
            Ok(Role::Admin)
        } else if trimmed.eq_ignore_ascii_case("bhcm") || trimmed.contains("Care Manager") {
            Ok(Role::CareManager)
        } else if trimmed.eq_ignore_ascii_case("psychiatric consultant") {
            Ok(Role::PsychiatricConsultant)
        } else {
            Err(CoreError::UnknownRole(s.to_string()))
        }
    }
}

impl TryFrom<String> for Role {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        role.as_str().to_string()
    }
}

/// The signed-in user, from `GET /api/users/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub role: Role,
    #[serde(default)]
    pub clinics: Vec<Clinic>,
}

impl User {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn is_member_of(&self, clinic_id: i64) -> bool {
        self.clinics.iter().any(|c| c.id == clinic_id)
    }
}

/// A row of the admin user list. Roles stay as raw strings there so one
/// unrecognized account does not hide the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
    pub email: String,
    pub role: String,
    #[serde(default)]
    pub clinic_names: Option<String>,
}

/// Body of `POST /api/users` and `PUT /api/users/:id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct NewUser {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub password: Option<String>,
    pub role: Role,
    #[serde(default)]
    pub clinic_ids: Vec<i64>,
}

/// Body of `POST /api/auth/login`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

/// A role as listed by `GET /api/users/roles`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoleOption {
    pub id: i64,
    pub name: String,
}
