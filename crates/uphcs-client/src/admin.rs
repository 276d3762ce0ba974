//! Admin-only resources: users, roles, clinics, and clinic metrics.

use uphcs_core::api_paths;
use uphcs_core::models::clinic::{ClinicInput, ClinicRecord};
use uphcs_core::models::summary::ClinicData;
use uphcs_core::models::user::{NewUser, RoleOption, UserRecord};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    pub async fn users(&self) -> Result<Vec<UserRecord>, ClientError> {
        self.get_json(api_paths::USERS).await
    }

    pub async fn roles(&self) -> Result<Vec<RoleOption>, ClientError> {
        self.get_json(api_paths::USER_ROLES).await
    }

    pub async fn create_user(&self, user: &NewUser) -> Result<(), ClientError> {
        self.post(api_paths::USERS, user).await?;
        tracing::info!(email = %user.email, role = %user.role, "user created");
        Ok(())
    }

    pub async fn update_user(&self, user_id: i64, user: &NewUser) -> Result<(), ClientError> {
        self.put(&api_paths::user(user_id), user).await?;
        tracing::info!(user_id, "user updated");
        Ok(())
    }

    pub async fn delete_user(&self, user_id: i64) -> Result<(), ClientError> {
        self.delete(&api_paths::user(user_id)).await?;
        tracing::info!(user_id, "user deleted");
        Ok(())
    }

    pub async fn clinics(&self) -> Result<Vec<ClinicRecord>, ClientError> {
        self.get_json(api_paths::CLINICS).await
    }

    pub async fn create_clinic(&self, clinic: &ClinicInput) -> Result<(), ClientError> {
        self.post(api_paths::CLINICS, clinic).await?;
        tracing::info!(name = %clinic.name, "clinic created");
        Ok(())
    }

    pub async fn update_clinic(&self, clinic_id: i64, clinic: &ClinicInput) -> Result<(), ClientError> {
        self.put(&api_paths::clinic(clinic_id), clinic).await?;
        tracing::info!(clinic_id, "clinic updated");
        Ok(())
    }

    pub async fn delete_clinic(&self, clinic_id: i64) -> Result<(), ClientError> {
        self.delete(&api_paths::clinic(clinic_id)).await?;
        tracing::info!(clinic_id, "clinic deleted");
        Ok(())
    }

    pub async fn clinic_data(&self, clinic_id: i64) -> Result<ClinicData, ClientError> {
        self.get_json(&api_paths::clinic_data(clinic_id)).await
    }
}
