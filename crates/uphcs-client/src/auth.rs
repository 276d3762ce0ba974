use uphcs_core::api_paths;
use uphcs_core::models::user::{Credentials, LoginResponse, User};

use crate::client::ApiClient;
use crate::error::ClientError;

impl ApiClient {
    /// Exchange credentials for a session token. The client keeps using
    /// whatever token it had; callers store the new one.
    pub async fn login(&self, username: &str, password: &str) -> Result<String, ClientError> {
        let body = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };
        let resp: LoginResponse = self.post_json(api_paths::LOGIN, &body).await?;
        tracing::info!(username, "logged in");
        Ok(resp.token)
    }

    pub async fn current_user(&self, user_id: i64) -> Result<User, ClientError> {
        if self.token().is_none() {
            return Err(ClientError::NotLoggedIn);
        }
        self.get_json(&api_paths::user(user_id)).await
    }
}
