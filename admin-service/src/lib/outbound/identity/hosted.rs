use async_trait::async_trait;
use reqwest::Method;
use serde::Deserialize;
use serde::Serialize;

use crate::admin::errors::IdentityProviderError;
use crate::admin::models::NewPassword;
use crate::admin::models::Principal;
use crate::admin::models::UserId;
use crate::admin::ports::IdentityProvider;
use crate::outbound::backend::error_message;
use crate::outbound::backend::BackendClient;

const USER_PATH: &str = "auth/v1/user";
const ADMIN_USERS_PATH: &str = "auth/v1/admin/users";

/// Identity provider backed by the hosted backend's auth API.
pub struct HostedIdentityProvider {
    client: BackendClient,
}

impl HostedIdentityProvider {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[derive(Debug, Deserialize)]
struct UserRecord {
    id: String,
    email: Option<String>,
}

#[derive(Serialize)]
struct UpdatePasswordRequest<'a> {
    password: &'a str,
}

#[async_trait]
impl IdentityProvider for HostedIdentityProvider {
    #[tracing::instrument(name = "Resolving bearer token", skip_all)]
    async fn get_user(&self, token: &str) -> Result<Principal, IdentityProviderError> {
        let url = self
            .client
            .url(USER_PATH)
            .map_err(IdentityProviderError::Transport)?;

        let response = self
            .client
            .user_request(Method::GET, url, token)
            .send()
            .await
            .map_err(|e| IdentityProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(IdentityProviderError::Rejected {
                status,
                message: error_message(response).await,
            });
        }

        let profile: serde_json::Value = response
            .json()
            .await
            .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))?;
        let record = UserRecord::deserialize(&profile)
            .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))?;
        let id = UserId::new(record.id)
            .map_err(|e| IdentityProviderError::InvalidResponse(e.to_string()))?;

        Ok(Principal {
            id,
            email: record.email,
            profile,
        })
    }

    #[tracing::instrument(name = "Updating user password", skip_all, fields(user_id = %user_id))]
    async fn update_user_password(
        &self,
        user_id: &UserId,
        new_password: &NewPassword,
    ) -> Result<(), IdentityProviderError> {
        let mut url = self
            .client
            .url(ADMIN_USERS_PATH)
            .map_err(IdentityProviderError::Transport)?;
        // Pushed as a path segment so the identifier is percent-encoded.
        url.path_segments_mut()
            .map_err(|_| IdentityProviderError::Transport("base URL cannot carry a path".into()))?
            .push(user_id.as_str());

        let response = self
            .client
            .service_request(Method::PUT, url)
            .json(&UpdatePasswordRequest {
                password: new_password.expose(),
            })
            .send()
            .await
            .map_err(|e| IdentityProviderError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(IdentityProviderError::Rejected {
                status,
                message: error_message(response).await,
            });
        }

        Ok(())
    }
}
