use async_trait::async_trait;
use reqwest::Method;

use crate::admin::errors::RoleStoreError;
use crate::admin::models::UserId;
use crate::admin::ports::RoleRepository;
use crate::outbound::backend::error_message;
use crate::outbound::backend::BackendClient;

const ROLES_PATH: &str = "rest/v1/user_roles";

/// Role assignments read through the hosted backend's REST data API.
pub struct RestRoleRepository {
    client: BackendClient,
}

impl RestRoleRepository {
    pub fn new(client: BackendClient) -> Self {
        Self { client }
    }
}

#[async_trait]
impl RoleRepository for RestRoleRepository {
    #[tracing::instrument(name = "Looking up role assignment", skip_all, fields(user_id = %user_id, role = %role))]
    async fn has_role(&self, user_id: &UserId, role: &str) -> Result<bool, RoleStoreError> {
        let mut url = self
            .client
            .url(ROLES_PATH)
            .map_err(RoleStoreError::Transport)?;
        url.query_pairs_mut()
            .append_pair("select", "role")
            .append_pair("user_id", &format!("eq.{}", user_id))
            .append_pair("role", &format!("eq.{}", role))
            .append_pair("limit", "1");

        let response = self
            .client
            .service_request(Method::GET, url)
            .send()
            .await
            .map_err(|e| RoleStoreError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            return Err(RoleStoreError::Rejected {
                status,
                message: error_message(response).await,
            });
        }

        let rows: Vec<serde_json::Value> = response
            .json()
            .await
            .map_err(|e| RoleStoreError::InvalidResponse(e.to_string()))?;

        Ok(!rows.is_empty())
    }
}
