use std::sync::Arc;

use async_trait::async_trait;

use crate::admin::errors::AdminError;
use crate::admin::errors::IdentityProviderError;
use crate::admin::ports::AdminServicePort;
use crate::admin::ports::IdentityProvider;
use crate::admin::ports::RoleRepository;
use crate::domain::admin::models::Principal;
use crate::domain::admin::models::ResetPasswordCommand;
use crate::domain::admin::models::ADMIN_ROLE;

/// Domain service implementation for admin operations.
///
/// Stateless: every call goes to the identity provider or role store, nothing is cached.
pub struct AdminService<IP, RR>
where
    IP: IdentityProvider,
    RR: RoleRepository,
{
    identity_provider: Arc<IP>,
    role_repository: Arc<RR>,
}

impl<IP, RR> AdminService<IP, RR>
where
    IP: IdentityProvider,
    RR: RoleRepository,
{
    /// Create a new admin service with injected dependencies.
    ///
    /// # Arguments
    /// * `identity_provider` - Token resolution and credential updates
    /// * `role_repository` - Role assignment lookups
    pub fn new(identity_provider: Arc<IP>, role_repository: Arc<RR>) -> Self {
        Self {
            identity_provider,
            role_repository,
        }
    }
}

#[async_trait]
impl<IP, RR> AdminServicePort for AdminService<IP, RR>
where
    IP: IdentityProvider,
    RR: RoleRepository,
{
    async fn authenticate(&self, token: &str) -> Result<Principal, AdminError> {
        if token.trim().is_empty() {
            return Err(AdminError::MissingToken);
        }

        self.identity_provider.get_user(token).await.map_err(|e| {
            tracing::warn!(error = %e, "Bearer token verification failed");
            AdminError::InvalidToken(e.to_string())
        })
    }

    async fn authorize(&self, principal: &Principal) -> Result<(), AdminError> {
        match self.role_repository.has_role(&principal.id, ADMIN_ROLE).await {
            Ok(true) => Ok(()),
            Ok(false) => {
                tracing::warn!(user_id = %principal.id, "Principal lacks admin role");
                Err(AdminError::NotAdmin(principal.id.to_string()))
            }
            Err(e) => {
                tracing::error!(user_id = %principal.id, error = %e, "Role lookup failed");
                Err(AdminError::NotAdmin(principal.id.to_string()))
            }
        }
    }

    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), AdminError> {
        self.identity_provider
            .update_user_password(&command.user_id, &command.new_password)
            .await
            .map_err(|e| match e {
                IdentityProviderError::Rejected { status, message } => {
                    tracing::warn!(
                        user_id = %command.user_id,
                        status,
                        "Identity provider rejected password update"
                    );
                    AdminError::Provider(message)
                }
                other => {
                    tracing::error!(
                        user_id = %command.user_id,
                        error = %other,
                        "Password update failed"
                    );
                    AdminError::Unknown(other.to_string())
                }
            })?;

        tracing::info!(user_id = %command.user_id, "Password reset");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use mockall::mock;
    use secrecy::Secret;

    use super::*;
    use crate::admin::errors::RoleStoreError;
    use crate::domain::admin::models::NewPassword;
    use crate::domain::admin::models::UserId;

    mock! {
        pub TestIdentityProvider {}

        #[async_trait]
        impl IdentityProvider for TestIdentityProvider {
            async fn get_user(&self, token: &str) -> Result<Principal, IdentityProviderError>;
            async fn update_user_password(
                &self,
                user_id: &UserId,
                new_password: &NewPassword,
            ) -> Result<(), IdentityProviderError>;
        }
    }

    mock! {
        pub TestRoleRepository {}

        #[async_trait]
        impl RoleRepository for TestRoleRepository {
            async fn has_role(&self, user_id: &UserId, role: &str) -> Result<bool, RoleStoreError>;
        }
    }

    fn principal(id: &str) -> Principal {
        Principal {
            id: UserId::new(id.to_string()).unwrap(),
            email: Some(format!("{}@example.com", id)),
            profile: serde_json::json!({ "id": id }),
        }
    }

    fn command(user_id: &str, password: &str) -> ResetPasswordCommand {
        ResetPasswordCommand::new(
            UserId::new(user_id.to_string()).unwrap(),
            NewPassword::new(Secret::new(password.to_string())).unwrap(),
        )
    }

    fn service(
        identity_provider: MockTestIdentityProvider,
        role_repository: MockTestRoleRepository,
    ) -> AdminService<MockTestIdentityProvider, MockTestRoleRepository> {
        AdminService::new(Arc::new(identity_provider), Arc::new(role_repository))
    }

    #[tokio::test]
    async fn test_authenticate_success() {
        let mut identity_provider = MockTestIdentityProvider::new();
        identity_provider
            .expect_get_user()
            .withf(|token| token == "valid-token")
            .times(1)
            .returning(|_| Ok(principal("admin-1")));

        let service = service(identity_provider, MockTestRoleRepository::new());

        let principal = service.authenticate("valid-token").await.unwrap();
        assert_eq!(principal.id.as_str(), "admin-1");
    }

    #[tokio::test]
    async fn test_authenticate_empty_token_skips_provider() {
        let mut identity_provider = MockTestIdentityProvider::new();
        identity_provider.expect_get_user().times(0);

        let service = service(identity_provider, MockTestRoleRepository::new());

        assert_eq!(
            service.authenticate("  ").await.unwrap_err(),
            AdminError::MissingToken
        );
    }

    #[tokio::test]
    async fn test_authenticate_rejected_token() {
        let mut identity_provider = MockTestIdentityProvider::new();
        identity_provider.expect_get_user().times(1).returning(|_| {
            Err(IdentityProviderError::Rejected {
                status: 401,
                message: "invalid JWT".to_string(),
            })
        });

        let service = service(identity_provider, MockTestRoleRepository::new());

        assert!(matches!(
            service.authenticate("expired").await,
            Err(AdminError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_authenticate_unreachable_provider_is_unauthorized() {
        let mut identity_provider = MockTestIdentityProvider::new();
        identity_provider
            .expect_get_user()
            .times(1)
            .returning(|_| Err(IdentityProviderError::Transport("connection refused".into())));

        let service = service(identity_provider, MockTestRoleRepository::new());

        assert!(matches!(
            service.authenticate("token").await,
            Err(AdminError::InvalidToken(_))
        ));
    }

    #[tokio::test]
    async fn test_authorize_admin() {
        let mut role_repository = MockTestRoleRepository::new();
        role_repository
            .expect_has_role()
            .withf(|user_id, role| user_id.as_str() == "admin-1" && role == "admin")
            .times(1)
            .returning(|_, _| Ok(true));

        let service = service(MockTestIdentityProvider::new(), role_repository);

        assert!(service.authorize(&principal("admin-1")).await.is_ok());
    }

    #[tokio::test]
    async fn test_authorize_non_admin() {
        let mut role_repository = MockTestRoleRepository::new();
        role_repository
            .expect_has_role()
            .times(1)
            .returning(|_, _| Ok(false));

        let service = service(MockTestIdentityProvider::new(), role_repository);

        assert_eq!(
            service.authorize(&principal("user-1")).await.unwrap_err(),
            AdminError::NotAdmin("user-1".to_string())
        );
    }

    #[tokio::test]
    async fn test_authorize_lookup_error_is_forbidden() {
        let mut role_repository = MockTestRoleRepository::new();
        role_repository
            .expect_has_role()
            .times(1)
            .returning(|_, _| Err(RoleStoreError::Transport("timeout".into())));

        let service = service(MockTestIdentityProvider::new(), role_repository);

        assert!(matches!(
            service.authorize(&principal("admin-1")).await,
            Err(AdminError::NotAdmin(_))
        ));
    }

    #[tokio::test]
    async fn test_reset_password_success() {
        let mut identity_provider = MockTestIdentityProvider::new();
        identity_provider
            .expect_update_user_password()
            .withf(|user_id, password| user_id.as_str() == "u1" && password.expose() == "Secret123")
            .times(1)
            .returning(|_, _| Ok(()));

        let service = service(identity_provider, MockTestRoleRepository::new());

        assert!(service
            .reset_password(command("u1", "Secret123"))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_reset_password_provider_rejection_keeps_message() {
        let mut identity_provider = MockTestIdentityProvider::new();
        identity_provider
            .expect_update_user_password()
            .times(1)
            .returning(|_, _| {
                Err(IdentityProviderError::Rejected {
                    status: 422,
                    message: "Password should be at least 6 characters.".to_string(),
                })
            });

        let service = service(identity_provider, MockTestRoleRepository::new());

        assert_eq!(
            service.reset_password(command("u1", "abc")).await.unwrap_err(),
            AdminError::Provider("Password should be at least 6 characters.".to_string())
        );
    }

    #[tokio::test]
    async fn test_reset_password_transport_failure_is_unknown() {
        let mut identity_provider = MockTestIdentityProvider::new();
        identity_provider
            .expect_update_user_password()
            .times(1)
            .returning(|_, _| Err(IdentityProviderError::Transport("reset by peer".into())));

        let service = service(identity_provider, MockTestRoleRepository::new());

        assert!(matches!(
            service.reset_password(command("u1", "Secret123")).await,
            Err(AdminError::Unknown(_))
        ));
    }
}
