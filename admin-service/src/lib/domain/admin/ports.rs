use async_trait::async_trait;

use crate::domain::admin::models::NewPassword;
use crate::domain::admin::models::Principal;
use crate::domain::admin::models::ResetPasswordCommand;
use crate::domain::admin::models::UserId;
use crate::admin::errors::AdminError;
use crate::admin::errors::IdentityProviderError;
use crate::admin::errors::RoleStoreError;

/// Port for admin domain service operations.
///
/// One call per request stage; the HTTP layer drives them in order.
#[async_trait]
pub trait AdminServicePort: Send + Sync + 'static {
    /// Resolve the caller behind a bearer token.
    ///
    /// # Arguments
    /// * `token` - Raw bearer token from the Authorization header
    ///
    /// # Returns
    /// Principal owning the token
    ///
    /// # Errors
    /// * `MissingToken` - Token is empty
    /// * `InvalidToken` - Provider refused the token or could not be reached
    async fn authenticate(&self, token: &str) -> Result<Principal, AdminError>;

    /// Confirm the principal holds the admin role.
    ///
    /// # Errors
    /// * `NotAdmin` - No admin role assignment, or the lookup failed
    async fn authorize(&self, principal: &Principal) -> Result<(), AdminError>;

    /// Overwrite the target user's password.
    ///
    /// # Arguments
    /// * `command` - Validated target user and new password
    ///
    /// # Errors
    /// * `Provider` - Identity provider rejected the update (message verbatim)
    /// * `Unknown` - Provider unreachable or answered with garbage
    async fn reset_password(&self, command: ResetPasswordCommand) -> Result<(), AdminError>;
}

/// External identity provider owning users and their credentials.
#[async_trait]
pub trait IdentityProvider: Send + Sync + 'static {
    /// Resolve the user a bearer token was issued to.
    ///
    /// # Errors
    /// * `Rejected` - Token invalid or expired
    /// * `Transport` - Provider unreachable
    /// * `InvalidResponse` - Response body not a user record
    async fn get_user(&self, token: &str) -> Result<Principal, IdentityProviderError>;

    /// Administratively replace a user's password.
    ///
    /// # Errors
    /// * `Rejected` - Provider refused the update (weak password, unknown user, ...)
    /// * `Transport` - Provider unreachable
    async fn update_user_password(
        &self,
        user_id: &UserId,
        new_password: &NewPassword,
    ) -> Result<(), IdentityProviderError>;
}

/// Read access to role assignments.
#[async_trait]
pub trait RoleRepository: Send + Sync + 'static {
    /// Check whether a role assignment exists for the user.
    ///
    /// # Returns
    /// `true` if at least one row matches `user_id` and `role`
    ///
    /// # Errors
    /// * `Rejected` / `Transport` / `InvalidResponse` - REST store failures
    /// * `DatabaseError` - Postgres store failures
    async fn has_role(&self, user_id: &UserId, role: &str) -> Result<bool, RoleStoreError>;
}
