use async_trait::async_trait;
use sqlx::PgPool;

use crate::admin::errors::RoleStoreError;
use crate::admin::models::UserId;
use crate::admin::ports::RoleRepository;

/// Role assignments read directly from the backend database.
pub struct PostgresRoleRepository {
    pool: PgPool,
}

impl PostgresRoleRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RoleRepository for PostgresRoleRepository {
    #[tracing::instrument(name = "Looking up role assignment", skip_all, fields(user_id = %user_id, role = %role))]
    async fn has_role(&self, user_id: &UserId, role: &str) -> Result<bool, RoleStoreError> {
        // user_id is compared as text so uuid and text columns both work.
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM user_roles
                WHERE user_id::text = $1 AND role::text = $2
            )
            "#,
        )
        .bind(user_id.as_str())
        .bind(role)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RoleStoreError::DatabaseError(e.to_string()))
    }
}
