//! User role repository.

use std::sync::Arc;

use crate::entities::{UserRole, user_role};
use corkboard_common::{AppError, AppResult};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter};

/// User role repository for database operations.
#[derive(Clone)]
pub struct UserRoleRepository {
    db: Arc<DatabaseConnection>,
}

impl UserRoleRepository {
    /// Create a new user role repository.
    #[must_use]
    pub const fn new(db: Arc<DatabaseConnection>) -> Self {
        Self { db }
    }

    /// Find a role assignment for a user.
    pub async fn find_assignment(
        &self,
        user_id: &str,
        role: &str,
    ) -> AppResult<Option<user_role::Model>> {
        UserRole::find()
            .filter(user_role::Column::UserId.eq(user_id))
            .filter(user_role::Column::Role.eq(role))
            .one(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    /// Check whether a user holds a role.
    pub async fn has_role(&self, user_id: &str, role: &str) -> AppResult<bool> {
        Ok(self.find_assignment(user_id, role).await?.is_some())
    }

    /// Assign a role to a user.
    pub async fn create(&self, model: user_role::ActiveModel) -> AppResult<user_role::Model> {
        model
            .insert(self.db.as_ref())
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use chrono::Utc;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn create_test_role(id: &str, user_id: &str, role: &str) -> user_role::Model {
        user_role::Model {
            id: id.to_string(),
            user_id: user_id.to_string(),
            role: role.to_string(),
            created_at: Utc::now().into(),
        }
    }

    #[tokio::test]
    async fn test_has_role_true() {
        let assignment = create_test_role("r1", "u1", "admin");

        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([[assignment]])
                .into_connection(),
        );

        let repo = UserRoleRepository::new(db);
        assert!(repo.has_role("u1", "admin").await.unwrap());
    }

    #[tokio::test]
    async fn test_has_role_false() {
        let db = Arc::new(
            MockDatabase::new(DatabaseBackend::Postgres)
                .append_query_results([Vec::<user_role::Model>::new()])
                .into_connection(),
        );

        let repo = UserRoleRepository::new(db);
        assert!(!repo.has_role("u1", "admin").await.unwrap());
    }
}
