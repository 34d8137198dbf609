//! Admin account service.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use corkboard_common::{AppError, AppResult, IdGenerator};
use corkboard_db::{
    entities::{user, user_role},
    repositories::{UserRepository, UserRoleRepository},
};
use sea_orm::Set;

use super::audit::AuditLogger;

/// The role required for dashboard access.
pub const ADMIN_ROLE: &str = "admin";

/// A successful sign-in.
pub struct SignInResult {
    /// The authenticated admin.
    pub user: user::Model,
    /// Fresh bearer token for subsequent requests.
    pub token: String,
}

/// Account service for admin authentication and role checks.
#[derive(Clone)]
pub struct AccountService {
    user_repo: UserRepository,
    user_role_repo: UserRoleRepository,
    audit: AuditLogger,
    id_gen: IdGenerator,
}

impl AccountService {
    /// Create a new account service.
    #[must_use]
    pub const fn new(
        user_repo: UserRepository,
        user_role_repo: UserRoleRepository,
        audit: AuditLogger,
    ) -> Self {
        Self {
            user_repo,
            user_role_repo,
            audit,
            id_gen: IdGenerator::new(),
        }
    }

    /// Sign in with email and password.
    ///
    /// Only admins may sign in. A correct password without the admin role
    /// is audited and rejected, and credential failures are reported with
    /// the same error as unknown emails.
    pub async fn sign_in(&self, email: &str, password: &str) -> AppResult<SignInResult> {
        let user = self
            .user_repo
            .find_by_email(email)
            .await?
            .ok_or(AppError::Unauthorized)?;

        if !verify_password(password, &user.password_hash)? {
            return Err(AppError::Unauthorized);
        }

        if !self.is_admin(&user.id).await? {
            self.audit.warn(
                "Unauthorized admin access attempt",
                serde_json::json!({ "email": email }),
            );
            return Err(AppError::Forbidden("Admin role required".to_string()));
        }

        let token = self.id_gen.generate_token();
        let mut active: user::ActiveModel = user.into();
        active.token = Set(Some(token.clone()));
        let user = self.user_repo.update(active).await?;

        self.audit.info(
            "Admin logged in",
            serde_json::json!({ "email": user.email }),
        );

        Ok(SignInResult { user, token })
    }

    /// Sign out, invalidating the current token.
    pub async fn sign_out(&self, user_id: &str) -> AppResult<()> {
        let user = self.user_repo.get_by_id(user_id).await?;
        let email = user.email.clone();

        let mut active: user::ActiveModel = user.into();
        active.token = Set(None);
        self.user_repo.update(active).await?;

        self.audit.info(
            "User logged out manually",
            serde_json::json!({ "email": email }),
        );

        Ok(())
    }

    /// Resolve a bearer token to a user.
    pub async fn find_by_token(&self, token: &str) -> AppResult<Option<user::Model>> {
        self.user_repo.find_by_token(token).await
    }

    /// Check whether a user holds the admin role.
    pub async fn is_admin(&self, user_id: &str) -> AppResult<bool> {
        match self.user_role_repo.has_role(user_id, ADMIN_ROLE).await {
            Ok(is_admin) => Ok(is_admin),
            Err(e) => {
                self.audit.error(
                    "Error checking admin role",
                    serde_json::json!({ "userId": user_id, "error": e.to_string() }),
                );
                Err(e)
            }
        }
    }

    /// Create the admin account on first startup if it does not exist.
    pub async fn ensure_admin(&self, email: &str, password: &str) -> AppResult<()> {
        if self.user_repo.find_by_email(email).await?.is_some() {
            return Ok(());
        }

        let user_id = self.id_gen.generate();
        let user = user::ActiveModel {
            id: Set(user_id.clone()),
            email: Set(email.to_string()),
            password_hash: Set(hash_password(password)?),
            token: Set(None),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.user_repo.create(user).await?;

        let role = user_role::ActiveModel {
            id: Set(self.id_gen.generate()),
            user_id: Set(user_id),
            role: Set(ADMIN_ROLE.to_string()),
            created_at: Set(chrono::Utc::now().into()),
        };
        self.user_role_repo.create(role).await?;

        tracing::info!(email = %email, "Created admin account");
        Ok(())
    }
}

/// Hash a password using Argon2.
fn hash_password(password: &str) -> AppResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AppError::Internal(format!("Failed to hash password: {e}")))
}

/// Verify a password against a hash.
fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| AppError::Internal(format!("Invalid hash: {e}")))?;

    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
