//! Authentication and user management service

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::Utc;
use validator::Validate;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::{
        enums::UserRole,
        user::{LoginRequest, SignupRequest, User, UserClaims},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct UsersService {
    repository: Repository,
    config: AuthConfig,
}

impl UsersService {
    pub fn new(repository: Repository, config: AuthConfig) -> Self {
        Self { repository, config }
    }

    /// Provision a new account and return a session token for it.
    /// Unknown or absent roles fall back to "student".
    pub async fn signup(&self, request: SignupRequest) -> AppResult<(String, User)> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        if self
            .repository
            .users
            .find_by_email(&request.email)
            .await?
            .is_some()
        {
            return Err(AppError::Validation(
                "User with this email already exists".to_string(),
            ));
        }

        let role = UserRole::from(request.role);
        let password_hash = self.hash_password(&request.password)?;

        let user = self
            .repository
            .users
            .create(&request.name, &request.email, &password_hash, role)
            .await?;

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Authenticate by email and password, returning a JWT token
    pub async fn authenticate(&self, request: &LoginRequest) -> AppResult<(String, User)> {
        let user = self
            .repository
            .users
            .find_by_email(&request.email)
            .await?
            .ok_or_else(|| AppError::Authentication("Invalid email or password".to_string()))?;

        if !self.verify_password(&user.password_hash, &request.password) {
            return Err(AppError::Authentication(
                "Invalid email or password".to_string(),
            ));
        }

        let token = self.create_token_for_user(&user)?;
        Ok((token, user))
    }

    /// Resolve the current user for a set of claims
    pub async fn get_by_id(&self, user_id: i32) -> AppResult<User> {
        self.repository.users.get_by_id(user_id).await
    }

    /// List non-admin users, newest first (admin view)
    pub async fn list_non_admin(&self) -> AppResult<Vec<User>> {
        self.repository.users.list_non_admin().await
    }

    /// Create the first admin account on startup if configured and no admin
    /// exists yet. Idempotent across restarts.
    pub async fn bootstrap_admin(&self) -> AppResult<()> {
        if self.config.bootstrap_admin_email.is_empty() {
            return Ok(());
        }
        if self.config.bootstrap_admin_password.is_empty() {
            tracing::warn!(
                "auth.bootstrap_admin_email is set but auth.bootstrap_admin_password is empty, skipping bootstrap"
            );
            return Ok(());
        }

        if self.repository.users.any_admin_exists().await? {
            tracing::info!("Admin account already exists, skipping bootstrap");
            return Ok(());
        }

        let password_hash = self.hash_password(&self.config.bootstrap_admin_password)?;
        let user = self
            .repository
            .users
            .create(
                "Administrator",
                &self.config.bootstrap_admin_email,
                &password_hash,
                UserRole::Admin,
            )
            .await?;

        tracing::info!(email = %user.email, user_id = user.id, "Bootstrap admin account created");
        tracing::warn!(
            "Remove auth.bootstrap_admin_password from configuration after initial setup"
        );
        Ok(())
    }

    /// Create JWT token for a user
    fn create_token_for_user(&self, user: &User) -> AppResult<String> {
        let now = Utc::now().timestamp();
        let exp = now + (self.config.jwt_expiration_hours as i64 * 3600);

        let claims = UserClaims {
            sub: user.email.clone(),
            user_id: user.id,
            role: user.role,
            exp,
            iat: now,
        };

        claims
            .create_token(&self.config.jwt_secret)
            .map_err(|e| AppError::Internal(format!("Failed to create token: {}", e)))
    }

    fn hash_password(&self, password: &str) -> AppResult<String> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AppError::Internal(format!("Failed to hash password: {}", e)))
    }

    fn verify_password(&self, password_hash: &str, password: &str) -> bool {
        PasswordHash::new(password_hash)
            .map(|parsed| {
                Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_ok()
            })
            .unwrap_or(false)
    }
}
