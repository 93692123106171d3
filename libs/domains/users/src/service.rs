use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum_helpers::JwtAuth;
use std::sync::Arc;
use tracing::instrument;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, Role, TokenResponse, User, UserResponse};
use crate::repository::UserRepository;

/// Service layer for accounts and token issuance
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
    jwt: JwtAuth,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R, jwt: JwtAuth) -> Self {
        Self {
            repository: Arc::new(repository),
            jwt,
        }
    }

    /// Register a user with a hashed password
    #[instrument(skip(self, input), fields(username = %input.username, role = %input.role))]
    pub async fn register(&self, input: CreateUser) -> UserResult<UserResponse> {
        if self.repository.get_by_username(&input.username).await?.is_some() {
            return Err(UserError::DuplicateUsername(input.username));
        }
        if self.repository.email_exists(&input.email).await? {
            return Err(UserError::DuplicateEmail(input.email));
        }

        let hashed_password = hash_password(&input.password)?;
        let user = User::new(input.username, input.email, hashed_password, input.role);

        // The unique indexes still catch a concurrent registration
        let created = self.repository.create(user).await?;
        tracing::info!(username = %created.username, "User registered");
        Ok(created.into())
    }

    /// Check a username/password pair.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    #[instrument(skip(self, password))]
    pub async fn authenticate(&self, username: &str, password: &str) -> UserResult<User> {
        let user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or(UserError::InvalidCredentials)?;

        if !verify_password(password, &user.hashed_password)? {
            return Err(UserError::InvalidCredentials);
        }
        if !user.is_active {
            return Err(UserError::Inactive);
        }
        Ok(user)
    }

    /// Authenticate and issue an access token
    #[instrument(skip(self, password))]
    pub async fn login(&self, username: &str, password: &str) -> UserResult<TokenResponse> {
        let user = self.authenticate(username, password).await?;
        let token = self
            .jwt
            .create_access_token(&user.username, &user.role.to_string())
            .map_err(|e| UserError::Token(e.to_string()))?;
        Ok(TokenResponse::bearer(token, self.jwt.access_token_ttl_secs()))
    }

    /// Profile of the token's subject; it must still exist and be active
    #[instrument(skip(self))]
    pub async fn current_user(&self, username: &str) -> UserResult<UserResponse> {
        let user = self
            .repository
            .get_by_username(username)
            .await?
            .ok_or_else(|| UserError::NotFound(username.to_string()))?;
        if !user.is_active {
            return Err(UserError::Inactive);
        }
        Ok(user.into())
    }

    /// Create an admin account unless one already exists.
    ///
    /// Returns whether an account was created.
    #[instrument(skip(self, password))]
    pub async fn ensure_default_admin(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> UserResult<bool> {
        if self.repository.admin_exists().await? {
            tracing::debug!("Admin account present, skipping bootstrap");
            return Ok(false);
        }

        self.register(CreateUser {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Admin,
        })
        .await?;
        tracing::warn!(username, "Default admin account created; change its password");
        Ok(true)
    }
}

fn hash_password(password: &str) -> UserResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| UserError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> UserResult<bool> {
    let parsed_hash = PasswordHash::new(hash).map_err(|e| UserError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
