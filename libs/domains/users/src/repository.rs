use async_trait::async_trait;

use crate::error::UserResult;
use crate::models::User;

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user; a taken username or email is reported as a duplicate
    async fn create(&self, user: User) -> UserResult<User>;

    async fn get_by_username(&self, username: &str) -> UserResult<Option<User>>;

    async fn email_exists(&self, email: &str) -> UserResult<bool>;

    /// True when at least one user has the admin role
    async fn admin_exists(&self) -> UserResult<bool>;
}
