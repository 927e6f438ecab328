//! Storage abstraction for the auth tables
//!
//! The auth service only talks to `AuthStore`, so the PostgreSQL backend
//! and the in-memory backend are interchangeable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use super::models::{Account, Session, SessionWithUser, User};
use crate::error::AppError;

#[async_trait]
pub trait AuthStore: Send + Sync {
    /// Insert a new user. Fails with 422 if the email is taken.
    async fn create_user(&self, user: &User) -> Result<(), AppError>;

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError>;

    /// Lookup by email (callers pass it lowercased)
    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    /// Link an account to an existing user. Fails with 422 if the
    /// provider account is already linked.
    async fn create_account(&self, account: &Account) -> Result<(), AppError>;

    /// Insert a new user and its first account atomically. Neither row
    /// is kept if either insert fails.
    async fn create_user_with_account(
        &self,
        user: &User,
        account: &Account,
    ) -> Result<(), AppError>;

    /// Find an account by provider and provider-side id
    async fn find_account(
        &self,
        provider_id: &str,
        account_id: &str,
    ) -> Result<Option<Account>, AppError>;

    /// Find the password account of a user
    async fn find_credential_account(&self, user_id: &str) -> Result<Option<Account>, AppError>;

    async fn create_session(&self, session: &Session) -> Result<(), AppError>;

    /// Find a session and its user by session token
    async fn find_session(&self, token: &str) -> Result<Option<SessionWithUser>, AppError>;

    async fn update_session_expiry(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError>;

    /// Delete a session. Deleting an unknown token is not an error.
    async fn delete_session(&self, token: &str) -> Result<(), AppError>;

    /// Unexpired sessions of a user, newest first
    async fn list_sessions_for_user(&self, user_id: &str) -> Result<Vec<Session>, AppError>;
}
