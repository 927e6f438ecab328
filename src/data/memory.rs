//! In-memory auth store
//!
//! Volatile and cleared on restart. Used for local development
//! (`database.provider = "memory"`) and in tests.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tokio::sync::RwLock;

use super::models::*;
use super::store::AuthStore;
use crate::error::AppError;

#[derive(Default)]
struct Tables {
    /// User ID -> User
    users: HashMap<String, User>,
    /// Account ID -> Account
    accounts: HashMap<String, Account>,
    /// Session token -> Session
    sessions: HashMap<String, Session>,
}

impl Tables {
    fn check_user(&self, user: &User) -> Result<(), AppError> {
        if self.users.values().any(|u| u.email == user.email) {
            return Err(AppError::unprocessable(
                "USER_ALREADY_EXISTS",
                "User already exists",
            ));
        }
        Ok(())
    }

    fn check_account(&self, account: &Account) -> Result<(), AppError> {
        let duplicate = self.accounts.values().any(|a| {
            a.provider_id == account.provider_id && a.account_id == account.account_id
        });
        if duplicate {
            return Err(AppError::unprocessable(
                "ACCOUNT_ALREADY_EXISTS",
                "Account already linked",
            ));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored sessions, expired ones included
    pub async fn session_count(&self) -> usize {
        self.tables.read().await.sessions.len()
    }

    pub async fn user_count(&self) -> usize {
        self.tables.read().await.users.len()
    }

    pub async fn account_count(&self) -> usize {
        self.tables.read().await.accounts.len()
    }
}

#[async_trait]
impl AuthStore for MemoryStore {
    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.check_user(user)?;
        tables.users.insert(user.id.clone(), user.clone());
        Ok(())
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        Ok(self.tables.read().await.users.get(id).cloned())
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.values().find(|u| u.email == email).cloned())
    }

    async fn create_account(&self, account: &Account) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.check_account(account)?;
        tables.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn create_user_with_account(
        &self,
        user: &User,
        account: &Account,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables.check_user(user)?;
        tables.check_account(account)?;
        tables.users.insert(user.id.clone(), user.clone());
        tables.accounts.insert(account.id.clone(), account.clone());
        Ok(())
    }

    async fn find_account(
        &self,
        provider_id: &str,
        account_id: &str,
    ) -> Result<Option<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.provider_id == provider_id && a.account_id == account_id)
            .cloned())
    }

    async fn find_credential_account(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .accounts
            .values()
            .find(|a| a.user_id == user_id && a.provider_id == CREDENTIAL_PROVIDER_ID)
            .cloned())
    }

    async fn create_session(&self, session: &Session) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        tables
            .sessions
            .insert(session.token.clone(), session.clone());
        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<SessionWithUser>, AppError> {
        let tables = self.tables.read().await;
        let Some(session) = tables.sessions.get(token) else {
            return Ok(None);
        };

        Ok(tables
            .users
            .get(&session.user_id)
            .map(|user| SessionWithUser {
                session: session.clone(),
                user: user.clone(),
            }))
    }

    async fn update_session_expiry(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        let mut tables = self.tables.write().await;
        if let Some(session) = tables.sessions.get_mut(token) {
            session.expires_at = expires_at;
            session.updated_at = Utc::now();
        }
        Ok(())
    }

    async fn delete_session(&self, token: &str) -> Result<(), AppError> {
        self.tables.write().await.sessions.remove(token);
        Ok(())
    }

    async fn list_sessions_for_user(&self, user_id: &str) -> Result<Vec<Session>, AppError> {
        let tables = self.tables.read().await;
        let mut sessions: Vec<Session> = tables
            .sessions
            .values()
            .filter(|s| s.user_id == user_id && !s.is_expired())
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(sessions)
    }
}
