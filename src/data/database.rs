//! PostgreSQL database operations
//!
//! All persistent auth state goes through this module.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgPool, Postgres};
use sqlx::postgres::PgPoolOptions;

use super::models::*;
use super::store::AuthStore;
use crate::config::DatabaseConfig;
use crate::error::AppError;

/// Database connection pool wrapper.
pub struct Database {
    pool: PgPool,
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    matches!(error, sqlx::Error::Database(db_error) if db_error.is_unique_violation())
}

/// Map a failed insert, turning unique violations into 422 `code`
fn insert_error(error: sqlx::Error, code: &'static str, message: &str) -> AppError {
    if is_unique_violation(&error) {
        AppError::unprocessable(code, message)
    } else {
        error.into()
    }
}

async fn insert_user<'e, E>(executor: E, user: &User) -> Result<(), AppError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO "user" (id, name, email, email_verified, image, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7)
        "#,
    )
    .bind(&user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(user.email_verified)
    .bind(&user.image)
    .bind(user.created_at)
    .bind(user.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error(e, "USER_ALREADY_EXISTS", "User already exists"))?;

    Ok(())
}

async fn insert_account<'e, E>(executor: E, account: &Account) -> Result<(), AppError>
where
    E: sqlx::Executor<'e, Database = Postgres>,
{
    sqlx::query(
        r#"
        INSERT INTO "account" (
            id, user_id, provider_id, account_id, password, access_token,
            refresh_token, id_token, access_token_expires_at, scope,
            created_at, updated_at
        ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
        "#,
    )
    .bind(&account.id)
    .bind(&account.user_id)
    .bind(&account.provider_id)
    .bind(&account.account_id)
    .bind(&account.password)
    .bind(&account.access_token)
    .bind(&account.refresh_token)
    .bind(&account.id_token)
    .bind(account.access_token_expires_at)
    .bind(&account.scope)
    .bind(account.created_at)
    .bind(account.updated_at)
    .execute(executor)
    .await
    .map_err(|e| insert_error(e, "ACCOUNT_ALREADY_EXISTS", "Account already linked"))?;

    Ok(())
}

impl Database {
    // =========================================================================
    // Connection
    // =========================================================================

    /// Connect to PostgreSQL
    ///
    /// Runs pending migrations automatically.
    ///
    /// # Errors
    /// Returns error if connection or migration fails
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, AppError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .connect(&config.url)
            .await?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| {
                tracing::error!("Migration failed: {}", e);
                AppError::Internal(anyhow::anyhow!("Migration failed: {}", e))
            })?;

        tracing::info!("Database connected and migrated successfully");

        Ok(Self { pool })
    }
}

#[async_trait]
impl AuthStore for Database {
    // =========================================================================
    // Users
    // =========================================================================

    async fn create_user(&self, user: &User) -> Result<(), AppError> {
        insert_user(&self.pool, user).await
    }

    async fn find_user_by_id(&self, id: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE id = $1"#)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(r#"SELECT * FROM "user" WHERE email = $1"#)
            .bind(email)
            .fetch_optional(&self.pool)
            .await?;

        Ok(user)
    }

    // =========================================================================
    // Accounts
    // =========================================================================

    async fn create_account(&self, account: &Account) -> Result<(), AppError> {
        insert_account(&self.pool, account).await
    }

    async fn create_user_with_account(
        &self,
        user: &User,
        account: &Account,
    ) -> Result<(), AppError> {
        let mut tx = self.pool.begin().await?;
        insert_user(&mut *tx, user).await?;
        insert_account(&mut *tx, account).await?;
        tx.commit().await?;

        Ok(())
    }

    async fn find_account(
        &self,
        provider_id: &str,
        account_id: &str,
    ) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"SELECT * FROM "account" WHERE provider_id = $1 AND account_id = $2"#,
        )
        .bind(provider_id)
        .bind(account_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    async fn find_credential_account(&self, user_id: &str) -> Result<Option<Account>, AppError> {
        let account = sqlx::query_as::<_, Account>(
            r#"SELECT * FROM "account" WHERE user_id = $1 AND provider_id = $2"#,
        )
        .bind(user_id)
        .bind(CREDENTIAL_PROVIDER_ID)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    // =========================================================================
    // Sessions
    // =========================================================================

    async fn create_session(&self, session: &Session) -> Result<(), AppError> {
        sqlx::query(
            r#"
            INSERT INTO "session" (
                id, token, user_id, expires_at, created_at, updated_at, ip_address, user_agent
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(&session.id)
        .bind(&session.token)
        .bind(&session.user_id)
        .bind(session.expires_at)
        .bind(session.created_at)
        .bind(session.updated_at)
        .bind(&session.ip_address)
        .bind(&session.user_agent)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, token: &str) -> Result<Option<SessionWithUser>, AppError> {
        let Some(session) =
            sqlx::query_as::<_, Session>(r#"SELECT * FROM "session" WHERE token = $1"#)
                .bind(token)
                .fetch_optional(&self.pool)
                .await?
        else {
            return Ok(None);
        };

        let user = self.find_user_by_id(&session.user_id).await?;
        Ok(user.map(|user| SessionWithUser { session, user }))
    }

    async fn update_session_expiry(
        &self,
        token: &str,
        expires_at: DateTime<Utc>,
    ) -> Result<(), AppError> {
        sqlx::query(r#"UPDATE "session" SET expires_at = $1, updated_at = $2 WHERE token = $3"#)
            .bind(expires_at)
            .bind(Utc::now())
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_session(&self, token: &str) -> Result<(), AppError> {
        sqlx::query(r#"DELETE FROM "session" WHERE token = $1"#)
            .bind(token)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn list_sessions_for_user(&self, user_id: &str) -> Result<Vec<Session>, AppError> {
        let sessions = sqlx::query_as::<_, Session>(
            r#"
            SELECT * FROM "session"
            WHERE user_id = $1 AND expires_at > $2
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(Utc::now())
        .fetch_all(&self.pool)
        .await?;

        Ok(sessions)
    }
}
