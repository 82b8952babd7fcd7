/// Database implementation
use crate::error::{Result, StorageError};
use warden_core::{NewToken, Storage, StoredToken, TokenId, User, UserId, WardenError};

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::str::FromStr;

/// SQLite database backing the Warden identity store
pub struct Database {
    pool: SqlitePool,
}

impl Database {
    /// Create a new database connection
    ///
    /// # Errors
    /// Returns an error if the connection fails or migrations fail
    pub async fn new(database_url: &str) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);

        // An in-memory SQLite database exists per connection; a pool with
        // more than one would scatter the schema across invisible copies.
        let max_connections = if database_url.contains(":memory:") {
            1
        } else {
            5
        };

        let pool = SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::run_migrations(&pool).await?;

        Ok(Self { pool })
    }

    /// Create database from an existing pool (for testing)
    pub fn from_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Get a reference to the underlying pool (for testing)
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Run database migrations
    async fn run_migrations(pool: &SqlitePool) -> Result<()> {
        // Embedded migrations for reliability
        const MIGRATIONS: &[&str] = &[
            include_str!("../migrations/20250801000001_create_users.sql"),
            include_str!("../migrations/20250801000002_create_user_credentials.sql"),
            include_str!("../migrations/20250801000003_create_access_tokens.sql"),
        ];

        for migration in MIGRATIONS {
            // Each migration file may hold several statements
            for statement in migration.split(';').filter(|s| !s.trim().is_empty()) {
                sqlx::query(statement)
                    .execute(pool)
                    .await
                    .map_err(|e| StorageError::Migration(e.to_string()))?;
            }
        }

        Ok(())
    }
}

/// Map a sqlx error onto the core taxonomy, surfacing unique-constraint
/// violations as duplicates
fn map_sqlx_err(err: sqlx::Error) -> WardenError {
    let msg = err.to_string();
    if msg.contains("UNIQUE constraint failed") {
        WardenError::duplicate(msg)
    } else {
        WardenError::storage(msg)
    }
}

fn row_to_user(row: &sqlx::sqlite::SqliteRow) -> warden_core::Result<User> {
    let created_at = chrono::DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
        .ok_or_else(|| WardenError::storage("Invalid timestamp"))?;

    Ok(User {
        id: UserId::new(row.get::<i64, _>("id")),
        name: row.get("name"),
        email: row.get("email"),
        created_at: created_at.to_rfc3339(),
    })
}

fn row_to_token(row: &sqlx::sqlite::SqliteRow) -> warden_core::Result<StoredToken> {
    let abilities: Vec<String> = serde_json::from_str(&row.get::<String, _>("abilities"))
        .map_err(|e| WardenError::storage(format!("Invalid abilities column: {}", e)))?;

    let expires_at = row
        .get::<Option<i64>, _>("expires_at")
        .map(|ts| {
            chrono::DateTime::from_timestamp(ts, 0)
                .ok_or_else(|| WardenError::storage("Invalid timestamp"))
        })
        .transpose()?;

    let created_at = chrono::DateTime::from_timestamp(row.get::<i64, _>("created_at"), 0)
        .ok_or_else(|| WardenError::storage("Invalid timestamp"))?;

    Ok(StoredToken {
        id: TokenId::new(row.get::<i64, _>("id")),
        user_id: UserId::new(row.get::<i64, _>("user_id")),
        name: row.get("name"),
        secret_hash: row.get("secret_hash"),
        abilities,
        expires_at,
        created_at,
    })
}

impl Storage for Database {
    // User operations

    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> warden_core::Result<User> {
        // Truncate to whole seconds so the returned record matches what a
        // later read reconstructs from the stored timestamp.
        let timestamp = chrono::Utc::now().timestamp();
        let created_at = chrono::DateTime::from_timestamp(timestamp, 0)
            .ok_or_else(|| WardenError::storage("Invalid timestamp"))?;

        let mut tx = self.pool.begin().await.map_err(map_sqlx_err)?;

        let result = sqlx::query("INSERT INTO users (name, email, created_at) VALUES (?, ?, ?)")
            .bind(name)
            .bind(email)
            .bind(timestamp)
            .execute(&mut *tx)
            .await
            .map_err(map_sqlx_err)?;

        let user_id = result.last_insert_rowid();

        sqlx::query(
            "INSERT INTO user_credentials (user_id, password_hash, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(password_hash)
        .bind(timestamp)
        .bind(timestamp)
        .execute(&mut *tx)
        .await
        .map_err(map_sqlx_err)?;

        tx.commit().await.map_err(map_sqlx_err)?;

        Ok(User {
            id: UserId::new(user_id),
            name: name.to_string(),
            email: email.to_string(),
            created_at: created_at.to_rfc3339(),
        })
    }

    async fn get_user(&self, id: UserId) -> warden_core::Result<User> {
        let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?
            .ok_or_else(|| WardenError::not_found("User", id.to_string()))?;

        row_to_user(&row)
    }

    async fn find_user_by_email(&self, email: &str) -> warden_core::Result<Option<User>> {
        let row = sqlx::query("SELECT id, name, email, created_at FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        row.as_ref().map(row_to_user).transpose()
    }

    async fn get_all_users(&self) -> warden_core::Result<Vec<User>> {
        let rows = sqlx::query("SELECT id, name, email, created_at FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        rows.iter().map(row_to_user).collect()
    }

    async fn get_password_hash(&self, id: UserId) -> warden_core::Result<String> {
        let row = sqlx::query("SELECT password_hash FROM user_credentials WHERE user_id = ?")
            .bind(id.as_i64())
            .fetch_optional(&self.pool)
            .await
            .map_err(map_sqlx_err)?
            .ok_or_else(|| WardenError::not_found("User", id.to_string()))?;

        Ok(row.get("password_hash"))
    }

    // Token operations

    async fn create_token(&self, token: NewToken) -> warden_core::Result<TokenId> {
        let abilities = serde_json::to_string(&token.abilities)?;

        let result = sqlx::query(
            "INSERT INTO access_tokens (user_id, name, secret_hash, abilities, expires_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(token.user_id.as_i64())
        .bind(&token.name)
        .bind(&token.secret_hash)
        .bind(abilities)
        .bind(token.expires_at.map(|t| t.timestamp()))
        .bind(chrono::Utc::now().timestamp())
        .execute(&self.pool)
        .await
        .map_err(map_sqlx_err)?;

        Ok(TokenId::new(result.last_insert_rowid()))
    }

    async fn get_token(&self, id: TokenId) -> warden_core::Result<StoredToken> {
        let row = sqlx::query(
            "SELECT id, user_id, name, secret_hash, abilities, expires_at, created_at
             FROM access_tokens WHERE id = ?",
        )
        .bind(id.as_i64())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_sqlx_err)?
        .ok_or_else(|| WardenError::not_found("Token", id.to_string()))?;

        row_to_token(&row)
    }

    async fn delete_user_tokens(&self, user_id: UserId) -> warden_core::Result<u64> {
        let result = sqlx::query("DELETE FROM access_tokens WHERE user_id = ?")
            .bind(user_id.as_i64())
            .execute(&self.pool)
            .await
            .map_err(map_sqlx_err)?;

        Ok(result.rows_affected())
    }
}
