//! User accounts

use crate::error::ApiError;
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use talentgate_auth::{Role, UserIdentity};
use talentgate_core::UserId;
use tracing::{debug, error, info};

/// Database user record
#[derive(Debug, sqlx::FromRow)]
struct UserRecord {
    id: i64,
    email: String,
    password_hash: String,
    roles: String, // JSON array of wire role strings
    created_at: String,
}

impl UserRecord {
    fn to_stored_user(&self) -> Result<StoredUser, ApiError> {
        let roles: Vec<Role> = serde_json::from_str(&self.roles)
            .map_err(|e| ApiError::Database(format!("Corrupt roles column: {}", e)))?;
        let created_at: DateTime<Utc> = self
            .created_at
            .parse()
            .map_err(|e| ApiError::Database(format!("Corrupt created_at column: {}", e)))?;

        Ok(StoredUser {
            id: self.id,
            email: self.email.clone(),
            password_hash: self.password_hash.clone(),
            roles,
            created_at,
        })
    }
}

/// A user account with its credential hash
#[derive(Debug, Clone)]
pub struct StoredUser {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub roles: Vec<Role>,
    pub created_at: DateTime<Utc>,
}

impl StoredUser {
    /// Verify a password against the stored hash
    pub fn verify_password(&self, password: &str) -> bool {
        verify_password(password, &self.password_hash).unwrap_or(false)
    }

    /// Identity snapshot used to mint tokens
    pub fn to_identity(&self) -> UserIdentity {
        UserIdentity::new(self.id, self.email.clone(), self.roles.clone())
    }
}

/// Database-backed user store
#[derive(Debug, Clone)]
pub struct UserStore {
    pool: SqlitePool,
}

impl UserStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the users table
    pub async fn create_tables(&self) -> Result<(), ApiError> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                email TEXT UNIQUE NOT NULL,
                password_hash TEXT NOT NULL,
                roles TEXT NOT NULL DEFAULT '[]',
                created_at TEXT NOT NULL
            );

            CREATE INDEX IF NOT EXISTS idx_users_email ON users(email);
        "#;

        sqlx::query(query).execute(&self.pool).await.map_err(|e| {
            error!("Failed to create users table: {}", e);
            ApiError::Database(e.to_string())
        })?;

        Ok(())
    }

    /// Ensure the platform super-admin account exists
    ///
    /// Dev default credentials, overridable by environment.
    pub async fn ensure_default_super_admin(&self) -> Result<(), ApiError> {
        let email = std::env::var("TALENTGATE_ADMIN_EMAIL")
            .unwrap_or_else(|_| "admin@talentgate.local".to_string());
        let password =
            std::env::var("TALENTGATE_ADMIN_PASSWORD").unwrap_or_else(|_| "admin123".to_string());

        if self.find_by_email(&email).await?.is_some() {
            debug!("Super admin account already exists");
            return Ok(());
        }

        self.create_user(&email, &password, vec![Role::SuperAdmin])
            .await?;
        info!("Created default super admin account: {}", email);
        Ok(())
    }

    /// Create a user with a hashed password
    pub async fn create_user(
        &self,
        email: &str,
        password: &str,
        roles: Vec<Role>,
    ) -> Result<StoredUser, ApiError> {
        if self.find_by_email(email).await?.is_some() {
            debug!("Registration rejected, email already exists: {}", email);
            return Err(ApiError::DuplicateEmail);
        }

        let password_hash = hash_password(password)?;
        let roles_json = serde_json::to_string(&roles)
            .map_err(|e| ApiError::Database(format!("Failed to encode roles: {}", e)))?;
        let created_at = Utc::now();

        let result = sqlx::query(
            "INSERT INTO users (email, password_hash, roles, created_at) VALUES (?, ?, ?, ?)",
        )
        .bind(email)
        .bind(&password_hash)
        .bind(&roles_json)
        .bind(created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to insert user: {}", e);
            ApiError::Database(e.to_string())
        })?;

        Ok(StoredUser {
            id: result.last_insert_rowid(),
            email: email.to_string(),
            password_hash,
            roles,
            created_at,
        })
    }

    /// Point lookup by email
    pub async fn find_by_email(&self, email: &str) -> Result<Option<StoredUser>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE email = ?")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to query user by email: {}", e);
                ApiError::Database(e.to_string())
            })?;

        row.map(|r| r.to_stored_user()).transpose()
    }

    /// Point lookup by id
    pub async fn find_by_id(&self, user_id: UserId) -> Result<Option<StoredUser>, ApiError> {
        let row = sqlx::query_as::<_, UserRecord>("SELECT * FROM users WHERE id = ?")
            .bind(user_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to query user by id: {}", e);
                ApiError::Database(e.to_string())
            })?;

        row.map(|r| r.to_stored_user()).transpose()
    }

    /// List all accounts (admin surface)
    pub async fn list(&self) -> Result<Vec<StoredUser>, ApiError> {
        let rows = sqlx::query_as::<_, UserRecord>("SELECT * FROM users ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to list users: {}", e);
                ApiError::Database(e.to_string())
            })?;

        rows.iter().map(|r| r.to_stored_user()).collect()
    }
}

/// Hash password using Argon2
fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::Database(format!("Password hashing failed: {}", e)))
}

/// Verify password against hash
fn verify_password(password: &str, hash: &str) -> Result<bool, ApiError> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| ApiError::Database(format!("Corrupt hash: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}
