//! Companies and memberships

use crate::error::ApiError;
use sqlx::{Row, SqlitePool};
use talentgate_core::{
    Company, CompanyId, CompanyMembership, MembershipRole, MembershipStatus, UserId,
};
use tracing::error;

/// Database-backed company and membership store
#[derive(Debug, Clone)]
pub struct CompanyStore {
    pool: SqlitePool,
}

impl CompanyStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Create the companies and memberships tables
    pub async fn create_tables(&self) -> Result<(), ApiError> {
        let query = r#"
            CREATE TABLE IF NOT EXISTS companies (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                admin_id INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS company_memberships (
                user_id INTEGER NOT NULL,
                company_id INTEGER NOT NULL,
                role TEXT NOT NULL,
                status TEXT NOT NULL,
                UNIQUE(user_id, company_id)
            );
        "#;

        sqlx::query(query).execute(&self.pool).await.map_err(|e| {
            error!("Failed to create company tables: {}", e);
            ApiError::Database(e.to_string())
        })?;

        Ok(())
    }

    /// Create a company owned by the given user
    pub async fn create(&self, name: &str, admin_id: UserId) -> Result<Company, ApiError> {
        let result = sqlx::query("INSERT INTO companies (name, admin_id) VALUES (?, ?)")
            .bind(name)
            .bind(admin_id)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to insert company: {}", e);
                ApiError::Database(e.to_string())
            })?;

        Ok(Company {
            id: result.last_insert_rowid(),
            name: name.to_string(),
            admin_id,
        })
    }

    /// Point lookup by company id
    pub async fn find(&self, company_id: CompanyId) -> Result<Option<Company>, ApiError> {
        let row = sqlx::query("SELECT id, name, admin_id FROM companies WHERE id = ?")
            .bind(company_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Failed to query company: {}", e);
                ApiError::Database(e.to_string())
            })?;

        Ok(row.map(|r| Company {
            id: r.get("id"),
            name: r.get("name"),
            admin_id: r.get("admin_id"),
        }))
    }

    /// Add a membership row; the unique (user, company) constraint keeps at
    /// most one row authoritative per pair
    pub async fn add_member(
        &self,
        company_id: CompanyId,
        user_id: UserId,
        role: MembershipRole,
        status: MembershipStatus,
    ) -> Result<CompanyMembership, ApiError> {
        sqlx::query(
            "INSERT INTO company_memberships (user_id, company_id, role, status) VALUES (?, ?, ?, ?)",
        )
        .bind(user_id)
        .bind(company_id)
        .bind(role.to_string())
        .bind(status.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => {
                ApiError::Validation("User is already a member of this company".to_string())
            }
            e => {
                error!("Failed to insert membership: {}", e);
                ApiError::Database(e.to_string())
            }
        })?;

        Ok(CompanyMembership {
            user_id,
            company_id,
            role,
            status,
        })
    }

    /// Single-row status update; reports whether the row existed
    pub async fn set_member_status(
        &self,
        company_id: CompanyId,
        user_id: UserId,
        status: MembershipStatus,
    ) -> Result<bool, ApiError> {
        let result = sqlx::query(
            "UPDATE company_memberships SET status = ? WHERE company_id = ? AND user_id = ?",
        )
        .bind(status.to_string())
        .bind(company_id)
        .bind(user_id)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to update membership status: {}", e);
            ApiError::Database(e.to_string())
        })?;

        Ok(result.rows_affected() > 0)
    }

    /// Point lookup of the active membership for (user, company), if any
    pub async fn active_membership(
        &self,
        user_id: UserId,
        company_id: CompanyId,
    ) -> Result<Option<CompanyMembership>, ApiError> {
        let row = sqlx::query(
            "SELECT user_id, company_id, role, status FROM company_memberships \
             WHERE user_id = ? AND company_id = ? AND status = 'active'",
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to query membership: {}", e);
            ApiError::Database(e.to_string())
        })?;

        row.map(|r| parse_membership(&r)).transpose()
    }

    /// Membership row for (user, company) regardless of status
    pub async fn membership(
        &self,
        user_id: UserId,
        company_id: CompanyId,
    ) -> Result<Option<CompanyMembership>, ApiError> {
        let row = sqlx::query(
            "SELECT user_id, company_id, role, status FROM company_memberships \
             WHERE user_id = ? AND company_id = ?",
        )
        .bind(user_id)
        .bind(company_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to query membership: {}", e);
            ApiError::Database(e.to_string())
        })?;

        row.map(|r| parse_membership(&r)).transpose()
    }

    /// All membership rows of a company
    pub async fn list_members(
        &self,
        company_id: CompanyId,
    ) -> Result<Vec<CompanyMembership>, ApiError> {
        let rows = sqlx::query(
            "SELECT user_id, company_id, role, status FROM company_memberships \
             WHERE company_id = ? ORDER BY user_id",
        )
        .bind(company_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Failed to list members: {}", e);
            ApiError::Database(e.to_string())
        })?;

        rows.iter().map(parse_membership).collect()
    }
}

fn parse_membership(row: &sqlx::sqlite::SqliteRow) -> Result<CompanyMembership, ApiError> {
    let role: String = row.get("role");
    let status: String = row.get("status");
    Ok(CompanyMembership {
        user_id: row.get("user_id"),
        company_id: row.get("company_id"),
        role: role
            .parse::<MembershipRole>()
            .map_err(|e| ApiError::Database(format!("Corrupt membership row: {}", e)))?,
        status: status
            .parse::<MembershipStatus>()
            .map_err(|e| ApiError::Database(format!("Corrupt membership row: {}", e)))?,
    })
}
