//! SQLite-backed profile repository.
//!
//! Queries are bound at runtime (`sqlx::query`, not the compile-time
//! macros) so the crate builds without a database or offline query data.

use crate::{DbError, ProfileStore, Result as DbErrorResult};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profile_core::Profile;
use sqlx::sqlite::SqliteRow;
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

pub struct ProfileRepository {
    pool: SqlitePool,
}

impl ProfileRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

fn decode_profile(row: &SqliteRow) -> DbErrorResult<Profile> {
    let id: String = row.try_get("id")?;
    let username: Option<String> = row.try_get("username")?;
    let updated_at: i64 = row.try_get("updated_at")?;

    Ok(Profile {
        id: Uuid::parse_str(&id)
            .map_err(|e| DbError::decode(format!("invalid UUID in profiles.id: {}", e)))?,
        username,
        updated_at: DateTime::from_timestamp(updated_at, 0)
            .ok_or_else(|| DbError::decode("invalid timestamp in profiles.updated_at"))?,
    })
}

#[async_trait]
impl ProfileStore for ProfileRepository {
    async fn find_by_id(&self, id: Uuid) -> DbErrorResult<Option<Profile>> {
        let id = id.to_string();

        let row = sqlx::query(
            r#"
                SELECT id, username, updated_at
                FROM profiles
                WHERE id = ?
            "#,
        )
        .bind(&id)
        .fetch_optional(&self.pool)
        .await?;

        row.as_ref().map(decode_profile).transpose()
    }

    async fn username_taken(&self, username: &str, excluding: Uuid) -> DbErrorResult<bool> {
        let excluding = excluding.to_string();

        let row = sqlx::query(
            r#"
                SELECT id
                FROM profiles
                WHERE username = ? AND id <> ?
            "#,
        )
        .bind(username)
        .bind(&excluding)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.is_some())
    }

    async fn insert(&self, profile: &Profile) -> DbErrorResult<()> {
        let id = profile.id.to_string();
        let updated_at = profile.updated_at.timestamp();

        sqlx::query(
            r#"
                INSERT INTO profiles (id, username, updated_at)
                VALUES (?, ?, ?)
            "#,
        )
        .bind(&id)
        .bind(&profile.username)
        .bind(updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_username(
        &self,
        id: Uuid,
        username: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> DbErrorResult<()> {
        let id = id.to_string();
        let updated_at = updated_at.timestamp();

        sqlx::query(
            r#"
                UPDATE profiles
                SET username = ?, updated_at = ?
                WHERE id = ?
            "#,
        )
        .bind(username)
        .bind(updated_at)
        .bind(&id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}
