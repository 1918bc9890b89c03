//! Port for profile persistence.

use crate::Result;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profile_core::Profile;
use uuid::Uuid;

/// Data access for the `profiles` table. Absence of a row is `Ok(None)`,
/// never an error; uniqueness conflicts surface as
/// [`DbError::UniqueViolation`](crate::DbError::UniqueViolation).
#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>>;

    /// Advisory check whether `username` is held by a profile other than
    /// `excluding`. Not atomic with any following write; a concurrent
    /// client can still claim the name in between, and only the remote
    /// unique constraint decides the winner.
    async fn username_taken(&self, username: &str, excluding: Uuid) -> Result<bool>;

    async fn insert(&self, profile: &Profile) -> Result<()>;

    async fn update_username(
        &self,
        id: Uuid,
        username: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> Result<()>;
}
