//! Profile entity - the one persisted row per authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A profile holds the single user-editable field (`username`) for one
/// authenticated user. `id` always equals the identity provider's user id
/// and never changes after insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: Uuid,
    /// Unique across all profiles when present; NULL rows are exempt from
    /// the remote unique constraint.
    pub username: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl Profile {
    /// Create the row inserted on a user's first login, with the default
    /// username derived from the email local-part.
    pub fn from_first_login(id: Uuid, email: Option<&str>) -> Self {
        Self {
            id,
            username: email.and_then(default_username),
            updated_at: Utc::now(),
        }
    }
}

/// Substring of the email before the `@`. `None` when the local part is
/// empty; an address without an `@` is used whole.
pub fn default_username(email: &str) -> Option<String> {
    let local = match email.split_once('@') {
        Some((local, _)) => local,
        None => email,
    };
    if local.is_empty() {
        None
    } else {
        Some(local.to_string())
    }
}
