//! Identity-session types observed from the external provider.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The authenticated user carried inside a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthUser {
    /// Stable unique identifier assigned by the identity provider.
    pub id: Uuid,
    pub email: Option<String>,
}

/// A provider session: opaque token plus the user it belongs to. Created
/// and destroyed only by the provider; this client observes transitions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub user: AuthUser,
}

/// One session-change notification from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn(Session),
    SignedOut,
}

impl SessionEvent {
    pub fn session(&self) -> Option<&Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut => None,
        }
    }

    pub fn into_session(self) -> Option<Session> {
        match self {
            Self::SignedIn(session) => Some(session),
            Self::SignedOut => None,
        }
    }
}
