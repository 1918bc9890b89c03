//! Editor state for the one profile row of the authenticated user.
//!
//! Lifecycle per mounted instance: `Loading -> Ready -> Saving -> Ready`.
//! Error states are message-carrying sub-states of `Ready`, never
//! terminal; every failure path returns the editor to an interactive
//! state.

use std::sync::Arc;

use chrono::Utc;
use log::{error, info};
use profile_auth::{IdentityProvider, Session};
use profile_core::{EditBuffer, Profile};
use profile_db::{DbError, ProfileStore};
use uuid::Uuid;

/// The single user-facing message for every path a username write can
/// conflict on, advisory pre-check and remote constraint alike.
pub const USERNAME_TAKEN_MESSAGE: &str =
    "This username is already taken. Please choose another one.";

pub const PROFILE_UPDATED_MESSAGE: &str = "Profile updated successfully!";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorPhase {
    Loading,
    Ready,
    Saving,
}

/// Outcome of the mount-time fetch-or-create, produced away from the
/// editor state so a stale response can be discarded before commit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    Existing { username: Option<String> },
    Created { username: Option<String> },
    Failed { message: String },
}

/// Fetch the user's profile row, inserting a default derived from the
/// email local-part when no row exists yet. A missing row is a valid
/// outcome, not an error. Never retries; an insert failure (including a
/// unique violation on the derived default) is reported as-is.
pub async fn fetch_or_create(
    store: &dyn ProfileStore,
    user_id: Uuid,
    email: Option<&str>,
) -> FetchOutcome {
    match store.find_by_id(user_id).await {
        Ok(Some(profile)) => FetchOutcome::Existing {
            username: profile.username,
        },
        Ok(None) => {
            let profile = Profile::from_first_login(user_id, email);
            match store.insert(&profile).await {
                Ok(()) => {
                    info!("created profile for {}", user_id);
                    FetchOutcome::Created {
                        username: profile.username,
                    }
                }
                Err(DbError::UniqueViolation { .. }) => FetchOutcome::Failed {
                    message: USERNAME_TAKEN_MESSAGE.to_string(),
                },
                Err(e) => FetchOutcome::Failed {
                    message: e.to_string(),
                },
            }
        }
        Err(e) => FetchOutcome::Failed {
            message: e.to_string(),
        },
    }
}

/// Keeps the local edit buffer synchronized with exactly one profile row.
/// One instance per authenticated identity; the session gate destroys and
/// recreates it whenever the observed user id changes.
pub struct ProfileEditor {
    session: Session,
    store: Arc<dyn ProfileStore>,
    provider: Arc<dyn IdentityProvider>,
    phase: EditorPhase,
    buffer: EditBuffer,
    error: Option<String>,
    notice: Option<String>,
}

impl ProfileEditor {
    /// A fresh editor starts in `Loading`; interactive controls stay
    /// gated until a fetch-or-create outcome is committed.
    pub fn new(
        session: Session,
        store: Arc<dyn ProfileStore>,
        provider: Arc<dyn IdentityProvider>,
    ) -> Self {
        Self {
            session,
            store,
            provider,
            phase: EditorPhase::Loading,
            buffer: EditBuffer::default(),
            error: None,
            notice: None,
        }
    }

    pub fn user_id(&self) -> Uuid {
        self.session.user.id
    }

    pub fn email(&self) -> Option<&str> {
        self.session.user.email.as_deref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Swap in a refreshed session for the same user. The gate never
    /// routes a different user's session here.
    pub(crate) fn replace_session(&mut self, session: Session) {
        debug_assert_eq!(session.user.id, self.session.user.id);
        self.session = session;
    }

    pub fn phase(&self) -> EditorPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == EditorPhase::Loading
    }

    pub fn is_saving(&self) -> bool {
        self.phase == EditorPhase::Saving
    }

    pub fn buffer(&self) -> &EditBuffer {
        &self.buffer
    }

    pub fn username(&self) -> Option<&str> {
        self.buffer.username.as_deref()
    }

    pub fn is_dirty(&self) -> bool {
        self.buffer.is_dirty()
    }

    /// Whether the save control is enabled: ready and dirty.
    pub fn can_save(&self) -> bool {
        self.phase == EditorPhase::Ready && self.buffer.is_dirty()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    /// Edit the live username value. Ignored while loading or saving;
    /// those phases gate all interactive controls.
    pub fn set_username(&mut self, value: &str) {
        if self.phase != EditorPhase::Ready {
            return;
        }
        self.buffer.set_username(value);
    }

    /// Apply a fetch-or-create outcome. The gate only routes outcomes
    /// whose load ticket still names this instance, so a slow response
    /// from a previous identity can never seed this buffer.
    pub fn commit_fetch(&mut self, outcome: FetchOutcome) {
        match outcome {
            FetchOutcome::Existing { username } | FetchOutcome::Created { username } => {
                self.buffer = EditBuffer::seeded(username);
                self.error = None;
            }
            FetchOutcome::Failed { message } => {
                error!("profile load failed for {}: {}", self.user_id(), message);
                // Buffer stays at whatever was set before the failure.
                self.error = Some(message);
            }
        }
        self.phase = EditorPhase::Ready;
    }

    /// Persist the edit buffer. A clean buffer is a no-op with zero store
    /// calls; `can_save` disables the control for the same condition, so
    /// the check here is defense in depth.
    pub async fn save(&mut self) {
        if self.phase != EditorPhase::Ready || !self.buffer.is_dirty() {
            return;
        }

        self.phase = EditorPhase::Saving;
        self.error = None;
        self.notice = None;

        let user_id = self.user_id();
        let candidate = self.buffer.username.clone();

        // Advisory pre-check. Not atomic with the update below: a
        // concurrent client can still claim the name in between, and the
        // remote unique constraint decides the winner.
        if let Some(ref name) = candidate {
            match self.store.username_taken(name, user_id).await {
                Ok(true) => {
                    self.error = Some(USERNAME_TAKEN_MESSAGE.to_string());
                    self.phase = EditorPhase::Ready;
                    return;
                }
                Ok(false) => {}
                Err(e) => {
                    error!("username pre-check failed for {}: {}", user_id, e);
                    self.error = Some(e.to_string());
                    self.phase = EditorPhase::Ready;
                    return;
                }
            }
        }

        match self
            .store
            .update_username(user_id, candidate.as_deref(), Utc::now())
            .await
        {
            Ok(()) => {
                self.buffer.mark_saved();
                self.notice = Some(PROFILE_UPDATED_MESSAGE.to_string());
                info!("profile updated for {}", user_id);
            }
            Err(DbError::UniqueViolation { .. }) => {
                // Authoritative outcome of the race the pre-check could
                // not prevent. Buffer stays dirty for a retry.
                self.error = Some(USERNAME_TAKEN_MESSAGE.to_string());
            }
            Err(e) => {
                error!("profile update failed for {}: {}", user_id, e);
                self.error = Some(e.to_string());
            }
        }

        self.phase = EditorPhase::Ready;
    }

    /// Request session termination from the provider. Local state is left
    /// untouched; the session-change event, not this call, is what moves
    /// the gate back to the sign-in prompt.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.provider.sign_out().await {
            error!("sign-out failed for {}: {}", self.user_id(), e);
            self.error = Some(e.to_string());
        }
    }
}
