//! Test doubles for the trait seams.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use profile_auth::{
    AuthError, AuthUser, IdentityProvider, LocalSessionHub, OAuthProvider,
    Result as AuthResult, Session, SessionSubscription, SignInOptions,
};
use profile_core::{ErrorLocation, Profile};
use profile_db::{DbError, ProfileStore, Result as DbResult};
use uuid::Uuid;

pub fn session_with(id: Uuid, email: Option<&str>) -> Session {
    Session {
        access_token: "token".to_string(),
        user: AuthUser {
            id,
            email: email.map(str::to_string),
        },
    }
}

pub fn session_for(email: Option<&str>) -> Session {
    session_with(Uuid::new_v4(), email)
}

fn generic_failure() -> DbError {
    DbError::Sqlx {
        source: sqlx::Error::PoolClosed,
        location: ErrorLocation::caller(),
    }
}

fn unique_failure() -> DbError {
    DbError::unique_violation("UNIQUE constraint failed: profiles.username")
}

#[derive(Default)]
struct Inner {
    rows: HashMap<Uuid, Profile>,
    find_calls: usize,
    check_calls: usize,
    insert_calls: usize,
    update_calls: usize,
    fail_next_find: bool,
    fail_next_insert: bool,
    fail_next_update: bool,
    unique_violation_on_update: bool,
}

/// In-memory `ProfileStore` with call counting, natural unique-constraint
/// emulation, and injectable failures for the race paths the real
/// constraint decides.
#[derive(Default)]
pub struct FakeProfileStore {
    inner: Mutex<Inner>,
}

impl FakeProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_profile(profile: Profile) -> Self {
        let store = Self::default();
        store.seed(profile);
        store
    }

    /// Seed a row without counting it as a store call.
    pub fn seed(&self, profile: Profile) {
        self.inner.lock().unwrap().rows.insert(profile.id, profile);
    }

    pub fn row(&self, id: Uuid) -> Option<Profile> {
        self.inner.lock().unwrap().rows.get(&id).cloned()
    }

    pub fn total_calls(&self) -> usize {
        let inner = self.inner.lock().unwrap();
        inner.find_calls + inner.check_calls + inner.insert_calls + inner.update_calls
    }

    pub fn insert_calls(&self) -> usize {
        self.inner.lock().unwrap().insert_calls
    }

    pub fn update_calls(&self) -> usize {
        self.inner.lock().unwrap().update_calls
    }

    pub fn fail_next_find(&self) {
        self.inner.lock().unwrap().fail_next_find = true;
    }

    pub fn fail_next_insert(&self) {
        self.inner.lock().unwrap().fail_next_insert = true;
    }

    pub fn fail_next_update(&self) {
        self.inner.lock().unwrap().fail_next_update = true;
    }

    /// The next update fails with `UniqueViolation` even though no
    /// conflicting row is visible: the window where another client won
    /// the race between pre-check and write.
    pub fn lose_update_race(&self) {
        self.inner.lock().unwrap().unique_violation_on_update = true;
    }
}

#[async_trait]
impl ProfileStore for FakeProfileStore {
    async fn find_by_id(&self, id: Uuid) -> DbResult<Option<Profile>> {
        let mut inner = self.inner.lock().unwrap();
        inner.find_calls += 1;
        if inner.fail_next_find {
            inner.fail_next_find = false;
            return Err(generic_failure());
        }
        Ok(inner.rows.get(&id).cloned())
    }

    async fn username_taken(&self, username: &str, excluding: Uuid) -> DbResult<bool> {
        let mut inner = self.inner.lock().unwrap();
        inner.check_calls += 1;
        Ok(inner
            .rows
            .values()
            .any(|p| p.username.as_deref() == Some(username) && p.id != excluding))
    }

    async fn insert(&self, profile: &Profile) -> DbResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.insert_calls += 1;
        if inner.fail_next_insert {
            inner.fail_next_insert = false;
            return Err(generic_failure());
        }
        if let Some(ref name) = profile.username {
            if inner
                .rows
                .values()
                .any(|p| p.username.as_deref() == Some(name))
            {
                return Err(unique_failure());
            }
        }
        if inner.rows.contains_key(&profile.id) {
            return Err(unique_failure());
        }
        inner.rows.insert(profile.id, profile.clone());
        Ok(())
    }

    async fn update_username(
        &self,
        id: Uuid,
        username: Option<&str>,
        updated_at: DateTime<Utc>,
    ) -> DbResult<()> {
        let mut inner = self.inner.lock().unwrap();
        inner.update_calls += 1;
        if inner.fail_next_update {
            inner.fail_next_update = false;
            return Err(generic_failure());
        }
        if inner.unique_violation_on_update {
            inner.unique_violation_on_update = false;
            return Err(unique_failure());
        }
        if let Some(name) = username {
            if inner
                .rows
                .values()
                .any(|p| p.username.as_deref() == Some(name) && p.id != id)
            {
                return Err(unique_failure());
            }
        }
        if let Some(row) = inner.rows.get_mut(&id) {
            row.username = username.map(str::to_string);
            row.updated_at = updated_at;
        }
        Ok(())
    }
}

/// Provider double whose every operation fails, for the error surfaces.
pub struct FailingProvider {
    hub: LocalSessionHub,
}

impl FailingProvider {
    pub fn new() -> Self {
        Self {
            hub: LocalSessionHub::new(),
        }
    }
}

#[async_trait]
impl IdentityProvider for FailingProvider {
    async fn current_session(&self) -> AuthResult<Option<Session>> {
        Err(AuthError::session_lookup("provider unreachable"))
    }

    fn subscribe(&self) -> SessionSubscription {
        self.hub.subscribe()
    }

    async fn sign_in_with_oauth(
        &self,
        _provider: OAuthProvider,
        _options: SignInOptions,
    ) -> AuthResult<()> {
        Err(AuthError::sign_in("provider unreachable"))
    }

    async fn sign_out(&self) -> AuthResult<()> {
        Err(AuthError::sign_out("provider unreachable"))
    }
}
