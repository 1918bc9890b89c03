//! In-process identity provider.
//!
//! The hosted provider's redirect dance happens outside this client;
//! `LocalSessionHub` is the in-process seam that stands in for it. The
//! binary drives it from a configured dev identity, and whatever completes
//! a real OAuth flow calls [`establish`](LocalSessionHub::establish) /
//! [`clear`](LocalSessionHub::clear) to push the resulting transitions to
//! subscribers.

use crate::{
    AuthError, AuthUser, IdentityProvider, OAuthProvider, Result, Session, SessionEvent,
    SessionSubscription, SignInOptions,
};

use async_trait::async_trait;
use log::info;
use tokio::sync::broadcast;
use tokio::sync::RwLock;
use uuid::Uuid;

const EVENT_CAPACITY: usize = 16;

pub struct LocalSessionHub {
    current: RwLock<Option<Session>>,
    events: broadcast::Sender<SessionEvent>,
    /// Identity handed out by `sign_in_with_oauth`. `None` means sign-in
    /// requests fail, as they do when no provider is reachable.
    dev_identity: Option<AuthUser>,
}

impl LocalSessionHub {
    pub fn new() -> Self {
        Self::with_dev_identity(None)
    }

    pub fn with_dev_identity(dev_identity: Option<AuthUser>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            current: RwLock::new(None),
            events,
            dev_identity,
        }
    }

    /// Install a session, as the hosted provider does after a completed
    /// redirect flow, and notify subscribers.
    pub async fn establish(&self, session: Session) {
        *self.current.write().await = Some(session.clone());
        let _ = self.events.send(SessionEvent::SignedIn(session));
    }

    /// Drop the current session and notify subscribers.
    pub async fn clear(&self) {
        *self.current.write().await = None;
        let _ = self.events.send(SessionEvent::SignedOut);
    }
}

impl Default for LocalSessionHub {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl IdentityProvider for LocalSessionHub {
    async fn current_session(&self) -> Result<Option<Session>> {
        Ok(self.current.read().await.clone())
    }

    fn subscribe(&self) -> SessionSubscription {
        SessionSubscription::new(self.events.subscribe())
    }

    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        options: SignInOptions,
    ) -> Result<()> {
        let user = self.dev_identity.clone().ok_or_else(|| {
            AuthError::sign_in(format!(
                "no identity configured for {} sign-in",
                provider.as_str()
            ))
        })?;

        info!(
            "{} sign-in for {}, redirect_to={}",
            provider.as_str(),
            user.id,
            options.redirect_to
        );

        self.establish(Session {
            access_token: Uuid::new_v4().to_string(),
            user,
        })
        .await;

        Ok(())
    }

    async fn sign_out(&self) -> Result<()> {
        self.clear().await;
        Ok(())
    }
}
