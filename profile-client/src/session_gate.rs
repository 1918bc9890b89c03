//! Session-gated top level: sign-in prompt or profile editor.

use crate::profile_editor::{fetch_or_create, FetchOutcome, ProfileEditor};

use std::sync::Arc;

use log::{debug, error, info};
use profile_auth::{
    IdentityProvider, OAuthProvider, Session, SessionEvent, SessionSubscription, SignInOptions,
};
use profile_db::ProfileStore;
use uuid::Uuid;

/// What the gate currently shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    SignInPrompt,
    Editor,
}

/// Ticket for one fetch-or-create in flight. A commit whose ticket
/// generation no longer matches the mounted editor is discarded: the
/// response belongs to a previous identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
    user_id: Uuid,
}

impl LoadTicket {
    pub fn user_id(&self) -> Uuid {
        self.user_id
    }
}

/// Owns the authentication lifecycle: observes session transitions from
/// the identity provider and keeps exactly one of {sign-in prompt,
/// profile editor} mounted. Holds no business logic beyond that.
pub struct SessionGate {
    provider: Arc<dyn IdentityProvider>,
    store: Arc<dyn ProfileStore>,
    app_origin: String,
    session: Option<Session>,
    editor: Option<ProfileEditor>,
    /// Bumped whenever the editor is destroyed or recreated; stale load
    /// commits are rejected against it.
    generation: u64,
    subscription: Option<SessionSubscription>,
    last_error: Option<String>,
}

impl SessionGate {
    pub fn new(
        provider: Arc<dyn IdentityProvider>,
        store: Arc<dyn ProfileStore>,
        app_origin: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            store,
            app_origin: app_origin.into(),
            session: None,
            editor: None,
            generation: 0,
            subscription: None,
            last_error: None,
        }
    }

    /// Subscribe to session changes, then fetch the current session as
    /// initial state. Subscribing first leaves no gap a transition could
    /// fall into.
    pub async fn start(&mut self) {
        self.subscription = Some(self.provider.subscribe());
        match self.provider.current_session().await {
            Ok(session) => self.apply_session(session),
            Err(e) => {
                error!("session bootstrap failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    /// Wait for the next session-change event and apply it. Returns false
    /// once the subscription has ended.
    pub async fn pump(&mut self) -> bool {
        let Some(subscription) = self.subscription.as_mut() else {
            return false;
        };
        match subscription.next().await {
            Some(event) => {
                self.apply_event(event);
                true
            }
            None => false,
        }
    }

    pub fn apply_event(&mut self, event: SessionEvent) {
        self.apply_session(event.into_session());
    }

    /// Replace the held session (even with `None`, even for the same
    /// user). The editor is destroyed and recreated whenever the user id
    /// changes; a same-user event keeps the mounted instance and only
    /// swaps the session it holds.
    pub fn apply_session(&mut self, next: Option<Session>) {
        let next_id = next.as_ref().map(|s| s.user.id);
        let mounted_id = self.editor.as_ref().map(|e| e.user_id());

        self.session = next.clone();

        if next_id == mounted_id {
            if let (Some(editor), Some(session)) = (self.editor.as_mut(), next) {
                editor.replace_session(session);
            }
            return;
        }

        self.generation += 1;
        self.editor = next.map(|session| {
            info!("mounting editor for {}", session.user.id);
            ProfileEditor::new(session, Arc::clone(&self.store), Arc::clone(&self.provider))
        });
    }

    /// Ticket for the mounted editor's pending fetch-or-create. `None`
    /// when nothing is mounted or the editor already loaded.
    pub fn load_ticket(&self) -> Option<LoadTicket> {
        self.editor
            .as_ref()
            .filter(|e| e.is_loading())
            .map(|e| LoadTicket {
                generation: self.generation,
                user_id: e.user_id(),
            })
    }

    /// Commit a fetch-or-create outcome if its ticket still names the
    /// mounted editor; stale outcomes are dropped unapplied.
    pub fn commit_profile_load(&mut self, ticket: LoadTicket, outcome: FetchOutcome) {
        if ticket.generation != self.generation {
            debug!("discarding stale profile load for {}", ticket.user_id);
            return;
        }
        if let Some(editor) = self.editor.as_mut() {
            editor.commit_fetch(outcome);
        }
    }

    /// Run the mounted editor's fetch-or-create to completion and commit
    /// the outcome. No-op when nothing is waiting to load.
    pub async fn load_profile(&mut self) {
        let Some(ticket) = self.load_ticket() else {
            return;
        };
        let email = self
            .session
            .as_ref()
            .and_then(|s| s.user.email.clone());

        let outcome = fetch_or_create(self.store.as_ref(), ticket.user_id, email.as_deref()).await;
        self.commit_profile_load(ticket, outcome);
    }

    pub fn screen(&self) -> Screen {
        if self.editor.is_some() {
            Screen::Editor
        } else {
            Screen::SignInPrompt
        }
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn editor(&self) -> Option<&ProfileEditor> {
        self.editor.as_ref()
    }

    pub fn editor_mut(&mut self) -> Option<&mut ProfileEditor> {
        self.editor.as_mut()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// Request the provider-hosted OAuth flow, redirecting back to the
    /// app's own origin. Failure lands in `last_error`, never a panic.
    pub async fn sign_in(&mut self, oauth: OAuthProvider) {
        self.last_error = None;
        let options = SignInOptions {
            redirect_to: self.app_origin.clone(),
        };
        if let Err(e) = self.provider.sign_in_with_oauth(oauth, options).await {
            error!("{} sign-in failed: {}", oauth.as_str(), e);
            self.last_error = Some(e.to_string());
        }
    }

    /// Release the session subscription.
    pub fn stop(&mut self) {
        if let Some(mut subscription) = self.subscription.take() {
            subscription.stop();
        }
    }
}
