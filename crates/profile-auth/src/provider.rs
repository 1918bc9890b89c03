//! Port to the external identity provider.

use crate::{Result, Session, SessionSubscription};

use async_trait::async_trait;

/// OAuth providers the hosted sign-in flow can be delegated to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuthProvider {
    Google,
    GitHub,
}

impl OAuthProvider {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Google => "google",
            Self::GitHub => "github",
        }
    }
}

/// Options for a provider-hosted redirect flow.
#[derive(Debug, Clone)]
pub struct SignInOptions {
    /// URL the provider redirects back to after authentication, normally
    /// the app's own origin.
    pub redirect_to: String,
}

/// Boundary to the external identity provider. Injected into the session
/// gate so tests can substitute a double.
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    /// The currently established session, if any.
    async fn current_session(&self) -> Result<Option<Session>>;

    /// Acquire a handle on the session-change stream. The handle must be
    /// released with [`SessionSubscription::stop`] or by dropping it.
    fn subscribe(&self) -> SessionSubscription;

    /// Request a provider-hosted OAuth redirect flow.
    async fn sign_in_with_oauth(
        &self,
        provider: OAuthProvider,
        options: SignInOptions,
    ) -> Result<()>;

    /// Request termination of the current session. The resulting
    /// session-change event, not this call, is what moves observers out of
    /// their authenticated state.
    async fn sign_out(&self) -> Result<()>;
}
