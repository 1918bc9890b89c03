pub mod error;
pub mod provider;
pub mod session;
pub mod session_hub;
pub mod subscription;

pub use error::{AuthError, Result};
pub use provider::{IdentityProvider, OAuthProvider, SignInOptions};
pub use session::{AuthUser, Session, SessionEvent};
pub use session_hub::LocalSessionHub;
pub use subscription::SessionSubscription;
