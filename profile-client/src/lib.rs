pub mod config;
pub mod error;
pub mod logger;
pub mod profile_editor;
pub mod session_gate;

pub use config::Config;
pub use error::{ClientError, Result};
pub use profile_editor::{
    fetch_or_create, EditorPhase, FetchOutcome, ProfileEditor, PROFILE_UPDATED_MESSAGE,
    USERNAME_TAKEN_MESSAGE,
};
pub use session_gate::{LoadTicket, Screen, SessionGate};
