use profile_core::ErrorLocation;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Sign-in failed: {message} {location}")]
    SignIn {
        message: String,
        location: ErrorLocation,
    },

    #[error("Sign-out failed: {message} {location}")]
    SignOut {
        message: String,
        location: ErrorLocation,
    },

    #[error("Session lookup failed: {message} {location}")]
    SessionLookup {
        message: String,
        location: ErrorLocation,
    },
}

impl AuthError {
    #[track_caller]
    pub fn sign_in(message: impl Into<String>) -> Self {
        Self::SignIn {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn sign_out(message: impl Into<String>) -> Self {
        Self::SignOut {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }

    #[track_caller]
    pub fn session_lookup(message: impl Into<String>) -> Self {
        Self::SessionLookup {
            message: message.into(),
            location: ErrorLocation::caller(),
        }
    }
}

pub type Result<T> = std::result::Result<T, AuthError>;
