//! Local edit buffer for the profile's editable fields.

/// Unsaved username edits plus the last value known to be persisted
/// remotely. `username == original_username` is the sole clean/dirty
/// signal gating whether a save is permitted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EditBuffer {
    pub username: Option<String>,
    pub original_username: Option<String>,
}

impl EditBuffer {
    /// Seed both fields from a persisted value; the buffer starts clean.
    pub fn seeded(username: Option<String>) -> Self {
        Self {
            username: username.clone(),
            original_username: username,
        }
    }

    pub fn is_dirty(&self) -> bool {
        self.username != self.original_username
    }

    /// Replace the live value. Empty and whitespace-only input clears the
    /// field to `None`.
    pub fn set_username(&mut self, value: &str) {
        let trimmed = value.trim();
        self.username = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
    }

    /// Re-baseline after a successful save: the live value becomes the
    /// last-persisted value and the buffer is clean again.
    pub fn mark_saved(&mut self) {
        self.original_username = self.username.clone();
    }
}
