use chrono::{DateTime, Utc};
use profile_core::Profile;
use uuid::Uuid;

pub fn fixed_time() -> DateTime<Utc> {
    DateTime::from_timestamp(1_700_000_000, 0).unwrap()
}

pub fn profile_with_username(username: &str) -> Profile {
    Profile {
        id: Uuid::new_v4(),
        username: Some(username.to_string()),
        updated_at: fixed_time(),
    }
}

pub fn profile_without_username() -> Profile {
    Profile {
        id: Uuid::new_v4(),
        username: None,
        updated_at: fixed_time(),
    }
}
