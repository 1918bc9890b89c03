pub mod error;
pub mod models;

pub use error::ErrorLocation;
pub use models::edit_buffer::EditBuffer;
pub use models::profile::{default_username, Profile};
