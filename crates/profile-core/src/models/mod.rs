pub mod edit_buffer;
pub mod profile;
