pub mod connection;
pub mod error;
pub mod repositories;
pub mod store;

pub use connection::{open_in_memory_pool, open_pool, run_migrations};
pub use error::{DbError, Result};
pub use repositories::profile_repository::ProfileRepository;
pub use store::ProfileStore;
