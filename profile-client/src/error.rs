use thiserror::Error;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Auth error: {0}")]
    Auth(#[from] profile_auth::AuthError),

    #[error("Database error: {0}")]
    Db(#[from] profile_db::DbError),

    #[error("Environment variable error: {message}")]
    EnvVar { message: String },

    #[error("Failed to open log file {path}: {source}")]
    LogFile {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Logger initialization failed: {message}")]
    Logger { message: String },
}

pub type Result<T> = std::result::Result<T, ClientError>;
