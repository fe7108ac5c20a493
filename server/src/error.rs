/// Errors raised by the queue collaborators and by startup code.
///
/// Queue operations themselves never fail: not-found, stale targets and empty
/// queues are reported through [`crate::models::request_queue::QueueStatus`].
#[derive(thiserror::Error, Debug)]
pub enum RequestError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("failed to replace queue file: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("mirror error: {0}")]
    Mirror(String),

    #[error("store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, RequestError>;
