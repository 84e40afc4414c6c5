use thiserror::Error;

#[derive(Error, Debug)]
pub enum SessionError {
    #[error("Session file write error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Session serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SessionError>;
