use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProtocolError {
    #[error("timestamp name is empty")]
    EmptyName,

    #[error("content hash is not 64 lowercase hex characters: '{0}'")]
    InvalidContentHash(String),

    #[error("transaction id is empty")]
    EmptyTransactionId,

    #[error("creation time is not a nanosecond count: '{0}'")]
    InvalidTime(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
