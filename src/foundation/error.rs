pub type KeepsakeResult<T> = Result<T, KeepsakeError>;

#[derive(thiserror::Error, Debug)]
pub enum KeepsakeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("document error: {0}")]
    Document(String),

    #[error("session error: {0}")]
    Session(String),

    #[error("media error: {0}")]
    Media(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeepsakeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn document(msg: impl Into<String>) -> Self {
        Self::Document(msg.into())
    }

    pub fn session(msg: impl Into<String>) -> Self {
        Self::Session(msg.into())
    }

    pub fn media(msg: impl Into<String>) -> Self {
        Self::Media(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
