/// Result alias used across the crate.
pub type ReelResult<T> = Result<T, ReelError>;

/// Error type for loading, rendering and encoding.
#[derive(thiserror::Error, Debug)]
pub enum ReelError {
    /// Invalid input or configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// The input archive could not be read.
    #[error("load error: {0}")]
    Load(String),

    /// A frame could not be rendered.
    #[error("render error: {0}")]
    Render(String),

    /// The output could not be encoded or written.
    #[error("encode error: {0}")]
    Encode(String),

    /// Any other failure, with its source chain preserved.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ReelError {
    /// Build a [`ReelError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ReelError::Load`].
    pub fn load(msg: impl Into<String>) -> Self {
        Self::Load(msg.into())
    }

    /// Build a [`ReelError::Render`].
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`ReelError::Encode`].
    pub fn encode(msg: impl Into<String>) -> Self {
        Self::Encode(msg.into())
    }
}
