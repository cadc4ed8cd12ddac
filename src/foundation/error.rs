/// Crate-wide result alias.
pub type KeyglassResult<T> = Result<T, KeyglassError>;

/// Errors produced while loading, transforming, or caching overlay images.
#[derive(thiserror::Error, Debug)]
pub enum KeyglassError {
    /// The overlay image file does not exist at the given path.
    #[error("image not found: {0}")]
    ImageNotFound(String),

    /// The image bytes could not be decoded into RGBA pixels.
    #[error("image decode error: {0}")]
    ImageDecode(String),

    /// A pixel buffer duplication or resize could not be allocated.
    #[error("allocation error: {0}")]
    Allocation(String),

    /// An argument or buffer shape violated an operation's contract.
    #[error("validation error: {0}")]
    Validation(String),

    /// The configuration file could not be parsed or written.
    #[error("config error: {0}")]
    Config(String),

    /// Any other underlying failure.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl KeyglassError {
    /// Build a [`KeyglassError::ImageDecode`] from any displayable cause.
    pub fn image_decode(msg: impl std::fmt::Display) -> Self {
        Self::ImageDecode(msg.to_string())
    }

    /// Build a [`KeyglassError::Allocation`] from any displayable cause.
    pub fn allocation(msg: impl std::fmt::Display) -> Self {
        Self::Allocation(msg.to_string())
    }

    /// Build a [`KeyglassError::Validation`].
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`KeyglassError::Config`].
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<std::collections::TryReserveError> for KeyglassError {
    fn from(e: std::collections::TryReserveError) -> Self {
        Self::allocation(e)
    }
}
