/// Convenience result type used across Showreel.
pub type ShowreelResult<T> = Result<T, ShowreelError>;

/// Top-level error taxonomy used by controller and configuration APIs.
///
/// Every variant is a programmer or configuration error. Runtime numeric drift
/// is clamped silently and never surfaces here.
#[derive(thiserror::Error, Debug)]
pub enum ShowreelError {
    /// Invalid user-provided configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// A section id or name that is not part of the configured catalog.
    #[error("unknown section: {0}")]
    UnknownSection(String),

    /// Slide state was queried for a section without a slideshow collection.
    #[error("section has no slideshow: {0}")]
    NoSlideshow(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ShowreelError {
    /// Build a [`ShowreelError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`ShowreelError::UnknownSection`] value.
    pub fn unknown_section(msg: impl Into<String>) -> Self {
        Self::UnknownSection(msg.into())
    }

    /// Build a [`ShowreelError::NoSlideshow`] value.
    pub fn no_slideshow(msg: impl Into<String>) -> Self {
        Self::NoSlideshow(msg.into())
    }

    /// Build a [`ShowreelError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<serde_json::Error> for ShowreelError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
