/// Convenience result type used across starbeams.
pub type StarbeamsResult<T> = Result<T, StarbeamsError>;

/// Top-level error taxonomy used by the library APIs.
///
/// Early stops and skipped scatter frames are scheduler states, not errors.
#[derive(thiserror::Error, Debug)]
pub enum StarbeamsError {
    /// Invalid parameters, choice tables or user-provided values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors while loading or validating a [`crate::RenderConfig`].
    #[error("config error: {0}")]
    Config(String),

    /// Errors while allocating or blitting drawing surfaces.
    #[error("render error: {0}")]
    Render(String),

    /// Errors while publishing features or writing still images.
    #[error("export error: {0}")]
    Export(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StarbeamsError {
    /// Build a [`StarbeamsError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`StarbeamsError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Build a [`StarbeamsError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`StarbeamsError::Export`] value.
    pub fn export(msg: impl Into<String>) -> Self {
        Self::Export(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
