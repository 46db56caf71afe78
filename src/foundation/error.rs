/// Convenience result type used across whipcut.
pub type WhipcutResult<T> = Result<T, WhipcutError>;

/// Top-level error taxonomy used by engine APIs.
///
/// End of stream is deliberately absent: a [`FrameSource`](crate::FrameSource)
/// signals it with `Ok(None)` and the pipeline truncates the run instead of
/// raising.
#[derive(thiserror::Error, Debug)]
pub enum WhipcutError {
    /// Frames fed to a pixel operation have unequal or zero dimensions.
    #[error("dimension mismatch: {0}")]
    DimensionMismatch(String),

    /// Pipeline entry rejected (`total_steps < 2`) before any frame was pulled.
    #[error("invalid step count: {0}")]
    InvalidStepCount(String),

    /// Invalid user-provided parameter or configuration data.
    #[error("validation error: {0}")]
    Validation(String),

    /// Source or sink adapter failure (spawn, pipe, short read).
    #[error("io error: {0}")]
    Io(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl WhipcutError {
    /// Build a [`WhipcutError::DimensionMismatch`] value.
    pub fn dimension_mismatch(msg: impl Into<String>) -> Self {
        Self::DimensionMismatch(msg.into())
    }

    /// Build a [`WhipcutError::InvalidStepCount`] value.
    pub fn invalid_step_count(msg: impl Into<String>) -> Self {
        Self::InvalidStepCount(msg.into())
    }

    /// Build a [`WhipcutError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`WhipcutError::Io`] value.
    pub fn io(msg: impl Into<String>) -> Self {
        Self::Io(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
