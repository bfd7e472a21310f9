/// Convenience result type used across the HUD renderer.
pub type HudResult<T> = Result<T, HudError>;

/// Top-level error taxonomy used by renderer APIs.
///
/// Malformed telemetry values never surface here: the normalizer substitutes documented defaults.
#[derive(thiserror::Error, Debug)]
pub enum HudError {
    /// Invalid caller-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Telemetry input that cannot be read as a record sequence at all.
    #[error("telemetry error: {0}")]
    Telemetry(String),

    /// No usable font could be provided.
    #[error("font error: {0}")]
    Font(String),

    /// Rasterization or image transform failures.
    #[error("render error: {0}")]
    Render(String),

    /// Failures while handing frames to an output sink.
    #[error("output error: {0}")]
    Output(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl HudError {
    /// Build a [`HudError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`HudError::Telemetry`] value.
    pub fn telemetry(msg: impl Into<String>) -> Self {
        Self::Telemetry(msg.into())
    }

    /// Build a [`HudError::Font`] value.
    pub fn font(msg: impl Into<String>) -> Self {
        Self::Font(msg.into())
    }

    /// Build a [`HudError::Render`] value.
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    /// Build a [`HudError::Output`] value.
    pub fn output(msg: impl Into<String>) -> Self {
        Self::Output(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
