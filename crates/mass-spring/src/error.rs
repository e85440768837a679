//! Errors reported by the mass-spring system.

/// The errors that can be returned by the simulation core.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MssError {
    /// A setter received values that do not fit the current configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    /// A frame sink failed to publish or persist a frame.
    #[error("failed to publish frame: {0}")]
    Io(String),
}

impl MssError {
    /// Shorthand for building an `InvalidConfiguration` error.
    pub(crate) fn invalid<S: Into<String>>(msg: S) -> Self {
        Self::InvalidConfiguration(msg.into())
    }
}
