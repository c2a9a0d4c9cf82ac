//! Error types for grab pose operations.

use thiserror::Error;

use crate::hand::Handedness;

/// Errors that can occur when building or combining grab poses.
///
/// "No matching pose" is not an error; the resolver reports it through its
/// own result enum.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GrabError {
    /// Two hand poses of different handedness were combined.
    #[error("handedness mismatch: expected {expected:?}, got {actual:?}")]
    HandednessMismatch {
        /// Handedness of the first pose.
        expected: Handedness,
        /// Handedness of the second pose.
        actual: Handedness,
    },

    /// Invalid configuration.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Scale factor is not finite and positive.
    #[error("invalid scale: {0} (must be positive and finite)")]
    InvalidScale(f32),
}

impl GrabError {
    /// Creates a handedness mismatch error.
    #[must_use]
    pub const fn handedness_mismatch(expected: Handedness, actual: Handedness) -> Self {
        Self::HandednessMismatch { expected, actual }
    }

    /// Creates an invalid configuration error.
    #[must_use]
    pub fn invalid_config(reason: impl Into<String>) -> Self {
        Self::InvalidConfig(reason.into())
    }

    /// Creates an invalid scale error.
    #[must_use]
    pub const fn invalid_scale(scale: f32) -> Self {
        Self::InvalidScale(scale)
    }
}

/// Result type for grab pose operations.
pub type Result<T> = std::result::Result<T, GrabError>;

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn error_handedness_mismatch() {
        let err = GrabError::handedness_mismatch(Handedness::Left, Handedness::Right);
        let msg = err.to_string();
        assert!(msg.contains("handedness mismatch"));
        assert!(msg.contains("Left"));
        assert!(msg.contains("Right"));
    }

    #[test]
    fn error_invalid_config() {
        let err = GrabError::invalid_config("weight must be in [0, 1]");
        assert!(err.to_string().contains("invalid configuration"));
    }

    #[test]
    fn error_invalid_scale() {
        let err = GrabError::invalid_scale(-2.0);
        assert!(err.to_string().contains("invalid scale"));
        assert!(err.to_string().contains("-2"));
    }
}
