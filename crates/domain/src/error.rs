//! Common error types used across the workspace.
//!
//! The core only ever fails with a [`ValidationError`]. [`AirCareError`] is
//! the root type returned through ports so that adapters can carry their own
//! failures without leaking them into the domain.

use crate::device::DeviceId;
use crate::reading::Measurement;

/// Root error for the aircare workspace.
#[derive(Debug, thiserror::Error)]
pub enum AirCareError {
    /// The caller submitted an update that violates a domain rule.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An adapter failed in a way the domain cannot describe.
    #[error("internal error")]
    Internal(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl AirCareError {
    /// Wrap an arbitrary adapter error.
    pub fn internal(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Internal(Box::new(err))
    }
}

/// Rejection reasons for a partial update.
///
/// Any of these aborts the whole update; the state is left untouched.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown room `{0}`")]
    UnknownRoom(String),

    #[error("unknown device `{0}`")]
    UnknownDevice(String),

    #[error("unknown rule `{0}`")]
    UnknownRule(String),

    #[error("unknown measurement `{0}`")]
    UnknownMeasurement(String),

    #[error("unknown preset `{0}`")]
    UnknownPreset(String),

    #[error("{measurement} must be a number")]
    NotANumber { measurement: Measurement },

    #[error("{measurement} must not be negative (got {value})")]
    Negative { measurement: Measurement, value: f64 },

    #[error("device {device} does not support field `{field}`")]
    UnsupportedField {
        device: DeviceId,
        field: &'static str,
    },

    #[error("fan speed must be between 0 and 100 (got {0})")]
    SpeedOutOfRange(u8),
}
