/// Convenience result type used across dressd.
pub type DressResult<T> = Result<T, DressError>;

/// Top-level error taxonomy used by engine APIs.
///
/// Only [`DressError::Input`] and [`DressError::Decode`] are produced by a well-formed
/// composite request; missing placements and malformed transform fields are absorbed and
/// surface through the report instead.
#[derive(thiserror::Error, Debug)]
pub enum DressError {
    /// The base model image is absent or cannot be decoded.
    #[error("input error: {0}")]
    Input(String),

    /// A planned garment image cannot be decoded.
    #[error("decode error for '{slot}': {message}")]
    Decode {
        /// Slot-view key of the garment that failed, e.g. `top_front`.
        slot: String,
        /// Human-readable cause.
        message: String,
    },

    /// Invalid options or internal invariants (surface sizes, buffer lengths).
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing the wire shape.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DressError {
    /// Build a [`DressError::Input`] value.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }

    /// Build a [`DressError::Decode`] value for the given slot-view key.
    pub fn decode(slot: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Decode {
            slot: slot.into(),
            message: msg.into(),
        }
    }

    /// Build a [`DressError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Slot-view key that triggered a decode failure, if any.
    pub fn slot(&self) -> Option<&str> {
        match self {
            Self::Decode { slot, .. } => Some(slot),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for DressError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
