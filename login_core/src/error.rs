use serde::{Serialize, Serializer};
use thiserror::Error;

/// Why a single field was rejected. The `Display` impl is the message shown
/// to the person filling in the form, so it's also what gets serialized.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// The input didn't have this field at all.
    #[error("Required")]
    Missing,

    /// The field was there, but wasn't a string (e.g. `null` or a number.)
    #[error("Expected string, received {received}")]
    WrongType {
        /// The JSON type we got instead
        received: &'static str,
    },

    /// The value isn't shaped right, for example an email without a domain.
    #[error("{0}")]
    Format(&'static str),

    /// The value is shaped right but too weak, for example a short password.
    #[error("{0}")]
    Strength(&'static str),
}

impl Serialize for FieldError {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
