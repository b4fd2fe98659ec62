/// Convenience result type used across the crate.
pub type TimetableResult<T> = Result<T, TimetableError>;

/// Top-level error taxonomy. Every variant is fatal for the render it interrupts.
#[derive(thiserror::Error, Debug)]
pub enum TimetableError {
    /// A time string did not have the `HH:MM` shape.
    #[error("malformed time: {0}")]
    MalformedTime(String),

    /// The page cannot be laid out (no persons, no days, degenerate time window).
    #[error("invalid layout: {0}")]
    InvalidLayout(String),

    /// A person has no palette entry.
    #[error("palette lookup failed: no color defined for '{0}'")]
    PaletteLookup(String),

    /// The source text could not be understood.
    #[error("parse error: {0}")]
    Parse(String),

    /// Structurally valid input with inconsistent values.
    #[error("validation error: {0}")]
    Validation(String),

    /// Errors when serializing or deserializing settings or display lists.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl TimetableError {
    /// Build a [`TimetableError::MalformedTime`] value.
    pub fn malformed_time(msg: impl Into<String>) -> Self {
        Self::MalformedTime(msg.into())
    }

    /// Build a [`TimetableError::InvalidLayout`] value.
    pub fn invalid_layout(msg: impl Into<String>) -> Self {
        Self::InvalidLayout(msg.into())
    }

    /// Build a [`TimetableError::PaletteLookup`] value.
    pub fn palette_lookup(person: impl Into<String>) -> Self {
        Self::PaletteLookup(person.into())
    }

    /// Build a [`TimetableError::Parse`] value.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Build a [`TimetableError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`TimetableError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
