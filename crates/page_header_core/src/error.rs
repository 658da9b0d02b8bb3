//! Header error taxonomy.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unparseable publish date `{input}`")]
/// A `published_at` value that is not a recognizable date.
pub struct DateFormatError {
    /// The rejected input text.
    pub input: String,
}

impl DateFormatError {
    pub(crate) fn new(input: impl Into<String>) -> Self {
        Self {
            input: input.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Construction-time contract violations in a [`crate::HeaderConfig`].
pub enum ConfigValidationError {
    /// The title is empty outside placeholder mode.
    #[error("title is required unless the placeholder is shown")]
    MissingTitle,
    /// The reading time is below zero.
    #[error("reading time must not be negative (got {0})")]
    NegativeReadingTime(i64),
    /// A caller-supplied metadata field has an empty label.
    #[error("meta field {0} has an empty label")]
    EmptyMetaLabel(usize),
}

impl ConfigValidationError {
    /// Stable machine-readable code, also exposed on the rendered container.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingTitle => "missing-title",
            Self::NegativeReadingTime(_) => "negative-reading-time",
            Self::EmptyMetaLabel(_) => "empty-meta-label",
        }
    }

    /// Name of the offending input field.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::MissingTitle => "title",
            Self::NegativeReadingTime(_) => "readingTime",
            Self::EmptyMetaLabel(_) => "metaFields",
        }
    }
}

#[derive(Debug, Error)]
/// Errors surfaced while building a header from external configuration.
pub enum HeaderError {
    /// The configuration document is not valid JSON for a header.
    #[error("header config is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
    /// The configuration parsed but violates a header contract.
    #[error(transparent)]
    Validation(#[from] ConfigValidationError),
    /// The publish date cannot be interpreted.
    #[error(transparent)]
    Date(#[from] DateFormatError),
}
