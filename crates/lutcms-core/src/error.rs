//! Error types for lutcms

use thiserror::Error;

use crate::context::ErrorCode;
use crate::icc::IccError;

/// Result type for lutcms operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in lutcms operations
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// A table or buffer does not have the dimensionality or extent required
    #[error("Shape mismatch for {what}: expected {expected}, got {actual}")]
    Shape {
        what: &'static str,
        expected: String,
        actual: String,
    },

    /// Tag name outside the LUT tag registry
    #[error("Unknown LUT tag name: {0:?}")]
    UnresolvedTag(String),

    /// Profile allocation or a required tag write failed
    #[error("Profile construction failed: {0}")]
    Construction(String),

    /// A built pipeline or link could not be stored under a tag
    #[error("Cannot attach to tag '{tag}': {reason}")]
    Attachment { tag: String, reason: String },

    /// Tag is not present in the profile
    #[error("Tag '{0}' not found")]
    MissingTag(String),

    /// Tag is present but does not hold a LUT pipeline
    #[error("Tag '{0}' does not hold a LUT pipeline")]
    NotAPipeline(String),

    /// Caller buffer length does not match its declared shape
    #[error("Buffer size mismatch: expected {expected}, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    /// Raw byte buffer cannot be viewed as the requested element type
    #[error("Buffer cast error: {0}")]
    BufferCast(String),

    /// Failed to parse ICC profile bytes
    #[error("Profile parse error: {0}")]
    ProfileParse(#[from] IccError),

    /// Profile cannot be encoded as ICC bytes
    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl Error {
    pub(crate) fn shape(
        what: &'static str,
        expected: impl Into<String>,
        actual: impl Into<String>,
    ) -> Self {
        Self::Shape {
            what,
            expected: expected.into(),
            actual: actual.into(),
        }
    }

    /// Numeric error class reported to context error handlers
    pub fn code(&self) -> ErrorCode {
        match self {
            Self::Shape { .. } | Self::BufferSize { .. } | Self::BufferCast(_) => ErrorCode::Range,
            Self::UnresolvedTag(_) => ErrorCode::BadSignature,
            Self::Construction(_) => ErrorCode::Internal,
            Self::Attachment { .. } | Self::Serialization(_) => ErrorCode::Write,
            Self::MissingTag(_) => ErrorCode::Read,
            Self::NotAPipeline(_) => ErrorCode::NotSuitable,
            Self::ProfileParse(_) => ErrorCode::CorruptionDetected,
        }
    }
}
