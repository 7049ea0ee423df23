//! Byte-level errors of the ICC reader and writer

use thiserror::Error;

/// Failure to decode profile bytes or to encode a profile as bytes
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IccError {
    /// Fewer bytes than the structure being read needs
    #[error("Truncated profile: need {expected} bytes, have {actual}")]
    TooSmall { expected: usize, actual: usize },

    /// Header magic is not `acsp`
    #[error("Not an ICC profile: magic 0x{0:08X}")]
    InvalidSignature(u32),

    /// Declared profile size exceeds the bytes supplied
    #[error("Header declares {header_size} bytes but only {actual_size} were supplied")]
    SizeMismatch { header_size: u32, actual_size: usize },

    /// Tag table entry points past the end of the profile
    #[error("Tag 0x{tag:08X} spans {offset}+{size}, past the {profile_size}-byte profile")]
    TagOutOfBounds {
        tag: u32,
        offset: u32,
        size: u32,
        profile_size: usize,
    },

    /// Header field holds a signature or code outside its enumeration
    #[error("Unknown {field} 0x{value:08X}")]
    UnknownSignature { field: &'static str, value: u32 },

    /// Tag body is malformed
    #[error("Malformed tag data: {0}")]
    CorruptedData(String),

    /// Value has no lut16 / v2 encoding
    #[error("Cannot encode: {0}")]
    Unsupported(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = IccError::UnknownSignature {
            field: "device class",
            value: u32::from_be_bytes(*b"zzzz"),
        };
        assert_eq!(err.to_string(), "Unknown device class 0x7A7A7A7A");

        let err = IccError::TagOutOfBounds {
            tag: 0x6465_7363,
            offset: 144,
            size: 400,
            profile_size: 160,
        };
        assert_eq!(
            err.to_string(),
            "Tag 0x64657363 spans 144+400, past the 160-byte profile"
        );
    }
}
