//! ICC Profile Tag Data
//!
//! Tags contain the actual profile data. Each tag has:
//! - A 4-byte type signature identifying the data format
//! - 4 reserved bytes
//! - Type-specific data
//!
//! Only the types this crate writes are decoded; anything else is carried
//! through as raw bytes.

mod lut;
mod text;
mod xyz;

pub use lut::{Lut16Data, MAX_GRID_POINTS, MAX_LUT16_CHANNELS, MAX_TABLE_ENTRIES};
pub use text::{TextData, strip_non_ascii};
pub use xyz::XyzTagData;

use super::error::IccError;
use super::types::TypeSignature;
use crate::pipeline::Pipeline;

/// Decoded tag data
#[derive(Debug, Clone, PartialEq)]
pub enum TagData {
    /// XYZ type data (white point)
    Xyz(XyzTagData),
    /// Plain ASCII text
    Text(TextData),
    /// v2 profile description
    Description(TextData),
    /// Multi-localized Unicode text
    MultiLocalizedUnicode(TextData),
    /// Three-stage LUT pipeline (lut16)
    Pipeline(Pipeline),
    /// Unknown/unsupported tag type, kept with its type header
    Unknown { type_sig: u32, data: Vec<u8> },
}

impl TagData {
    /// Parse tag data from bytes
    ///
    /// `data` starts at the tag's offset in the profile. Data of a known type
    /// that fails to decode is kept as [`TagData::Unknown`].
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 8 {
            return Err(IccError::CorruptedData(
                "Tag data too small for header".to_string(),
            ));
        }

        let type_sig = TypeSignature(u32::from_be_bytes([data[0], data[1], data[2], data[3]]));
        let type_data = &data[8..];

        let parsed = match type_sig {
            TypeSignature::XYZ => XyzTagData::parse(type_data).map(TagData::Xyz),
            TypeSignature::TEXT => TextData::parse_text(type_data).map(TagData::Text),
            TypeSignature::DESC => TextData::parse_desc(type_data).map(TagData::Description),
            TypeSignature::MLUC => {
                TextData::parse_mluc(type_data).map(TagData::MultiLocalizedUnicode)
            }
            TypeSignature::LUT16 => Lut16Data::parse(type_data).and_then(|lut| {
                lut.to_pipeline().map(TagData::Pipeline).ok_or_else(|| {
                    IccError::Unsupported("lut16 layout other than 3-input identity".to_string())
                })
            }),
            _ => Err(IccError::Unsupported(format!("type {:08X}", type_sig.0))),
        };

        Ok(parsed.unwrap_or_else(|_| TagData::Unknown {
            type_sig: type_sig.0,
            data: data.to_vec(),
        }))
    }

    /// Encode as a complete tag (type header included)
    pub fn to_bytes(&self) -> Result<Vec<u8>, IccError> {
        Ok(match self {
            TagData::Xyz(xyz) => xyz.to_bytes(),
            TagData::Text(text) => text.to_text_bytes(),
            TagData::Description(text) => text.to_desc_bytes(),
            TagData::MultiLocalizedUnicode(text) => text.to_mluc_bytes(),
            TagData::Pipeline(pipeline) => Lut16Data::from_pipeline(pipeline)?.to_bytes(),
            TagData::Unknown { data, .. } => data.clone(),
        })
    }

    /// Type signature this data is stored with
    pub fn type_signature(&self) -> TypeSignature {
        match self {
            TagData::Xyz(_) => TypeSignature::XYZ,
            TagData::Text(_) => TypeSignature::TEXT,
            TagData::Description(_) => TypeSignature::DESC,
            TagData::MultiLocalizedUnicode(_) => TypeSignature::MLUC,
            TagData::Pipeline(_) => TypeSignature::LUT16,
            TagData::Unknown { type_sig, .. } => TypeSignature(*type_sig),
        }
    }

    /// Get as XYZ data
    pub fn as_xyz(&self) -> Option<&XyzTagData> {
        match self {
            TagData::Xyz(xyz) => Some(xyz),
            _ => None,
        }
    }

    /// Get as text of any kind
    pub fn as_text(&self) -> Option<&TextData> {
        match self {
            TagData::Text(text)
            | TagData::Description(text)
            | TagData::MultiLocalizedUnicode(text) => Some(text),
            _ => None,
        }
    }

    /// Get as pipeline
    pub fn as_pipeline(&self) -> Option<&Pipeline> {
        match self {
            TagData::Pipeline(pipeline) => Some(pipeline),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::types::XyzNumber;

    #[test]
    fn test_parse_unknown_type() {
        let data = [
            b'u', b'n', b'k', b'n', // type sig "unkn"
            0, 0, 0, 0, // reserved
            1, 2, 3, 4, // payload
        ];

        let tag = TagData::parse(&data).unwrap();
        match &tag {
            TagData::Unknown { type_sig, data: raw } => {
                assert_eq!(*type_sig, u32::from_be_bytes(*b"unkn"));
                assert_eq!(raw.as_slice(), &data);
            }
            _ => panic!("Expected Unknown tag type"),
        }
        assert_eq!(tag.to_bytes().unwrap(), data);
    }

    #[test]
    fn test_corrupt_known_type_kept_raw() {
        let data = [b'X', b'Y', b'Z', b' ', 0, 0, 0, 0, 1, 2];
        let tag = TagData::parse(&data).unwrap();
        assert!(matches!(tag, TagData::Unknown { .. }));
        assert_eq!(tag.type_signature(), TypeSignature::XYZ);
    }

    #[test]
    fn test_dispatch_by_type() {
        let xyz = TagData::Xyz(XyzTagData::new(XyzNumber::D50));
        assert_eq!(TagData::parse(&xyz.to_bytes().unwrap()).unwrap(), xyz);

        let desc = TagData::Description(TextData::new("Profile"));
        assert_eq!(TagData::parse(&desc.to_bytes().unwrap()).unwrap(), desc);

        let cprt = TagData::Text(TextData::new("No rights"));
        assert_eq!(TagData::parse(&cprt.to_bytes().unwrap()).unwrap(), cprt);
        assert_eq!(cprt.as_text().map(|t| t.text.as_str()), Some("No rights"));
        assert!(cprt.as_pipeline().is_none());
    }

    #[test]
    fn test_too_small() {
        assert!(TagData::parse(&[0u8; 7]).is_err());
    }
}
