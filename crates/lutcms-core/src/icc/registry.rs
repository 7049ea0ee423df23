//! LUT tag names
//!
//! The tags a LUT pipeline may be stored under. Names are matched exactly
//! and case-sensitively.

use std::fmt;
use std::str::FromStr;

use super::types::TagSignature;
use crate::{Error, Result};

/// Tag that can hold a LUT pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum LutTag {
    /// Device to PCS, perceptual
    A2B0,
    /// Device to PCS, relative colorimetric
    A2B1,
    /// Device to PCS, saturation
    A2B2,
    /// PCS to device, perceptual
    B2A0,
    /// PCS to device, relative colorimetric
    B2A1,
    /// PCS to device, saturation
    B2A2,
    /// Out-of-gamut indicator
    Gamut,
}

impl LutTag {
    /// Every LUT tag
    pub const ALL: [LutTag; 7] = [
        LutTag::A2B0,
        LutTag::A2B1,
        LutTag::A2B2,
        LutTag::B2A0,
        LutTag::B2A1,
        LutTag::B2A2,
        LutTag::Gamut,
    ];

    /// Resolve a tag name
    pub fn resolve(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|tag| tag.as_str() == name)
            .ok_or_else(|| Error::UnresolvedTag(name.to_string()))
    }

    /// Tag name
    pub const fn as_str(self) -> &'static str {
        match self {
            LutTag::A2B0 => "A2B0",
            LutTag::A2B1 => "A2B1",
            LutTag::A2B2 => "A2B2",
            LutTag::B2A0 => "B2A0",
            LutTag::B2A1 => "B2A1",
            LutTag::B2A2 => "B2A2",
            LutTag::Gamut => "gamt",
        }
    }

    /// ICC tag signature
    pub const fn signature(self) -> TagSignature {
        match self {
            LutTag::A2B0 => TagSignature::A2B0,
            LutTag::A2B1 => TagSignature::A2B1,
            LutTag::A2B2 => TagSignature::A2B2,
            LutTag::B2A0 => TagSignature::B2A0,
            LutTag::B2A1 => TagSignature::B2A1,
            LutTag::B2A2 => TagSignature::B2A2,
            LutTag::Gamut => TagSignature::GAMUT,
        }
    }
}

impl FromStr for LutTag {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::resolve(s)
    }
}

impl fmt::Display for LutTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LutTag> for TagSignature {
    fn from(tag: LutTag) -> Self {
        tag.signature()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_all_names() {
        for tag in LutTag::ALL {
            assert_eq!(LutTag::resolve(tag.as_str()).unwrap(), tag);
            // Names and signatures spell the same four characters
            assert_eq!(tag.signature().to_string(), tag.as_str());
        }
        assert_eq!("gamt".parse::<LutTag>().unwrap(), LutTag::Gamut);
    }

    #[test]
    fn test_unknown_names() {
        for name in ["A2B3", "a2b0", "GAMT", "", "B2A0 ", "desc"] {
            match LutTag::resolve(name) {
                Err(Error::UnresolvedTag(n)) => assert_eq!(n, name),
                other => panic!("{name:?} resolved to {other:?}"),
            }
        }
    }

    #[test]
    fn test_signature_values() {
        assert_eq!(LutTag::A2B0.signature().0, 0x4132_4230);
        assert_eq!(LutTag::Gamut.signature().0, 0x6761_6D74);
    }
}
