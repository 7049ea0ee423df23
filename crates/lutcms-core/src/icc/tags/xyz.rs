//! XYZ Tag Type
//!
//! The XYZType contains an array of XYZ values. Here it carries the media
//! white point.
//!
//! See ICC.1:2001-04 Section 6.5.26

use crate::icc::error::IccError;
use crate::icc::types::{TypeSignature, XyzNumber};

/// XYZ tag data - contains one or more XYZ values
#[derive(Debug, Clone, PartialEq)]
pub struct XyzTagData {
    /// XYZ values stored in the tag
    pub values: Vec<XyzNumber>,
}

impl XyzTagData {
    /// Single-value tag
    pub fn new(value: XyzNumber) -> Self {
        Self {
            values: vec![value],
        }
    }

    /// Parse XYZ data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        // Each XYZNumber is 12 bytes (3 × s15Fixed16)
        if data.len() < 12 {
            return Err(IccError::CorruptedData("XYZ tag too small".to_string()));
        }

        let values = data
            .chunks_exact(12)
            .filter_map(XyzNumber::from_bytes)
            .collect();

        Ok(Self { values })
    }

    /// Get the first XYZ value (most common case)
    pub fn first(&self) -> Option<&XyzNumber> {
        self.values.first()
    }

    /// Encode as XYZType
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(8 + 12 * self.values.len());
        out.extend_from_slice(&TypeSignature::XYZ.to_be_bytes());
        out.extend_from_slice(&[0u8; 4]);
        for value in &self.values {
            out.extend_from_slice(&value.to_bytes());
        }
        out
    }
}
