//! Packed pixel-format descriptors
//!
//! A pixel format is a 32-bit word in the Little CMS `TYPE_*` layout:
//!
//! | bits  | field        |
//! |-------|--------------|
//! | 0-2   | bytes/sample |
//! | 3-6   | channels     |
//! | 7-9   | extra        |
//! | 10    | do-swap      |
//! | 16-20 | color space  |
//! | 22    | float        |
//!
//! Words produced here can be passed unchanged to lcms2 transforms.

use serde::{Deserialize, Serialize};

/// Any color space
pub const PT_ANY: u32 = 0;
/// Grayscale
pub const PT_GRAY: u32 = 3;
/// RGB
pub const PT_RGB: u32 = 4;
/// CMY
pub const PT_CMY: u32 = 5;
/// CMYK
pub const PT_CMYK: u32 = 6;
/// YCbCr
pub const PT_YCBCR: u32 = 7;
/// YUV (CIE Luv)
pub const PT_YUV: u32 = 8;
/// CIE XYZ
pub const PT_XYZ: u32 = 9;
/// CIE Lab
pub const PT_LAB: u32 = 10;
/// YUVK
pub const PT_YUVK: u32 = 11;
/// HSV
pub const PT_HSV: u32 = 12;
/// HLS
pub const PT_HLS: u32 = 13;
/// CIE Yxy
pub const PT_YXY: u32 = 14;

/// Packed pixel-format word
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PixelFormat(pub u32);

impl PixelFormat {
    /// 8-bit RGB
    pub const RGB_8: Self = Self::encode(false, PT_RGB, 3, 1, false, 0);
    /// 16-bit RGB
    pub const RGB_16: Self = Self::encode(false, PT_RGB, 3, 2, false, 0);
    /// 8-bit RGB with one extra (alpha) channel
    pub const RGBA_8: Self = Self::encode(false, PT_RGB, 3, 1, false, 1);
    /// 8-bit BGR
    pub const BGR_8: Self = Self::encode(false, PT_RGB, 3, 1, true, 0);
    /// 16-bit CMYK
    pub const CMYK_16: Self = Self::encode(false, PT_CMYK, 4, 2, false, 0);
    /// 16-bit grayscale
    pub const GRAY_16: Self = Self::encode(false, PT_GRAY, 1, 2, false, 0);

    /// Pack descriptor fields into a format word
    ///
    /// Fields are shifted into place without masking, so out-of-range values
    /// spill into neighbouring fields exactly as the C macros do.
    pub const fn encode(
        is_float: bool,
        pixel_type: u32,
        channels: u32,
        bytes: u32,
        swap: bool,
        extra: u32,
    ) -> Self {
        Self(
            ((is_float as u32) << 22)
                | (pixel_type << 16)
                | ((swap as u32) << 10)
                | (extra << 7)
                | (channels << 3)
                | bytes,
        )
    }

    /// Raw format word
    pub const fn as_u32(self) -> u32 {
        self.0
    }

    /// Floating-point samples
    pub const fn is_float(self) -> bool {
        (self.0 >> 22) & 1 == 1
    }

    /// `PT_*` color-space code
    pub const fn pixel_type(self) -> u32 {
        (self.0 >> 16) & 31
    }

    /// Reversed channel order
    pub const fn swap(self) -> bool {
        (self.0 >> 10) & 1 == 1
    }

    /// Extra (non-color) channels
    pub const fn extra(self) -> u32 {
        (self.0 >> 7) & 7
    }

    /// Color channels
    pub const fn channels(self) -> u32 {
        (self.0 >> 3) & 15
    }

    /// Bytes per sample; 0 means 8-byte doubles when `is_float` is set
    pub const fn bytes(self) -> u32 {
        self.0 & 7
    }
}

impl From<PixelFormat> for u32 {
    fn from(format: PixelFormat) -> Self {
        format.0
    }
}

/// Encode a pixel-format word from its fields
pub fn encode_format(
    is_float: bool,
    pixel_type: u32,
    channels: u32,
    bytes: u32,
    swap: bool,
    extra: u32,
) -> u32 {
    PixelFormat::encode(is_float, pixel_type, channels, bytes, swap, extra).0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rgb_8_word() {
        assert_eq!(encode_format(false, PT_RGB, 3, 1, false, 0), 262169);
        assert_eq!(PixelFormat::RGB_8.as_u32(), 0x40019);
        assert_eq!(PixelFormat::RGB_16.as_u32(), 262170);
    }

    #[test]
    fn test_float_and_swap_bits() {
        assert_eq!(encode_format(true, PT_ANY, 0, 0, false, 0), 1 << 22);
        assert_eq!(encode_format(false, PT_ANY, 0, 0, true, 0), 1 << 10);
        assert_eq!(PixelFormat::BGR_8.as_u32(), 0x40419);
    }

    #[test]
    fn test_field_accessors() {
        let f = PixelFormat::encode(true, PT_LAB, 3, 4, true, 2);
        assert!(f.is_float());
        assert_eq!(f.pixel_type(), PT_LAB);
        assert!(f.swap());
        assert_eq!(f.extra(), 2);
        assert_eq!(f.channels(), 3);
        assert_eq!(f.bytes(), 4);

        let rgba = PixelFormat::RGBA_8;
        assert_eq!(rgba.extra(), 1);
        assert_eq!(rgba.channels(), 3);
        assert!(!rgba.is_float());
    }

    #[test]
    fn test_unmasked_fields_spill() {
        // 16 channels overflow the 4-bit field into `extra`
        let f = PixelFormat::encode(false, PT_ANY, 16, 0, false, 0);
        assert_eq!(f.as_u32(), 1 << 7);
        assert_eq!(f.channels(), 0);
        assert_eq!(f.extra(), 1);
    }

    #[test]
    fn test_serde_transparent() {
        let json = serde_json::to_string(&PixelFormat::RGB_8).unwrap();
        assert_eq!(json, "262169");
        let back: PixelFormat = serde_json::from_str(&json).unwrap();
        assert_eq!(back, PixelFormat::RGB_8);
    }
}
