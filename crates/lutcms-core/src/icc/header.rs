//! ICC Profile Header
//!
//! The ICC profile header is exactly 128 bytes and contains basic profile information.
//! See ICC.1:2001-04 Section 6.1.

use super::error::IccError;
use super::types::{DateTimeNumber, XyzNumber};

/// Profile file signature - must be 'acsp' (0x61637370)
pub const PROFILE_SIGNATURE: u32 = 0x61637370;

/// Header size, also the minimum valid profile size
pub const HEADER_SIZE: usize = 128;

/// Device attribute bit: matte is set, glossy is clear
pub const ATTR_MATTE: u64 = 2;

/// ICC Profile Header (128 bytes)
#[derive(Debug, Clone, PartialEq)]
pub struct IccHeader {
    /// Profile size in bytes
    pub size: u32,
    /// Preferred CMM type signature
    pub cmm_type: u32,
    /// Profile version (major.minor.patch)
    pub version: ProfileVersion,
    /// Device class (display, input, output, etc.)
    pub device_class: ProfileClass,
    /// Color space of data (RGB, CMYK, etc.)
    pub color_space: ColorSpace,
    /// Profile connection space (XYZ or Lab)
    pub pcs: ColorSpace,
    /// Date and time profile was created
    pub creation_date: DateTimeNumber,
    /// Primary platform signature
    pub platform: u32,
    /// Profile flags
    pub flags: u32,
    /// Device manufacturer signature
    pub manufacturer: u32,
    /// Device model signature
    pub model: u32,
    /// Device attributes
    pub attributes: u64,
    /// Rendering intent
    pub rendering_intent: RenderingIntent,
    /// PCS illuminant (should be D50)
    pub illuminant: XyzNumber,
    /// Profile creator signature
    pub creator: u32,
    /// Profile ID (MD5 hash, or zero)
    pub profile_id: [u8; 16],
}

impl Default for IccHeader {
    fn default() -> Self {
        Self {
            size: 0,
            cmm_type: 0,
            version: ProfileVersion::V2_4,
            device_class: ProfileClass::Display,
            color_space: ColorSpace::Rgb,
            pcs: ColorSpace::Xyz,
            creation_date: DateTimeNumber::default(),
            platform: 0,
            flags: 0,
            manufacturer: 0,
            model: 0,
            attributes: 0,
            rendering_intent: RenderingIntent::Perceptual,
            illuminant: XyzNumber::D50,
            creator: 0,
            profile_id: [0; 16],
        }
    }
}

fn be_u32(data: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

impl IccHeader {
    /// Parse header from bytes
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < HEADER_SIZE {
            return Err(IccError::TooSmall {
                expected: HEADER_SIZE,
                actual: data.len(),
            });
        }

        let signature = be_u32(data, 36);
        if signature != PROFILE_SIGNATURE {
            return Err(IccError::InvalidSignature(signature));
        }

        let size = be_u32(data, 0);
        if size as usize > data.len() {
            return Err(IccError::SizeMismatch {
                header_size: size,
                actual_size: data.len(),
            });
        }

        let version = ProfileVersion {
            major: data[8],
            minor: data[9] >> 4,
            patch: data[9] & 0x0F,
        };

        let attributes = u64::from_be_bytes([
            data[56], data[57], data[58], data[59], data[60], data[61], data[62], data[63],
        ]);

        let mut profile_id = [0u8; 16];
        profile_id.copy_from_slice(&data[84..100]);

        Ok(Self {
            size,
            cmm_type: be_u32(data, 4),
            version,
            device_class: ProfileClass::from_u32(be_u32(data, 12))?,
            color_space: ColorSpace::from_u32(be_u32(data, 16))?,
            pcs: ColorSpace::from_u32(be_u32(data, 20))?,
            creation_date: DateTimeNumber::from_bytes(&data[24..36]).unwrap_or_default(),
            platform: be_u32(data, 40),
            flags: be_u32(data, 44),
            manufacturer: be_u32(data, 48),
            model: be_u32(data, 52),
            attributes,
            rendering_intent: RenderingIntent::from_u32(be_u32(data, 64))?,
            illuminant: XyzNumber::from_bytes(&data[68..80]).unwrap_or_default(),
            creator: be_u32(data, 80),
            profile_id,
        })
    }

    /// Encode the header for a profile of `size` bytes
    pub fn to_bytes(&self, size: u32) -> [u8; HEADER_SIZE] {
        let mut out = [0u8; HEADER_SIZE];
        let mut put = |at: usize, v: u32| out[at..at + 4].copy_from_slice(&v.to_be_bytes());

        put(0, size);
        put(4, self.cmm_type);
        put(12, self.device_class.to_u32());
        put(16, self.color_space.to_u32());
        put(20, self.pcs.to_u32());
        put(36, PROFILE_SIGNATURE);
        put(40, self.platform);
        put(44, self.flags);
        put(48, self.manufacturer);
        put(52, self.model);
        put(64, self.rendering_intent.to_u32());
        put(80, self.creator);

        out[8] = self.version.major;
        out[9] = (self.version.minor << 4) | (self.version.patch & 0x0F);
        out[24..36].copy_from_slice(&self.creation_date.to_bytes());
        out[56..64].copy_from_slice(&self.attributes.to_be_bytes());
        out[68..80].copy_from_slice(&self.illuminant.to_bytes());
        out[84..100].copy_from_slice(&self.profile_id);
        out
    }
}

/// ICC Profile Version
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProfileVersion {
    pub major: u8,
    pub minor: u8,
    pub patch: u8,
}

impl ProfileVersion {
    /// Version 2.4.0
    pub const V2_4: Self = Self {
        major: 2,
        minor: 4,
        patch: 0,
    };

    /// Version from its decimal form (2.4 → 2.4.0, 4.3 → 4.3.0)
    ///
    /// Returns `None` outside 0.0..=15.9 once rounded to one decimal.
    pub fn from_f64(version: f64) -> Option<Self> {
        if !version.is_finite() || version < 0.0 {
            return None;
        }
        let tenths = (version * 10.0).round() as u32;
        let major = tenths / 10;
        if major > u8::MAX as u32 {
            return None;
        }
        Some(Self {
            major: major as u8,
            minor: (tenths % 10) as u8,
            patch: 0,
        })
    }

    /// Decimal form, e.g. `2.4`
    pub fn to_f64(&self) -> f64 {
        self.major as f64 + self.minor as f64 / 10.0
    }

    /// Packed header word, e.g. `0x02400000`
    pub fn to_u32(&self) -> u32 {
        ((self.major as u32) << 24) | ((self.minor as u32) << 20) | ((self.patch as u32 & 0x0F) << 16)
    }
}

/// Header enumeration stored as a four-character code
macro_rules! four_cc_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal,)+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq)]
        pub enum $name {
            $($(#[$vmeta])* $variant,)+
        }

        impl $name {
            pub fn from_u32(val: u32) -> Result<Self, IccError> {
                match &val.to_be_bytes() {
                    $($code => Ok(Self::$variant),)+
                    _ => Err(IccError::UnknownSignature { field: $field, value: val }),
                }
            }

            pub fn to_u32(&self) -> u32 {
                match self {
                    $(Self::$variant => u32::from_be_bytes(*$code),)+
                }
            }
        }
    };
}

four_cc_enum! {
    /// Device class
    ProfileClass, "device class" {
        /// Scanner or camera
        Input = b"scnr",
        Display = b"mntr",
        /// Printer; partial profiles use this class
        Output = b"prtr",
        DeviceLink = b"link",
        ColorSpace = b"spac",
        Abstract = b"abst",
        NamedColor = b"nmcl",
    }
}

four_cc_enum! {
    /// Data or connection color space
    ColorSpace, "color space" {
        Xyz = b"XYZ ",
        Lab = b"Lab ",
        Luv = b"Luv ",
        YCbCr = b"YCbr",
        Yxy = b"Yxy ",
        Rgb = b"RGB ",
        Gray = b"GRAY",
        Hsv = b"HSV ",
        Hls = b"HLS ",
        Cmyk = b"CMYK",
        Cmy = b"CMY ",
        Color2 = b"2CLR",
        Color3 = b"3CLR",
        Color4 = b"4CLR",
        Color5 = b"5CLR",
        Color6 = b"6CLR",
        Color7 = b"7CLR",
        Color8 = b"8CLR",
        Color9 = b"9CLR",
        Color10 = b"ACLR",
        Color11 = b"BCLR",
        Color12 = b"CCLR",
        Color13 = b"DCLR",
        Color14 = b"ECLR",
        Color15 = b"FCLR",
    }
}

/// Header rendering intent; LUT tags `*0`, `*1`, `*2` follow the first three
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u32)]
pub enum RenderingIntent {
    #[default]
    Perceptual = 0,
    RelativeColorimetric = 1,
    Saturation = 2,
    AbsoluteColorimetric = 3,
}

impl RenderingIntent {
    const ALL: [Self; 4] = [
        Self::Perceptual,
        Self::RelativeColorimetric,
        Self::Saturation,
        Self::AbsoluteColorimetric,
    ];

    pub fn from_u32(val: u32) -> Result<Self, IccError> {
        Self::ALL
            .get(val as usize)
            .copied()
            .ok_or(IccError::UnknownSignature {
                field: "rendering intent",
                value: val,
            })
    }

    pub fn to_u32(&self) -> u32 {
        *self as u32
    }
}
