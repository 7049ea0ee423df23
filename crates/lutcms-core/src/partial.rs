//! Partial output profiles
//!
//! A partial profile carries the header, the descriptive text tags and the
//! media white point of an RGB printer profile with a Lab connection space.
//! The LUT tags are added afterwards with [`add_lut16`](crate::add_lut16).

use serde::{Deserialize, Serialize};

use crate::context::Context;
use crate::icc::header::{ATTR_MATTE, IccHeader};
use crate::icc::tags::{TextData, XyzTagData, strip_non_ascii};
use crate::icc::{ColorSpace, ProfileClass, ProfileVersion, TagData, TagSignature, XyzNumber};
use crate::profile::Profile;
use crate::{Error, Result};

/// Creator signature written to partial profiles by default
pub const DEFAULT_CREATOR: &str = "ZYGO";

/// Default media white point (ICC D50)
pub const D50_WHITE_POINT: [f64; 3] = [0.9642, 1.0, 0.8249];

/// Media surface finish, recorded in the device attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceFinish {
    #[default]
    Glossy,
    Matte,
}

/// Settings for a partial profile
///
/// Every field has a default, so a configuration file only needs to name
/// what differs:
///
/// ```
/// # use lutcms_core::PartialProfileOptions;
/// let options: PartialProfileOptions =
///     serde_json::from_str(r#"{ "description": "Press A", "finish": "matte" }"#).unwrap();
/// let profile = options.build().unwrap();
/// assert_eq!(profile.description().as_deref(), Some("Press A"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartialProfileOptions {
    /// Profile description (`desc`), reduced to printable ASCII
    pub description: String,
    /// Copyright notice (`cprt`), reduced to printable ASCII
    pub copyright: String,
    pub finish: SurfaceFinish,
    /// Media white point as XYZ; must have exactly 3 components
    pub white_point: Vec<f64>,
    /// Profile version in decimal form
    pub version: f64,
    /// Four-character creator signature
    pub creator: String,
}

impl Default for PartialProfileOptions {
    fn default() -> Self {
        Self {
            description: String::new(),
            copyright: String::new(),
            finish: SurfaceFinish::Glossy,
            white_point: D50_WHITE_POINT.to_vec(),
            version: ProfileVersion::V2_4.to_f64(),
            creator: DEFAULT_CREATOR.to_string(),
        }
    }
}

fn creator_signature(creator: &str) -> Result<u32> {
    let bytes: [u8; 4] = creator
        .as_bytes()
        .try_into()
        .map_err(|_| Error::Construction(format!("creator {creator:?} is not 4 bytes")))?;
    Ok(u32::from_be_bytes(bytes))
}

impl PartialProfileOptions {
    /// Build the profile
    pub fn build(&self) -> Result<Profile> {
        self.build_with_context(Context::default())
    }

    /// Build the profile; failures and the finished profile use `context`
    pub fn build_with_context(&self, context: Context) -> Result<Profile> {
        self.assemble(context.clone())
            .inspect_err(|e| context.report(e))
    }

    fn assemble(&self, context: Context) -> Result<Profile> {
        if self.white_point.len() != 3 {
            return Err(Error::shape(
                "white_point",
                "3 components",
                format!("{} components", self.white_point.len()),
            ));
        }
        let white = XyzNumber::from_f64([
            self.white_point[0],
            self.white_point[1],
            self.white_point[2],
        ])
        .ok_or_else(|| {
            Error::Construction(format!(
                "white point {:?} is not representable as s15Fixed16",
                self.white_point
            ))
        })?;
        let version = ProfileVersion::from_f64(self.version)
            .ok_or_else(|| Error::Construction(format!("invalid version {}", self.version)))?;
        let creator = creator_signature(&self.creator)?;

        let header = IccHeader {
            version,
            device_class: ProfileClass::Output,
            color_space: ColorSpace::Rgb,
            pcs: ColorSpace::Lab,
            attributes: match self.finish {
                SurfaceFinish::Glossy => 0,
                SurfaceFinish::Matte => ATTR_MATTE,
            },
            creator,
            ..IccHeader::default()
        };

        let mut profile = Profile::new(header).with_context(context);
        profile.write_tag(
            TagSignature::DESC,
            TagData::Description(TextData::new(strip_non_ascii(&self.description))),
        );
        profile.write_tag(
            TagSignature::COPYRIGHT,
            TagData::Text(TextData::new(strip_non_ascii(&self.copyright))),
        );
        profile.write_tag(TagSignature::MEDIA_WHITE, TagData::Xyz(XyzTagData::new(white)));

        tracing::debug!(
            description = %self.description,
            finish = ?self.finish,
            version = self.version,
            "created partial profile"
        );
        Ok(profile)
    }
}

/// Create a partial RGB output profile with a Lab connection space
///
/// `wtpt` must hold exactly three XYZ components.
pub fn create_partial_profile(
    desc: &str,
    cprt: &str,
    is_glossy: bool,
    wtpt: &[f64],
) -> Result<Profile> {
    PartialProfileOptions {
        description: desc.to_string(),
        copyright: cprt.to_string(),
        finish: if is_glossy {
            SurfaceFinish::Glossy
        } else {
            SurfaceFinish::Matte
        },
        white_point: wtpt.to_vec(),
        ..PartialProfileOptions::default()
    }
    .build()
}
