//! Tag-addressable profile container
//!
//! Tag data is held behind [`Arc`]: linking one tag to another stores a
//! second handle to the same data instead of a copy, and
//! [`Profile::shares_tag`] tells the two cases apart.
//!
//! Writers take `&mut Profile`; readers take `&Profile`, so any number of
//! threads may evaluate a profile that is no longer being modified.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::context::Context;
use crate::icc::tags::strip_non_ascii;
use crate::icc::{
    ColorSpace, IccHeader, LutTag, ProfileClass, ProfileVersion, TagData, TagSignature,
    parse_profile, write_profile,
};
use crate::{Error, Result};

/// ICC profile held in memory
#[derive(Debug, Clone, Default)]
pub struct Profile {
    header: IccHeader,
    tags: BTreeMap<TagSignature, Arc<TagData>>,
    context: Context,
}

impl Profile {
    /// Empty profile with the given header
    pub fn new(header: IccHeader) -> Self {
        Self {
            header,
            tags: BTreeMap::new(),
            context: Context::default(),
        }
    }

    /// Replace the reporting context
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Parse ICC bytes
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Self::from_bytes_with_context(data, Context::default())
    }

    /// Parse ICC bytes, reporting failures through `context`
    pub fn from_bytes_with_context(data: &[u8], context: Context) -> Result<Self> {
        let parsed = parse_profile(data)
            .map_err(Error::from)
            .inspect_err(|e| context.report(e))?;
        Ok(Self {
            header: parsed.header,
            tags: parsed.tags,
            context,
        })
    }

    /// Encode as ICC bytes
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        write_profile(&self.header, &self.tags)
            .map_err(|e| Error::Serialization(e.to_string()))
            .inspect_err(|e| self.context.report(e))
    }

    /// Reporting context
    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn header(&self) -> &IccHeader {
        &self.header
    }

    /// Device class
    pub fn device_class(&self) -> ProfileClass {
        self.header.device_class
    }

    /// Data color space
    pub fn color_space(&self) -> ColorSpace {
        self.header.color_space
    }

    /// Profile connection space
    pub fn pcs(&self) -> ColorSpace {
        self.header.pcs
    }

    pub fn version(&self) -> ProfileVersion {
        self.header.version
    }

    /// Creator signature
    pub fn creator(&self) -> u32 {
        self.header.creator
    }

    /// Device attribute flags
    pub fn attributes(&self) -> u64 {
        self.header.attributes
    }

    fn text_of(&self, sig: TagSignature) -> Option<String> {
        self.read_tag(sig)
            .and_then(TagData::as_text)
            .map(|t| strip_non_ascii(&t.text))
    }

    /// Profile description, printable ASCII only
    pub fn description(&self) -> Option<String> {
        self.text_of(TagSignature::DESC)
    }

    /// Copyright text, printable ASCII only
    pub fn copyright(&self) -> Option<String> {
        self.text_of(TagSignature::COPYRIGHT)
    }

    /// Media white point as XYZ
    pub fn media_white_point(&self) -> Option<[f64; 3]> {
        self.read_tag(TagSignature::MEDIA_WHITE)
            .and_then(TagData::as_xyz)
            .and_then(|xyz| xyz.first())
            .map(|v| v.to_f64())
    }

    /// PCS-to-device tags that carry distinct tables
    ///
    /// `B2A1` is listed when present. `B2A0` and `B2A2` are listed when
    /// present and not linked to `B2A1`. Unlike a raw comparison of the two
    /// tags' data pointers, an absent `B2A0` or `B2A2` is never listed just
    /// because `B2A1` exists.
    pub fn available_b2a_intents(&self) -> Vec<LutTag> {
        let mut intents = Vec::with_capacity(3);
        if self.has_tag(LutTag::B2A1) {
            intents.push(LutTag::B2A1);
        }
        for tag in [LutTag::B2A0, LutTag::B2A2] {
            if self.has_tag(tag) && !self.shares_tag(tag, LutTag::B2A1) {
                intents.push(tag);
            }
        }
        intents
    }

    /// Check if a tag is present
    pub fn has_tag(&self, sig: impl Into<TagSignature>) -> bool {
        self.tags.contains_key(&sig.into())
    }

    /// Tag data, if present
    pub fn read_tag(&self, sig: impl Into<TagSignature>) -> Option<&TagData> {
        self.tags.get(&sig.into()).map(Arc::as_ref)
    }

    /// Store tag data, replacing whatever the tag held
    pub fn write_tag(&mut self, sig: impl Into<TagSignature>, data: TagData) {
        self.tags.insert(sig.into(), Arc::new(data));
    }

    /// Remove a tag, returning its data if no other tag shares it
    pub fn remove_tag(&mut self, sig: impl Into<TagSignature>) -> Option<TagData> {
        self.tags
            .remove(&sig.into())
            .and_then(|tag| Arc::try_unwrap(tag).ok())
    }

    /// Make `link` refer to the data stored under `dest`
    ///
    /// Returns `false` and leaves the profile unchanged if `dest` is absent.
    pub fn link_tag(&mut self, link: impl Into<TagSignature>, dest: impl Into<TagSignature>) -> bool {
        let Some(shared) = self.tags.get(&dest.into()).map(Arc::clone) else {
            return false;
        };
        self.tags.insert(link.into(), shared);
        true
    }

    /// Check if two tags refer to the same stored data
    pub fn shares_tag(&self, a: impl Into<TagSignature>, b: impl Into<TagSignature>) -> bool {
        match (self.tags.get(&a.into()), self.tags.get(&b.into())) {
            (Some(a), Some(b)) => Arc::ptr_eq(a, b),
            _ => false,
        }
    }

    /// Number of tags
    pub fn tag_count(&self) -> usize {
        self.tags.len()
    }

    /// Iterate over tag signatures in ascending order
    pub fn tag_signatures(&self) -> impl Iterator<Item = TagSignature> + '_ {
        self.tags.keys().copied()
    }
}
