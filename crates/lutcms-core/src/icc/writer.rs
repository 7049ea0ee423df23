//! ICC Profile Writer
//!
//! Lays out header, tag table and 4-byte aligned tag data. Tags that share
//! one [`Arc`] are encoded once and every table entry for them points at
//! the same offset.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::error::IccError;
use super::header::{HEADER_SIZE, IccHeader};
use super::parser::TAG_ENTRY_SIZE;
use super::tags::TagData;
use super::types::TagSignature;

fn pad4(out: &mut Vec<u8>) {
    while out.len() % 4 != 0 {
        out.push(0);
    }
}

/// Encode a profile
pub fn write_profile(
    header: &IccHeader,
    tags: &BTreeMap<TagSignature, Arc<TagData>>,
) -> Result<Vec<u8>, IccError> {
    let table_len = 4 + tags.len() * TAG_ENTRY_SIZE;
    let mut out = vec![0u8; HEADER_SIZE + table_len];
    pad4(&mut out);

    let mut entries = Vec::with_capacity(tags.len());
    let mut written: HashMap<*const TagData, (u32, u32)> = HashMap::new();

    for (sig, tag) in tags {
        let location = match written.get(&Arc::as_ptr(tag)) {
            Some(&location) => location,
            None => {
                let bytes = tag.to_bytes().map_err(|e| match e {
                    IccError::Unsupported(msg) => IccError::Unsupported(format!("tag '{sig}': {msg}")),
                    other => other,
                })?;
                let location = (out.len() as u32, bytes.len() as u32);
                out.extend_from_slice(&bytes);
                pad4(&mut out);
                written.insert(Arc::as_ptr(tag), location);
                location
            }
        };
        entries.push((*sig, location));
    }

    let size = u32::try_from(out.len())
        .map_err(|_| IccError::Unsupported(format!("profile of {} bytes", out.len())))?;

    out[..HEADER_SIZE].copy_from_slice(&header.to_bytes(size));
    out[HEADER_SIZE..HEADER_SIZE + 4].copy_from_slice(&(entries.len() as u32).to_be_bytes());
    for (i, (sig, (offset, len))) in entries.iter().enumerate() {
        let at = HEADER_SIZE + 4 + i * TAG_ENTRY_SIZE;
        out[at..at + 4].copy_from_slice(&sig.0.to_be_bytes());
        out[at + 4..at + 8].copy_from_slice(&offset.to_be_bytes());
        out[at + 8..at + 12].copy_from_slice(&len.to_be_bytes());
    }

    tracing::debug!(
        tags = entries.len(),
        unique = written.len(),
        size,
        "serialized profile"
    );
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icc::parser::parse_profile;
    use crate::icc::tags::{TextData, XyzTagData};
    use crate::icc::types::XyzNumber;

    #[test]
    fn test_layout() {
        let mut tags = BTreeMap::new();
        tags.insert(
            TagSignature::COPYRIGHT,
            Arc::new(TagData::Text(TextData::new("abc"))),
        );
        tags.insert(
            TagSignature::MEDIA_WHITE,
            Arc::new(TagData::Xyz(XyzTagData::new(XyzNumber::D50))),
        );
        let bytes = write_profile(&IccHeader::default(), &tags).unwrap();

        assert_eq!(bytes.len() % 4, 0);
        assert_eq!(&bytes[0..4], &(bytes.len() as u32).to_be_bytes());
        assert_eq!(&bytes[128..132], &2u32.to_be_bytes());
        // Tag data starts right after the table, "text" tag is 12 bytes
        // padded to 12, then the XYZ tag
        assert_eq!(&bytes[132..136], b"cprt");
        assert_eq!(&bytes[136..140], &156u32.to_be_bytes());
        assert_eq!(&bytes[140..144], &12u32.to_be_bytes());
        assert_eq!(&bytes[148..152], &168u32.to_be_bytes());
        assert_eq!(&bytes[156..160], b"text");

        let parsed = parse_profile(&bytes).unwrap();
        assert_eq!(parsed.tags.len(), 2);
        assert_eq!(
            parsed.tags[&TagSignature::MEDIA_WHITE].as_xyz().unwrap().first(),
            Some(&XyzNumber::D50)
        );
    }

    #[test]
    fn test_shared_tags_written_once() {
        let shared = Arc::new(TagData::Description(TextData::new("shared text")));
        let mut tags = BTreeMap::new();
        tags.insert(TagSignature::B2A0, Arc::clone(&shared));
        tags.insert(TagSignature::B2A1, Arc::clone(&shared));
        tags.insert(TagSignature::DESC, Arc::new(TagData::Description(TextData::new("shared text"))));

        let bytes = write_profile(&IccHeader::default(), &tags).unwrap();
        let offset_of = |i: usize| &bytes[132 + i * 12 + 4..132 + i * 12 + 8];

        // B2A0, B2A1, desc in signature order
        assert_eq!(offset_of(0), offset_of(1));
        assert_ne!(offset_of(0), offset_of(2));

        let parsed = parse_profile(&bytes).unwrap();
        assert!(Arc::ptr_eq(
            &parsed.tags[&TagSignature::B2A0],
            &parsed.tags[&TagSignature::B2A1]
        ));
        assert!(!Arc::ptr_eq(
            &parsed.tags[&TagSignature::B2A0],
            &parsed.tags[&TagSignature::DESC]
        ));
    }
}
