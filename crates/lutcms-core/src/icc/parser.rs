//! ICC Profile Parser
//!
//! Reads the header and tag table of a profile. Tag table entries that point
//! at the same bytes are decoded once and share one [`Arc`], so links
//! written by [`write_profile`](super::write_profile) survive a round trip.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use super::error::IccError;
use super::header::{HEADER_SIZE, IccHeader};
use super::tags::TagData;
use super::types::TagSignature;

/// Size of one tag table entry: signature, offset and size
pub(crate) const TAG_ENTRY_SIZE: usize = 12;

/// Header and tags decoded from profile bytes
#[derive(Debug, Clone)]
pub struct ParsedProfile {
    pub header: IccHeader,
    pub tags: BTreeMap<TagSignature, Arc<TagData>>,
}

/// Tag table entry (as stored in profile)
#[derive(Debug, Clone, Copy)]
struct TagTableEntry {
    signature: u32,
    offset: u32,
    size: u32,
}

fn be_u32(data: &[u8], at: usize) -> u32 {
    u32::from_be_bytes([data[at], data[at + 1], data[at + 2], data[at + 3]])
}

/// Parse the tag table that follows the header
fn parse_tag_table(data: &[u8]) -> Result<Vec<TagTableEntry>, IccError> {
    if data.len() < HEADER_SIZE + 4 {
        return Err(IccError::TooSmall {
            expected: HEADER_SIZE + 4,
            actual: data.len(),
        });
    }

    let count = be_u32(data, HEADER_SIZE) as usize;
    let table_start = HEADER_SIZE + 4;
    let required_size = count
        .checked_mul(TAG_ENTRY_SIZE)
        .and_then(|n| n.checked_add(table_start))
        .ok_or_else(|| IccError::CorruptedData(format!("tag count {count}")))?;

    if data.len() < required_size {
        return Err(IccError::TooSmall {
            expected: required_size,
            actual: data.len(),
        });
    }

    Ok((0..count)
        .map(|i| {
            let at = table_start + i * TAG_ENTRY_SIZE;
            TagTableEntry {
                signature: be_u32(data, at),
                offset: be_u32(data, at + 4),
                size: be_u32(data, at + 8),
            }
        })
        .collect())
}

/// Parse an ICC profile from bytes
pub fn parse_profile(data: &[u8]) -> Result<ParsedProfile, IccError> {
    let header = IccHeader::parse(data)?;
    let entries = parse_tag_table(data)?;

    let mut tags = BTreeMap::new();
    let mut by_location: HashMap<(u32, u32), Arc<TagData>> = HashMap::new();

    for entry in &entries {
        let start = entry.offset as usize;
        let end = start.saturating_add(entry.size as usize);
        if end > data.len() {
            return Err(IccError::TagOutOfBounds {
                tag: entry.signature,
                offset: entry.offset,
                size: entry.size,
                profile_size: data.len(),
            });
        }

        let tag = match by_location.get(&(entry.offset, entry.size)) {
            Some(shared) => Arc::clone(shared),
            None => {
                let parsed = Arc::new(TagData::parse(&data[start..end])?);
                by_location.insert((entry.offset, entry.size), Arc::clone(&parsed));
                parsed
            }
        };
        tags.insert(TagSignature(entry.signature), tag);
    }

    tracing::debug!(tags = tags.len(), size = data.len(), "parsed profile");
    Ok(ParsedProfile { header, tags })
}
