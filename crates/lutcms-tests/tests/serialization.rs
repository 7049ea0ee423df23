//! ICC byte round trips and lut16 storage limits

use lutcms_core::icc::{TagData, TagSignature};
use lutcms_core::{Error, LutTag, Profile, create_partial_profile, link_tag};
use lutcms_tests::patterns::{identity_tables, random_tables};

const D50: [f64; 3] = [0.9642, 1.0, 0.8249];

fn read_u32(bytes: &[u8], offset: usize) -> u32 {
    u32::from_be_bytes(bytes[offset..offset + 4].try_into().unwrap())
}

#[test]
fn test_header_layout() {
    let bytes = create_partial_profile("Header", "", true, &D50)
        .unwrap()
        .to_bytes()
        .unwrap();

    assert_eq!(read_u32(&bytes, 0) as usize, bytes.len());
    assert_eq!(read_u32(&bytes, 8), 0x0240_0000);
    assert_eq!(&bytes[12..16], b"prtr");
    assert_eq!(&bytes[16..20], b"RGB ");
    assert_eq!(&bytes[20..24], b"Lab ");
    assert_eq!(&bytes[36..40], b"acsp");
    assert_eq!(read_u32(&bytes, 64), 0, "rendering intent");
    assert_eq!(&bytes[80..84], b"ZYGO");
    assert_eq!(read_u32(&bytes, 128), 3, "tag count");
    assert_eq!(bytes.len() % 4, 0);
}

#[test]
fn test_round_trip_preserves_tables() {
    let mut profile = create_partial_profile("Round trip", "(c)", false, &D50).unwrap();
    let tables = random_tables(21, 7, 4, 256);
    tables.add_to(&mut profile, "B2A0").unwrap();
    identity_tables(2, 1).add_to(&mut profile, "gamt").unwrap();

    let back = Profile::from_bytes(&profile.to_bytes().unwrap()).unwrap();

    assert_eq!(back.tag_count(), profile.tag_count());
    assert_eq!(back.description().as_deref(), Some("Round trip"));
    assert_eq!(back.copyright().as_deref(), Some("(c)"));
    assert_eq!(back.attributes(), 2);
    for tag in [LutTag::B2A0, LutTag::Gamut] {
        assert_eq!(back.read_tag(tag), profile.read_tag(tag), "{tag}");
    }

    let [x, y, z] = back.media_white_point().unwrap();
    assert!((x - D50[0]).abs() < 1e-4 && (y - D50[1]).abs() < 1e-4 && (z - D50[2]).abs() < 1e-4);
}

#[test]
fn test_linked_tags_written_once() {
    let mut profile = create_partial_profile("Linked", "", true, &D50).unwrap();
    random_tables(3, 9, 3, 32).add_to(&mut profile, "B2A1").unwrap();
    let unlinked = profile.to_bytes().unwrap().len();

    link_tag(&mut profile, "B2A0", "B2A1").unwrap();
    link_tag(&mut profile, "B2A2", "B2A1").unwrap();
    let bytes = profile.to_bytes().unwrap();

    // Two extra 12-byte tag table entries, no extra data
    assert_eq!(bytes.len(), unlinked + 24);

    let back = Profile::from_bytes(&bytes).unwrap();
    assert!(back.shares_tag(LutTag::B2A0, LutTag::B2A1));
    assert!(back.shares_tag(LutTag::B2A2, LutTag::B2A1));
    assert_eq!(back.available_b2a_intents(), vec![LutTag::B2A1]);
}

#[test]
fn test_unknown_tags_survive() {
    let mut profile = create_partial_profile("Raw", "", true, &D50).unwrap();
    let raw = TagData::Unknown {
        type_sig: u32::from_be_bytes(*b"abcd"),
        data: [&b"abcd"[..], &[0, 0, 0, 0, 1, 2, 3, 4, 5]].concat(),
    };
    profile.write_tag(TagSignature(u32::from_be_bytes(*b"zzzz")), raw.clone());

    let back = Profile::from_bytes(&profile.to_bytes().unwrap()).unwrap();
    assert_eq!(
        back.read_tag(TagSignature(u32::from_be_bytes(*b"zzzz"))),
        Some(&raw)
    );
}

#[test]
fn test_lut16_channel_limit() {
    let mut profile = create_partial_profile("Wide", "", true, &D50).unwrap();
    identity_tables(2, 16).add_to(&mut profile, "A2B0").unwrap();

    assert!(matches!(profile.to_bytes(), Err(Error::Serialization(_))));
}

#[test]
fn test_lut16_entry_limit() {
    let mut profile = create_partial_profile("Long", "", true, &D50).unwrap();
    random_tables(1, 2, 3, 4097).add_to(&mut profile, "A2B0").unwrap();
    assert!(matches!(profile.to_bytes(), Err(Error::Serialization(_))));

    let mut profile = create_partial_profile("Long", "", true, &D50).unwrap();
    random_tables(1, 2, 3, 4096).add_to(&mut profile, "A2B0").unwrap();
    assert!(profile.to_bytes().is_ok());
}

#[test]
fn test_truncated_bytes_rejected() {
    let bytes = create_partial_profile("T", "", true, &D50)
        .unwrap()
        .to_bytes()
        .unwrap();
    assert!(matches!(
        Profile::from_bytes(&bytes[..100]),
        Err(Error::ProfileParse(_))
    ));
}
