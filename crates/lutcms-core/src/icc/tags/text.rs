//! Text Tag Types
//!
//! ICC profiles can contain text in several formats:
//! - text: Simple ASCII text
//! - desc: Profile description (v2 format)
//! - mluc: Multi-localized Unicode (v4 format, read only)
//!
//! See ICC.1:2001-04 Sections 6.5.17 (text), 6.5.16 (desc) and
//! ICC.1:2022 Section 10.15 (mluc).

use crate::icc::error::IccError;
use crate::icc::types::TypeSignature;

/// Text tag data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextData {
    /// Primary text content (English or default)
    pub text: String,
    /// Localized versions (language code -> text)
    pub localized: Vec<(String, String)>,
}

/// Keep only printable ASCII (bytes 32..=126)
///
/// Control characters and every multi-byte UTF-8 character are dropped.
pub fn strip_non_ascii(text: &str) -> String {
    text.chars().filter(|c| (' '..='~').contains(c)).collect()
}

fn ascii_bytes(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| if c.is_ascii() { c as u8 } else { b'?' })
        .collect()
}

fn tag_prefix(type_sig: TypeSignature, capacity: usize) -> Vec<u8> {
    let mut out = Vec::with_capacity(8 + capacity);
    out.extend_from_slice(&type_sig.to_be_bytes());
    out.extend_from_slice(&[0u8; 4]);
    out
}

impl TextData {
    /// Create from a single string
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            localized: Vec::new(),
        }
    }

    /// Parse 'text' type (simple ASCII)
    pub fn parse_text(data: &[u8]) -> Result<Self, IccError> {
        // Text is null-terminated ASCII
        let text = data
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>();

        Ok(Self::new(text))
    }

    /// Parse 'desc' type (v2 profile description)
    pub fn parse_desc(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 4 {
            return Err(IccError::CorruptedData(
                "Description tag too small".to_string(),
            ));
        }

        // ASCII description count (includes null)
        let ascii_count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;

        if data.len() - 4 < ascii_count {
            return Err(IccError::CorruptedData(
                "Description ASCII data truncated".to_string(),
            ));
        }

        let text = data[4..4 + ascii_count]
            .iter()
            .take_while(|&&b| b != 0)
            .map(|&b| b as char)
            .collect::<String>();

        // The Unicode and ScriptCode parts that follow are not read

        Ok(Self::new(text))
    }

    /// Parse 'mluc' type (multi-localized Unicode)
    pub fn parse_mluc(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 8 {
            return Err(IccError::CorruptedData("mluc tag too small".to_string()));
        }

        let record_count = u32::from_be_bytes([data[0], data[1], data[2], data[3]]) as usize;
        let record_size = u32::from_be_bytes([data[4], data[5], data[6], data[7]]) as usize;

        if record_size < 12 {
            return Err(IccError::CorruptedData(
                "mluc record size too small".to_string(),
            ));
        }

        let mut localized = Vec::new();

        for i in 0..record_count {
            let record_offset = 8 + i * record_size;
            if data.len() < record_offset + 12 {
                break;
            }

            let record = &data[record_offset..];
            let locale = format!(
                "{}{}-{}{}",
                record[0] as char, record[1] as char, record[2] as char, record[3] as char
            );

            let str_len = u32::from_be_bytes([record[4], record[5], record[6], record[7]]) as usize;
            let str_offset =
                u32::from_be_bytes([record[8], record[9], record[10], record[11]]) as usize;

            // Offsets count from the start of the tag, 8 bytes before `data`
            let Some(start) = str_offset.checked_sub(8) else {
                continue;
            };
            if start + str_len <= data.len() && str_len >= 2 {
                if let Some(text) = decode_utf16be(&data[start..start + str_len]) {
                    localized.push((locale, text));
                }
            }
        }

        let text = localized
            .first()
            .map(|(_, text)| text.clone())
            .unwrap_or_default();

        Ok(Self { text, localized })
    }

    /// Encode as textType
    pub fn to_text_bytes(&self) -> Vec<u8> {
        let ascii = ascii_bytes(&self.text);
        let mut out = tag_prefix(TypeSignature::TEXT, ascii.len() + 1);
        out.extend_from_slice(&ascii);
        out.push(0);
        out
    }

    /// Encode as textDescriptionType
    ///
    /// Only the ASCII part is filled in; the Unicode and ScriptCode parts
    /// are present but empty.
    pub fn to_desc_bytes(&self) -> Vec<u8> {
        let ascii = ascii_bytes(&self.text);
        let mut out = tag_prefix(TypeSignature::DESC, ascii.len() + 90);
        out.extend_from_slice(&(ascii.len() as u32 + 1).to_be_bytes());
        out.extend_from_slice(&ascii);
        out.push(0);
        // Unicode language code and count
        out.extend_from_slice(&[0u8; 8]);
        // ScriptCode code, count and its fixed 67-byte field
        out.extend_from_slice(&[0u8; 3]);
        out.extend_from_slice(&[0u8; 67]);
        out
    }

    /// Encode as multiLocalizedUnicodeType with a single en-US record
    pub fn to_mluc_bytes(&self) -> Vec<u8> {
        let utf16: Vec<u8> = self
            .text
            .encode_utf16()
            .flat_map(|unit| unit.to_be_bytes())
            .collect();
        let mut out = tag_prefix(TypeSignature::MLUC, 20 + utf16.len());
        out.extend_from_slice(&1u32.to_be_bytes());
        out.extend_from_slice(&12u32.to_be_bytes());
        out.extend_from_slice(b"enUS");
        out.extend_from_slice(&(utf16.len() as u32).to_be_bytes());
        out.extend_from_slice(&28u32.to_be_bytes());
        out.extend_from_slice(&utf16);
        out
    }
}

/// Decode UTF-16BE bytes to String
fn decode_utf16be(data: &[u8]) -> Option<String> {
    if data.len() % 2 != 0 {
        return None;
    }

    let utf16: Vec<u16> = data
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .take_while(|&c| c != 0)
        .collect();

    String::from_utf16(&utf16).ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_non_ascii() {
        assert_eq!(strip_non_ascii("My\tProfile\n"), "MyProfile");
        assert_eq!(strip_non_ascii("Caf\u{e9} \u{2122} 2024"), "Caf  2024");
        assert_eq!(strip_non_ascii("\u{7f}~ !"), "~ !");
        assert_eq!(strip_non_ascii(""), "");
    }

    #[test]
    fn test_parse_text() {
        let data = b"Hello, World!\0";
        let text = TextData::parse_text(data).unwrap();
        assert_eq!(text.text, "Hello, World!");
    }

    #[test]
    fn test_parse_desc() {
        // Count = 6 (including null)
        let mut data = vec![0, 0, 0, 6];
        data.extend_from_slice(b"sRGB\0\0");

        let text = TextData::parse_desc(&data).unwrap();
        assert_eq!(text.text, "sRGB");

        assert!(TextData::parse_desc(&[0, 0, 0, 9, b'a']).is_err());
    }

    #[test]
    fn test_desc_bytes() {
        let bytes = TextData::new("Printer").to_desc_bytes();
        assert_eq!(&bytes[0..4], b"desc");
        assert_eq!(&bytes[8..12], &8u32.to_be_bytes());
        assert_eq!(&bytes[12..20], b"Printer\0");
        assert_eq!(bytes.len(), 12 + 8 + 8 + 3 + 67);

        let parsed = TextData::parse_desc(&bytes[8..]).unwrap();
        assert_eq!(parsed.text, "Printer");
    }

    #[test]
    fn test_text_bytes() {
        let bytes = TextData::new("(c) Me").to_text_bytes();
        assert_eq!(&bytes[0..4], b"text");
        assert_eq!(&bytes[8..], b"(c) Me\0");
    }

    #[test]
    fn test_parse_mluc() {
        let bytes = TextData::new("Test").to_mluc_bytes();
        assert_eq!(&bytes[0..4], b"mluc");

        let text = TextData::parse_mluc(&bytes[8..]).unwrap();
        assert_eq!(text.text, "Test");
        assert_eq!(text.localized, vec![("en-US".to_string(), "Test".to_string())]);
    }

    #[test]
    fn test_decode_utf16be() {
        // "Hello" in UTF-16BE
        let data = [0x00, 0x48, 0x00, 0x65, 0x00, 0x6C, 0x00, 0x6C, 0x00, 0x6F];
        let result = decode_utf16be(&data).unwrap();
        assert_eq!(result, "Hello");
        assert_eq!(decode_utf16be(&data[..3]), None);
    }
}
