//! ICC profile encoding
//!
//! A profile on disk consists of:
//! 1. A 128-byte header
//! 2. A tag table listing all tags
//! 3. Tag data (entries may point at the same data)
//!
//! Reading and writing cover the tag types LUT profiles built by this crate
//! use: `desc`, `text`, `XYZ ` and `mft2`, plus `mluc` on read. Other tags
//! are kept as raw bytes and written back unchanged.

pub mod header;
pub mod tags;

mod error;
mod parser;
mod registry;
mod types;
mod writer;

pub use error::IccError;
pub use header::{ColorSpace, IccHeader, ProfileClass, ProfileVersion, RenderingIntent};
pub use parser::{ParsedProfile, parse_profile};
pub use registry::LutTag;
pub use tags::TagData;
pub use types::{DateTimeNumber, S15Fixed16, TagSignature, TypeSignature, XyzNumber};
pub use writer::write_profile;
