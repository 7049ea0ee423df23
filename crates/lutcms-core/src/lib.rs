//! # lutcms - 16-bit LUT pipelines for ICC profiles
//!
//! Build pre-curves → CLUT → post-curves pipelines from plain `u16` tables,
//! store them under the LUT tags of an ICC profile, evaluate them against
//! caller buffers, and serialize the result as lut16 (`mft2`) tags.
//!
//! ## Quick Start
//!
//! ```
//! use lutcms_core::{ArrayView, ArrayViewMut, add_lut16, create_partial_profile, eval_lut16, link_tag};
//!
//! let mut profile =
//!     create_partial_profile("Press A", "(c) Example", true, &[0.9642, 1.0, 0.8249]).unwrap();
//!
//! // 2×2×2 identity CLUT with identity curves
//! let mut clut = Vec::new();
//! for i in 0..2u16 {
//!     for j in 0..2u16 {
//!         for k in 0..2u16 {
//!             clut.extend([i * 65535, j * 65535, k * 65535]);
//!         }
//!     }
//! }
//! let curves = [0u16, 0, 0, 65535, 65535, 65535];
//!
//! add_lut16(
//!     &mut profile,
//!     "B2A1",
//!     3,
//!     &ArrayView::new(&clut, &[2, 2, 2, 3]).unwrap(),
//!     &ArrayView::new(&curves, &[2, 3]).unwrap(),
//!     &ArrayView::new(&curves, &[2, 3]).unwrap(),
//! )
//! .unwrap();
//! link_tag(&mut profile, "B2A0", "B2A1").unwrap();
//!
//! let input = [65535u16, 0, 65535];
//! let mut output = [0u16; 3];
//! eval_lut16(
//!     &profile,
//!     "B2A0",
//!     &ArrayView::new(&input, &[1, 3]).unwrap(),
//!     &mut ArrayViewMut::new(&mut output, &[1, 3]).unwrap(),
//! )
//! .unwrap();
//! assert_eq!(output, input);
//!
//! let icc = profile.to_bytes().unwrap();
//! assert_eq!(&icc[36..40], b"acsp");
//! ```

pub mod array;
pub mod builder;
pub mod context;
pub mod error;
pub mod eval;
pub mod format;
pub mod icc;
pub mod math;
pub mod partial;
pub mod pipeline;
pub mod profile;

pub use array::{ArrayView, ArrayViewMut};
pub use builder::{add_lut16, link_tag};
pub use context::{Context, ErrorCode, ErrorHandler};
pub use error::{Error, Result};
pub use eval::{eval_lut16, eval_pre_table};
pub use format::{
    PT_ANY, PT_CMY, PT_CMYK, PT_GRAY, PT_HLS, PT_HSV, PT_LAB, PT_RGB, PT_XYZ, PT_YCBCR, PT_YUV,
    PT_YUVK, PT_YXY, PixelFormat, encode_format,
};
pub use icc::LutTag;
pub use partial::{PartialProfileOptions, SurfaceFinish, create_partial_profile};
pub use pipeline::Pipeline;
pub use profile::Profile;

/// Version of lutcms
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
