//! # lutcms-tests
//!
//! Scenario and parity testing for lutcms.
//!
//! This crate provides:
//! - Deterministic table and sample generators for building pipelines
//! - lcms2 reference transforms over serialized profiles
//!
//! ## Test Categories
//!
//! 1. **Scenarios**: build, link and evaluate pipelines end to end
//! 2. **lcms2 Parity**: pixel formats, profile loading and 16-bit transforms
//! 3. **Serialization**: ICC bytes round trips and lut16 limits

pub mod patterns;
pub mod reference;

pub use patterns::{LutTables, identity_tables, random_tables, sample_rows};
pub use reference::transform_lcms2_rgb16;
