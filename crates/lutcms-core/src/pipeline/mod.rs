//! Three-stage 16-bit LUT pipeline
//!
//! Every pipeline built here has the same shape:
//!
//! 1. pre-curves: one tone curve per input channel (3)
//! 2. CLUT: cubic 3-input lookup table with tetrahedral interpolation
//! 3. post-curves: one tone curve per output channel
//!
//! This is the lut16 (`mft2`) layout, so a pipeline maps one-to-one onto
//! the tag type it is stored as.

mod clut;
mod curve;

pub use clut::ClutStage;
pub use curve::{ToneCurve, ToneCurveStage};

use crate::array::ArrayView;
use crate::{Error, Result};

/// Maximum channel count of any stage
pub const MAX_CHANNELS: usize = 16;

/// Input arity of every pipeline
pub const PIPELINE_INPUT_CHANNELS: usize = 3;

/// Borrowed view of one pipeline stage
#[derive(Debug, Clone, Copy)]
pub enum Stage<'a> {
    /// Per-channel tone curves
    ToneCurves(&'a ToneCurveStage),
    /// 3-input lookup table
    Clut(&'a ClutStage),
}

impl Stage<'_> {
    /// Channels consumed by this stage
    pub fn input_channels(&self) -> usize {
        match self {
            Stage::ToneCurves(curves) => curves.channels(),
            Stage::Clut(_) => PIPELINE_INPUT_CHANNELS,
        }
    }

    /// Channels produced by this stage
    pub fn output_channels(&self) -> usize {
        match self {
            Stage::ToneCurves(curves) => curves.channels(),
            Stage::Clut(clut) => clut.output_channels(),
        }
    }

    /// Evaluate this stage alone
    pub fn eval16(&self, input: &[u16], output: &mut [u16]) {
        match self {
            Stage::ToneCurves(curves) => curves.eval16(input, output),
            Stage::Clut(clut) => clut.eval16(input, output),
        }
    }
}

/// Pre-curves → CLUT → post-curves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pipeline {
    pre: ToneCurveStage,
    clut: ClutStage,
    post: ToneCurveStage,
}

impl Pipeline {
    /// Assemble a pipeline, checking that adjacent stages agree on arity
    pub fn new(pre: ToneCurveStage, clut: ClutStage, post: ToneCurveStage) -> Result<Self> {
        if pre.channels() != PIPELINE_INPUT_CHANNELS {
            return Err(Error::shape(
                "pre curves",
                format!("{PIPELINE_INPUT_CHANNELS} channels"),
                format!("{} channels", pre.channels()),
            ));
        }
        if post.channels() != clut.output_channels() {
            return Err(Error::shape(
                "post curves",
                format!("{} channels", clut.output_channels()),
                format!("{} channels", post.channels()),
            ));
        }
        Ok(Self { pre, clut, post })
    }

    /// Build from `entries × 3`, `(N, N, N, out)` and `entries × out` tables
    pub fn from_tables(
        pre_table: &ArrayView<'_, u16>,
        clut: &ArrayView<'_, u16>,
        post_table: &ArrayView<'_, u16>,
    ) -> Result<Self> {
        let pre = ToneCurveStage::from_columns(pre_table)?;
        let clut = ClutStage::from_array(clut)?;
        let post = ToneCurveStage::from_columns(post_table)?;
        Self::new(pre, clut, post)
    }

    /// Input arity (always 3)
    pub fn input_channels(&self) -> usize {
        PIPELINE_INPUT_CHANNELS
    }

    /// Output arity
    pub fn output_channels(&self) -> usize {
        self.clut.output_channels()
    }

    /// Stages in evaluation order
    pub fn stages(&self) -> [Stage<'_>; 3] {
        [
            Stage::ToneCurves(&self.pre),
            Stage::Clut(&self.clut),
            Stage::ToneCurves(&self.post),
        ]
    }

    /// Leading stage
    pub fn first_stage(&self) -> Stage<'_> {
        Stage::ToneCurves(&self.pre)
    }

    pub fn pre_curves(&self) -> &ToneCurveStage {
        &self.pre
    }

    pub fn clut(&self) -> &ClutStage {
        &self.clut
    }

    pub fn post_curves(&self) -> &ToneCurveStage {
        &self.post
    }

    /// Evaluate one sample
    ///
    /// `input` needs at least 3 values and `output` at least
    /// [`output_channels`](Self::output_channels).
    pub fn eval16(&self, input: &[u16], output: &mut [u16]) {
        let mut a = [0u16; MAX_CHANNELS];
        let mut b = [0u16; MAX_CHANNELS];
        let out_ch = self.output_channels();

        self.pre.eval16(
            &input[..PIPELINE_INPUT_CHANNELS],
            &mut a[..PIPELINE_INPUT_CHANNELS],
        );
        self.clut.eval16(&a[..PIPELINE_INPUT_CHANNELS], &mut b[..out_ch]);
        self.post.eval16(&b[..out_ch], &mut output[..out_ch]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity_pipeline(out: usize) -> Pipeline {
        let pre = ToneCurveStage::new(vec![ToneCurve::linear(2).unwrap(); 3]).unwrap();
        let post = ToneCurveStage::new(vec![ToneCurve::linear(2).unwrap(); out]).unwrap();
        let mut table = Vec::new();
        for i in 0..2u16 {
            for j in 0..2u16 {
                for k in 0..2u16 {
                    for a in 0..out {
                        let v = [i, j, k][a % 3] * 65535;
                        table.push(v);
                    }
                }
            }
        }
        Pipeline::new(pre, ClutStage::new(2, out, table).unwrap(), post).unwrap()
    }

    #[test]
    fn test_arity() {
        let p = identity_pipeline(4);
        assert_eq!(p.input_channels(), 3);
        assert_eq!(p.output_channels(), 4);

        let stages = p.stages();
        assert_eq!(stages[0].output_channels(), 3);
        assert_eq!(stages[1].input_channels(), 3);
        assert_eq!(stages[1].output_channels(), 4);
        assert_eq!(stages[2].input_channels(), 4);
        assert!(matches!(p.first_stage(), Stage::ToneCurves(_)));
    }

    #[test]
    fn test_identity_eval() {
        let p = identity_pipeline(3);
        let mut out = [0u16; 3];

        p.eval16(&[0, 0, 0], &mut out);
        assert_eq!(out, [0, 0, 0]);

        p.eval16(&[65535, 65535, 65535], &mut out);
        assert_eq!(out, [65535, 65535, 65535]);

        p.eval16(&[1000, 30000, 60000], &mut out);
        for (got, want) in out.iter().zip([1000u16, 30000, 60000]) {
            assert!((*got as i32 - want as i32).abs() <= 2, "{out:?}");
        }
    }

    #[test]
    fn test_arity_mismatch() {
        let pre = ToneCurveStage::new(vec![ToneCurve::linear(2).unwrap(); 2]).unwrap();
        let post = ToneCurveStage::new(vec![ToneCurve::linear(2).unwrap(); 3]).unwrap();
        let clut = ClutStage::new(2, 3, vec![0; 24]).unwrap();
        assert!(Pipeline::new(pre, clut.clone(), post.clone()).is_err());

        let pre = ToneCurveStage::new(vec![ToneCurve::linear(2).unwrap(); 3]).unwrap();
        let post4 = ToneCurveStage::new(vec![ToneCurve::linear(2).unwrap(); 4]).unwrap();
        assert!(Pipeline::new(pre, clut, post4).is_err());
    }

    #[test]
    fn test_post_curves_applied_last() {
        let pre = ToneCurveStage::new(vec![ToneCurve::linear(2).unwrap(); 3]).unwrap();
        let post = ToneCurveStage::new(vec![ToneCurve::from_table(vec![65535, 0]).unwrap()]).unwrap();
        // Single output: the first input
        let table = vec![0, 0, 0, 0, 65535, 65535, 65535, 65535];
        let p = Pipeline::new(pre, ClutStage::new(2, 1, table).unwrap(), post).unwrap();

        let mut out = [0u16; 1];
        p.eval16(&[65535, 0, 0], &mut out);
        assert_eq!(out, [0]);
        p.eval16(&[0, 65535, 65535], &mut out);
        assert_eq!(out, [65535]);
    }
}
