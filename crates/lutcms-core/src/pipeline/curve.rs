//! Tabulated tone curves
//!
//! A tone curve is a 1-D lookup sampled at equally spaced points over the
//! 16-bit domain. A [`ToneCurveStage`] holds one curve per channel.

use crate::array::ArrayView;
use crate::math::lerp16;
use crate::{Error, Result};

use super::MAX_CHANNELS;

/// 16-bit tabulated tone curve
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurve {
    table: Vec<u16>,
}

impl ToneCurve {
    /// Build a curve from its samples; at least two are required
    pub fn from_table(table: Vec<u16>) -> Result<Self> {
        if table.len() < 2 {
            return Err(Error::shape(
                "tone curve",
                "at least 2 entries",
                format!("{} entries", table.len()),
            ));
        }
        Ok(Self { table })
    }

    /// Straight ramp from 0 to 65535
    pub fn linear(entries: usize) -> Result<Self> {
        let Some(last) = entries.checked_sub(1).filter(|&l| l > 0) else {
            return Self::from_table(Vec::new());
        };
        let table = (0..entries)
            .map(|i| ((i as u64 * 65535 + last as u64 / 2) / last as u64) as u16)
            .collect();
        Self::from_table(table)
    }

    /// Samples of the curve
    pub fn table(&self) -> &[u16] {
        &self.table
    }

    /// Number of samples
    pub fn entries(&self) -> usize {
        self.table.len()
    }

    /// Evaluate the curve at a 16-bit input
    #[inline]
    pub fn eval16(&self, value: u16) -> u16 {
        lerp16(&self.table, value)
    }
}

/// One tone curve per channel
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToneCurveStage {
    curves: Vec<ToneCurve>,
}

impl ToneCurveStage {
    /// Group per-channel curves into a stage
    pub fn new(curves: Vec<ToneCurve>) -> Result<Self> {
        if curves.is_empty() || curves.len() > MAX_CHANNELS {
            return Err(Error::shape(
                "tone curve stage",
                format!("1 to {MAX_CHANNELS} curves"),
                format!("{} curves", curves.len()),
            ));
        }
        Ok(Self { curves })
    }

    /// Build a stage from an `entries × channels` table, one curve per column
    pub fn from_columns(table: &ArrayView<'_, u16>) -> Result<Self> {
        if table.ndim() != 2 {
            return Err(Error::shape(
                "tone curve table",
                "2 dimensions",
                format!("{} dimensions", table.ndim()),
            ));
        }
        let curves = (0..table.shape()[1])
            .map(|ch| ToneCurve::from_table(table.column(ch)))
            .collect::<Result<Vec<_>>>()?;
        Self::new(curves)
    }

    /// Number of channels (curves)
    pub fn channels(&self) -> usize {
        self.curves.len()
    }

    /// Per-channel curves
    pub fn curves(&self) -> &[ToneCurve] {
        &self.curves
    }

    /// Entry count shared by every curve, `None` if they differ
    pub fn uniform_entries(&self) -> Option<usize> {
        let first = self.curves.first()?.entries();
        self.curves
            .iter()
            .all(|c| c.entries() == first)
            .then_some(first)
    }

    /// Apply each channel's curve to the matching input sample
    #[inline]
    pub fn eval16(&self, input: &[u16], output: &mut [u16]) {
        for ((curve, &v), out) in self.curves.iter().zip(input).zip(output) {
            *out = curve.eval16(v);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_curve_needs_two_entries() {
        assert!(matches!(
            ToneCurve::from_table(vec![100]),
            Err(Error::Shape { what: "tone curve", .. })
        ));
        assert!(ToneCurve::from_table(vec![0, 65535]).is_ok());
    }

    #[test]
    fn test_linear_curve() {
        let curve = ToneCurve::linear(5).unwrap();
        assert_eq!(curve.table(), &[0, 16384, 32768, 49151, 65535]);
        for v in [0u16, 100, 30000, 65535] {
            let diff = (curve.eval16(v) as i32 - v as i32).abs();
            assert!(diff <= 1, "linear curve at {v}");
        }
        assert!(ToneCurve::linear(1).is_err());
    }

    #[test]
    fn test_stage_from_columns() {
        // 3 entries, 2 channels
        let data = [0u16, 65535, 32768, 32768, 65535, 0];
        let view = ArrayView::new(&data, &[3, 2]).unwrap();
        let stage = ToneCurveStage::from_columns(&view).unwrap();

        assert_eq!(stage.channels(), 2);
        assert_eq!(stage.curves()[0].table(), &[0, 32768, 65535]);
        assert_eq!(stage.curves()[1].table(), &[65535, 32768, 0]);
        assert_eq!(stage.uniform_entries(), Some(3));

        let mut out = [0u16; 2];
        stage.eval16(&[0, 0], &mut out);
        assert_eq!(out, [0, 65535]);
        stage.eval16(&[65535, 65535], &mut out);
        assert_eq!(out, [65535, 0]);
    }

    #[test]
    fn test_stage_rejects_empty() {
        assert!(ToneCurveStage::new(Vec::new()).is_err());
    }

    #[test]
    fn test_stage_mixed_entries() {
        let stage = ToneCurveStage::new(vec![
            ToneCurve::linear(2).unwrap(),
            ToneCurve::linear(3).unwrap(),
        ])
        .unwrap();
        assert_eq!(stage.uniform_entries(), None);
    }
}
