//! 3-input color lookup table stage

use crate::array::ArrayView;
use crate::math::tetrahedral16;
use crate::{Error, Result};

use super::{MAX_CHANNELS, PIPELINE_INPUT_CHANNELS};

/// Cubic 3-input CLUT with 16-bit samples
///
/// Samples are stored with the first input varying slowest and the output
/// channel innermost, which is also the lut16 storage order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClutStage {
    grid_points: usize,
    output_channels: usize,
    table: Vec<u16>,
}

impl ClutStage {
    /// Build from a flattened table
    pub fn new(grid_points: usize, output_channels: usize, table: Vec<u16>) -> Result<Self> {
        if grid_points < 2 {
            return Err(Error::shape(
                "clut",
                "at least 2 grid points per axis",
                format!("{grid_points} grid points"),
            ));
        }
        if output_channels == 0 || output_channels > MAX_CHANNELS {
            return Err(Error::shape(
                "clut",
                format!("1 to {MAX_CHANNELS} output channels"),
                format!("{output_channels} output channels"),
            ));
        }
        let expected = grid_points.pow(PIPELINE_INPUT_CHANNELS as u32) * output_channels;
        if table.len() != expected {
            return Err(Error::BufferSize {
                expected,
                actual: table.len(),
            });
        }
        Ok(Self {
            grid_points,
            output_channels,
            table,
        })
    }

    /// Build from a 4-D `(r, g, b, out)` table
    ///
    /// Node `(i, ii, iii)` channel `a` lands at
    /// `((i * N + ii) * N + iii) * out + a`.
    pub fn from_array(clut: &ArrayView<'_, u16>) -> Result<Self> {
        let shape = clut.shape();
        if shape.len() != 4 {
            return Err(Error::shape(
                "clut",
                "4 dimensions",
                format!("{} dimensions", shape.len()),
            ));
        }
        let (n, out) = (shape[0], shape[3]);
        if shape[1] != n || shape[2] != n {
            return Err(Error::shape(
                "clut",
                "equal grid extents on the first three axes",
                format!("{shape:?}"),
            ));
        }
        let mut table = Vec::with_capacity(clut.as_slice().len());
        for i in 0..n {
            for ii in 0..n {
                for iii in 0..n {
                    for a in 0..out {
                        table.push(clut.get(&[i, ii, iii, a]).unwrap_or_default());
                    }
                }
            }
        }
        Self::new(n, out, table)
    }

    /// Grid points per input axis
    pub fn grid_points(&self) -> usize {
        self.grid_points
    }

    /// Number of output channels
    pub fn output_channels(&self) -> usize {
        self.output_channels
    }

    /// Flattened samples
    pub fn table(&self) -> &[u16] {
        &self.table
    }

    /// Samples stored at grid node `(i, ii, iii)`
    pub fn node(&self, i: usize, ii: usize, iii: usize) -> &[u16] {
        let n = self.grid_points;
        let start = ((i * n + ii) * n + iii) * self.output_channels;
        &self.table[start..start + self.output_channels]
    }

    /// Interpolate the first three input samples into `output`
    #[inline]
    pub fn eval16(&self, input: &[u16], output: &mut [u16]) {
        tetrahedral16(
            &self.table,
            self.grid_points,
            [input[0], input[1], input[2]],
            &mut output[..self.output_channels],
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(i: usize, ii: usize, iii: usize, a: usize) -> u16 {
        (i * 1000 + ii * 100 + iii * 10 + a) as u16
    }

    #[test]
    fn test_flatten_order() {
        let n = 3;
        let out = 2;
        let mut data = Vec::new();
        for i in 0..n {
            for ii in 0..n {
                for iii in 0..n {
                    for a in 0..out {
                        data.push(sample(i, ii, iii, a));
                    }
                }
            }
        }
        let view = ArrayView::new(&data, &[n, n, n, out]).unwrap();
        let clut = ClutStage::from_array(&view).unwrap();

        assert_eq!(clut.grid_points(), 3);
        assert_eq!(clut.output_channels(), 2);
        assert_eq!(clut.node(2, 1, 0), &[2100, 2101]);
        assert_eq!(clut.table()[((n + 2) * n + 1) * out + 1], sample(1, 2, 1, 1));
    }

    #[test]
    fn test_rejects_bad_tables() {
        assert!(ClutStage::new(1, 3, vec![0; 3]).is_err());
        assert!(ClutStage::new(2, 0, Vec::new()).is_err());
        assert!(ClutStage::new(2, MAX_CHANNELS + 1, vec![0; 8 * 17]).is_err());
        assert!(matches!(
            ClutStage::new(2, 3, vec![0; 23]),
            Err(Error::BufferSize {
                expected: 24,
                actual: 23
            })
        ));
    }

    #[test]
    fn test_eval_at_corners() {
        let table: Vec<u16> = (0..8 * 3).map(|i| (i * 2000) as u16).collect();
        let clut = ClutStage::new(2, 3, table).unwrap();
        let mut out = [0u16; 3];

        clut.eval16(&[0, 0, 0], &mut out);
        assert_eq!(out, [0, 2000, 4000]);

        clut.eval16(&[65535, 65535, 65535], &mut out);
        assert_eq!(&out, clut.node(1, 1, 1));
    }
}
