//! lut16Type (`mft2`)
//!
//! Layout after the 8-byte type header:
//!
//! | offset | content                                  |
//! |--------|------------------------------------------|
//! | 0      | input channels, output channels, grid, 0 |
//! | 4      | 3×3 matrix (s15Fixed16, row-major)       |
//! | 40     | input entries, output entries (u16)      |
//! | 44     | input tables, CLUT, output tables (u16)  |
//!
//! See ICC.1:2001-04 Section 6.5.7

use crate::icc::error::IccError;
use crate::icc::types::{S15Fixed16, TypeSignature};
use crate::pipeline::{ClutStage, MAX_CHANNELS, Pipeline, ToneCurve, ToneCurveStage};

/// Largest grid size a lut16 tag can declare
pub const MAX_GRID_POINTS: usize = u8::MAX as usize;
/// Largest channel count a lut16 tag can declare
pub const MAX_LUT16_CHANNELS: usize = 15;
/// Largest table entry count a lut16 tag can declare
pub const MAX_TABLE_ENTRIES: usize = 4096;

const ONE: S15Fixed16 = S15Fixed16::from_raw(0x10000);
const ZERO: S15Fixed16 = S15Fixed16::from_raw(0);

/// Lut16 tag data
#[derive(Debug, Clone, PartialEq)]
pub struct Lut16Data {
    /// Number of input channels
    pub input_channels: u8,
    /// Number of output channels
    pub output_channels: u8,
    /// Number of CLUT grid points
    pub grid_points: u8,
    /// 3x3 matrix (stored row-major)
    pub matrix: [[S15Fixed16; 3]; 3],
    /// Number of input table entries
    pub input_entries: u16,
    /// Number of output table entries
    pub output_entries: u16,
    /// Input curves (one per input channel)
    pub input_curves: Vec<Vec<u16>>,
    /// CLUT data
    pub clut: Vec<u16>,
    /// Output curves (one per output channel)
    pub output_curves: Vec<Vec<u16>>,
}

fn read_u16_table(data: &[u8], offset: usize, count: usize) -> Vec<u16> {
    data[offset..offset + count * 2]
        .chunks_exact(2)
        .map(|c| u16::from_be_bytes([c[0], c[1]]))
        .collect()
}

fn read_curves(data: &[u8], offset: usize, channels: usize, entries: usize) -> Vec<Vec<u16>> {
    (0..channels)
        .map(|ch| read_u16_table(data, offset + ch * entries * 2, entries))
        .collect()
}

fn uniform_entries(stage: &ToneCurveStage, what: &str) -> Result<u16, IccError> {
    let entries = stage.uniform_entries().ok_or_else(|| {
        IccError::Unsupported(format!("{what} curves with differing entry counts"))
    })?;
    if entries > MAX_TABLE_ENTRIES {
        return Err(IccError::Unsupported(format!(
            "{what} curves with {entries} entries (max {MAX_TABLE_ENTRIES})"
        )));
    }
    Ok(entries as u16)
}

impl Lut16Data {
    /// Parse Lut16 data from bytes (after type signature and reserved bytes)
    pub fn parse(data: &[u8]) -> Result<Self, IccError> {
        if data.len() < 44 {
            return Err(IccError::CorruptedData("Lut16 tag too small".to_string()));
        }

        let input_channels = data[0];
        let output_channels = data[1];
        let grid_points = data[2];
        // data[3] is padding

        let mut matrix = [[S15Fixed16::default(); 3]; 3];
        for (row, cols) in matrix.iter_mut().enumerate() {
            for (col, value) in cols.iter_mut().enumerate() {
                let offset = 4 + (row * 3 + col) * 4;
                *value = S15Fixed16::from_be_bytes([
                    data[offset],
                    data[offset + 1],
                    data[offset + 2],
                    data[offset + 3],
                ]);
            }
        }

        let input_entries = u16::from_be_bytes([data[40], data[41]]);
        let output_entries = u16::from_be_bytes([data[42], data[43]]);

        let table_offset = 44;
        let overflow = || IccError::CorruptedData("Lut16 table sizes overflow".to_string());

        // Input tables: inputChannels * inputEntries samples
        let input_samples = input_channels as usize * input_entries as usize;

        // CLUT: gridPoints^inputChannels * outputChannels samples
        let clut_entries = (grid_points as usize)
            .checked_pow(input_channels as u32)
            .and_then(|n| n.checked_mul(output_channels as usize))
            .ok_or_else(overflow)?;
        let output_samples = output_channels as usize * output_entries as usize;

        let clut_offset = table_offset + input_samples * 2;
        let output_offset = clut_entries
            .checked_mul(2)
            .and_then(|size| size.checked_add(clut_offset))
            .ok_or_else(overflow)?;
        let end = output_offset
            .checked_add(output_samples * 2)
            .ok_or_else(overflow)?;

        if data.len() < end {
            return Err(IccError::CorruptedData("Lut16 tables truncated".to_string()));
        }

        Ok(Self {
            input_channels,
            output_channels,
            grid_points,
            matrix,
            input_entries,
            output_entries,
            input_curves: read_curves(
                data,
                table_offset,
                input_channels as usize,
                input_entries as usize,
            ),
            clut: read_u16_table(data, clut_offset, clut_entries),
            output_curves: read_curves(
                data,
                output_offset,
                output_channels as usize,
                output_entries as usize,
            ),
        })
    }

    /// Lay a pipeline out as lut16 data with an identity matrix
    pub fn from_pipeline(pipeline: &Pipeline) -> Result<Self, IccError> {
        let clut = pipeline.clut();
        if clut.grid_points() > MAX_GRID_POINTS {
            return Err(IccError::Unsupported(format!(
                "{} CLUT grid points (max {MAX_GRID_POINTS})",
                clut.grid_points()
            )));
        }
        if pipeline.output_channels() > MAX_LUT16_CHANNELS {
            return Err(IccError::Unsupported(format!(
                "{} output channels (max {MAX_LUT16_CHANNELS})",
                pipeline.output_channels()
            )));
        }

        let input_entries = uniform_entries(pipeline.pre_curves(), "input")?;
        let output_entries = uniform_entries(pipeline.post_curves(), "output")?;
        let curve_tables = |stage: &ToneCurveStage| {
            stage
                .curves()
                .iter()
                .map(|c| c.table().to_vec())
                .collect::<Vec<_>>()
        };

        Ok(Self {
            input_channels: pipeline.input_channels() as u8,
            output_channels: pipeline.output_channels() as u8,
            grid_points: clut.grid_points() as u8,
            matrix: [[ONE, ZERO, ZERO], [ZERO, ONE, ZERO], [ZERO, ZERO, ONE]],
            input_entries,
            output_entries,
            input_curves: curve_tables(pipeline.pre_curves()),
            clut: clut.table().to_vec(),
            output_curves: curve_tables(pipeline.post_curves()),
        })
    }

    /// Check if the matrix is identity
    pub fn matrix_is_identity(&self) -> bool {
        self.matrix == [[ONE, ZERO, ZERO], [ZERO, ONE, ZERO], [ZERO, ZERO, ONE]]
    }

    /// Convert to a pipeline
    ///
    /// Only 3-input tables with an identity matrix map onto [`Pipeline`];
    /// anything else yields `None`.
    pub fn to_pipeline(&self) -> Option<Pipeline> {
        if self.input_channels != 3
            || !self.matrix_is_identity()
            || self.output_channels as usize > MAX_CHANNELS
        {
            return None;
        }
        let stage = |curves: &[Vec<u16>]| {
            curves
                .iter()
                .map(|t| ToneCurve::from_table(t.clone()))
                .collect::<crate::Result<Vec<_>>>()
                .and_then(ToneCurveStage::new)
        };
        let pre = stage(&self.input_curves).ok()?;
        let clut = ClutStage::new(
            self.grid_points as usize,
            self.output_channels as usize,
            self.clut.clone(),
        )
        .ok()?;
        let post = stage(&self.output_curves).ok()?;
        Pipeline::new(pre, clut, post).ok()
    }

    /// Encode as a complete lut16Type tag
    pub fn to_bytes(&self) -> Vec<u8> {
        let tables = self.input_curves.iter().map(Vec::len).sum::<usize>()
            + self.clut.len()
            + self.output_curves.iter().map(Vec::len).sum::<usize>();
        let mut out = Vec::with_capacity(52 + tables * 2);

        out.extend_from_slice(&TypeSignature::LUT16.to_be_bytes());
        out.extend_from_slice(&[0u8; 4]);
        out.extend_from_slice(&[self.input_channels, self.output_channels, self.grid_points, 0]);
        for value in self.matrix.iter().flatten() {
            out.extend_from_slice(&value.to_be_bytes());
        }
        out.extend_from_slice(&self.input_entries.to_be_bytes());
        out.extend_from_slice(&self.output_entries.to_be_bytes());

        let samples = self
            .input_curves
            .iter()
            .flatten()
            .chain(&self.clut)
            .chain(self.output_curves.iter().flatten());
        for v in samples {
            out.extend_from_slice(&v.to_be_bytes());
        }
        out
    }
}
