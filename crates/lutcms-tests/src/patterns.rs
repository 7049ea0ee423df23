//! Table and sample generation
//!
//! Every generator is deterministic: random tables are driven by a seeded
//! ChaCha8 stream so failures reproduce.

use lutcms_core::{ArrayView, Profile, Result, add_lut16};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;

/// Flat tables for one lut16 pipeline
#[derive(Debug, Clone)]
pub struct LutTables {
    pub grid: usize,
    pub output_channels: usize,
    /// `(grid, grid, grid, output_channels)`
    pub clut: Vec<u16>,
    /// `entries × 3`
    pub pre: Vec<u16>,
    /// `entries × output_channels`
    pub post: Vec<u16>,
}

impl LutTables {
    pub fn pre_entries(&self) -> usize {
        self.pre.len() / 3
    }

    pub fn post_entries(&self) -> usize {
        self.post.len() / self.output_channels
    }

    /// Store these tables under `tag_name`
    pub fn add_to(&self, profile: &mut Profile, tag_name: &str) -> Result<()> {
        let (g, out) = (self.grid, self.output_channels);
        add_lut16(
            profile,
            tag_name,
            out,
            &ArrayView::new(&self.clut, &[g, g, g, out])?,
            &ArrayView::new(&self.pre, &[self.pre_entries(), 3])?,
            &ArrayView::new(&self.post, &[self.post_entries(), out])?,
        )
    }

    /// CLUT node `(i, ii, iii)`
    pub fn node(&self, i: usize, ii: usize, iii: usize) -> &[u16] {
        let out = self.output_channels;
        let start = ((i * self.grid + ii) * self.grid + iii) * out;
        &self.clut[start..start + out]
    }
}

/// Grid coordinate `i` of `grid` scaled to 0..=65535
pub fn node_value(i: usize, grid: usize) -> u16 {
    (i * 65535 / (grid - 1)) as u16
}

fn linear_ramp(entries: usize, channels: usize) -> Vec<u16> {
    let mut table = Vec::with_capacity(entries * channels);
    for e in 0..entries {
        table.extend(std::iter::repeat_n(node_value(e, entries), channels));
    }
    table
}

/// Identity curves and a CLUT whose output `a` is input `a % 3`
pub fn identity_tables(grid: usize, output_channels: usize) -> LutTables {
    let mut clut = Vec::with_capacity(grid.pow(3) * output_channels);
    for i in 0..grid {
        for ii in 0..grid {
            for iii in 0..grid {
                let coords = [i, ii, iii];
                for a in 0..output_channels {
                    clut.push(node_value(coords[a % 3], grid));
                }
            }
        }
    }
    LutTables {
        grid,
        output_channels,
        clut,
        pre: linear_ramp(2, 3),
        post: linear_ramp(2, output_channels),
    }
}

/// Identity curves with `entries` entries and a random CLUT
pub fn random_tables(seed: u64, grid: usize, output_channels: usize, entries: usize) -> LutTables {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let clut = (0..grid.pow(3) * output_channels)
        .map(|_| rng.gen_range(0..=u16::MAX))
        .collect();
    LutTables {
        grid,
        output_channels,
        clut,
        pre: linear_ramp(entries, 3),
        post: linear_ramp(entries, output_channels),
    }
}

/// `rows × 3` random samples with every component in `0..=max`
pub fn sample_rows(seed: u64, rows: usize, max: u16) -> Vec<u16> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..rows * 3).map(|_| rng.gen_range(0..=max)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_tables_shape() {
        let t = identity_tables(3, 4);
        assert_eq!(t.clut.len(), 27 * 4);
        assert_eq!(t.node(2, 1, 0), &[65535, 32767, 0, 65535]);
        assert_eq!(t.pre_entries(), 2);
        assert_eq!(t.post_entries(), 2);
    }

    #[test]
    fn test_random_deterministic() {
        let a = random_tables(7, 3, 3, 16);
        let b = random_tables(7, 3, 3, 16);
        assert_eq!(a.clut, b.clut);
        assert_ne!(a.clut, random_tables(8, 3, 3, 16).clut);
        assert_eq!(sample_rows(1, 4, 100), sample_rows(1, 4, 100));
        assert!(sample_rows(2, 64, 100).iter().all(|&v| v <= 100));
    }
}
