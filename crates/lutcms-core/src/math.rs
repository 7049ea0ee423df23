//! 16-bit fixed-point interpolation
//!
//! Coordinates are mapped into the table domain as 16.16 fixed point the
//! same way Little CMS does (`_cmsToFixedDomain`), so that evaluating a
//! table built here and evaluating the same table after it has been
//! serialized and loaded by lcms2 give the same 16-bit results.
//!
//! Both interpolators are exact at table nodes: an input that lands on a
//! node returns the stored value unchanged.

/// Map `a` (value × domain) to 16.16 fixed point, rounding as lcms2 does
#[inline]
pub fn to_fixed_domain(a: i64) -> i64 {
    a + ((a + 0x7fff) / 0xffff)
}

/// Split a 16.16 value into integer cell and 16-bit fractional rest
#[inline]
fn split_fixed(v: i64) -> (usize, i64) {
    ((v >> 16) as usize, v & 0xffff)
}

/// Linear interpolation over a 1-D 16-bit table
///
/// The table samples the input domain `[0, 65535]` at equally spaced points.
/// An empty table behaves as the identity.
pub fn lerp16(table: &[u16], value: u16) -> u16 {
    let Some(domain) = table.len().checked_sub(1) else {
        return value;
    };

    if value == u16::MAX || domain == 0 {
        return table[domain];
    }

    let (cell, rest) = split_fixed(to_fixed_domain(value as i64 * domain as i64));
    let y0 = table[cell] as i64;
    let y1 = table[cell + 1] as i64;

    (y0 + (((y1 - y0) * rest + 0x8000) >> 16)) as u16
}

/// Tetrahedral interpolation in a 3-input 16-bit CLUT
///
/// `table` is laid out with the first input varying slowest and the output
/// channel innermost: node `(i, j, k)` starts at
/// `((i * grid + j) * grid + k) * output.len()`.
///
/// Requires `grid >= 2` and `table.len() == grid³ * output.len()`.
pub fn tetrahedral16(table: &[u16], grid: usize, input: [u16; 3], output: &mut [u16]) {
    let out_ch = output.len();
    let domain = (grid - 1) as i64;

    // Strides of the first, second and third input
    let strides = [out_ch * grid * grid, out_ch * grid, out_ch];

    let mut base = 0usize;
    let mut axes = [(0i64, 0usize); 3];
    for (axis, (&v, &stride)) in input.iter().zip(&strides).enumerate() {
        let (cell, rest) = split_fixed(to_fixed_domain(v as i64 * domain));
        base += cell * stride;
        // At the top of the domain the cell is already the last node
        let step = if v == u16::MAX { 0 } else { stride };
        axes[axis] = (rest, step);
    }

    // Walk the tetrahedron from the base node along the axes with the
    // largest fractional parts first
    axes.sort_by(|a, b| b.0.cmp(&a.0));
    let (r1, s1) = axes[0];
    let (r2, s2) = axes[1];
    let (r3, s3) = axes[2];
    let v1 = base + s1;
    let v2 = v1 + s2;
    let v3 = v2 + s3;

    for (ch, out) in output.iter_mut().enumerate() {
        let c0 = table[base + ch] as i64;
        let c1 = table[v1 + ch] as i64;
        let c2 = table[v2 + ch] as i64;
        let c3 = table[v3 + ch] as i64;

        let rest = (c1 - c0) * r1 + (c2 - c1) * r2 + (c3 - c2) * r3 + 0x8001;
        let value = c0 + ((rest + (rest >> 16)) >> 16);
        *out = value.clamp(0, u16::MAX as i64) as u16;
    }
}
