//! lcms2 reference transforms

use anyhow::{Context, Result, ensure};
use lcms2::{Intent, PixelFormat, Profile, Transform};

/// Transform RGB 16-bit rows through an ICC profile with lcms2
///
/// The profile is used as both source and destination, so samples travel
/// device → PCS through `A2B*` and back through `B2A*` for `intent`.
pub fn transform_lcms2_rgb16(icc: &[u8], rows: &[u16], intent: Intent) -> Result<Vec<u16>> {
    ensure!(rows.len() % 3 == 0, "rows are not RGB triplets");

    let profile = Profile::new_icc(icc).context("lcms2 profile")?;
    let transform: Transform<[u16; 3], [u16; 3]> =
        Transform::new(&profile, PixelFormat::RGB_16, &profile, PixelFormat::RGB_16, intent)
            .context("lcms2 transform")?;

    let src: Vec<[u16; 3]> = rows.chunks_exact(3).map(|c| [c[0], c[1], c[2]]).collect();
    let mut dst = vec![[0u16; 3]; src.len()];
    transform.transform_pixels(&src, &mut dst);

    Ok(dst.into_iter().flatten().collect())
}
