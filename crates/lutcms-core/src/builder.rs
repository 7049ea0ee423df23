//! Storing LUT pipelines in a profile
//!
//! [`add_lut16`] checks every table before it touches the profile: a call
//! that fails leaves the profile exactly as it was.

use crate::array::ArrayView;
use crate::icc::{LutTag, TagData};
use crate::pipeline::{MAX_CHANNELS, PIPELINE_INPUT_CHANNELS, Pipeline};
use crate::profile::Profile;
use crate::{Error, Result};

/// Check an `entries × channels` tone curve table
fn check_curve_table(what: &'static str, table: &ArrayView<'_, u16>, channels: usize) -> Result<()> {
    let shape = table.shape();
    if shape.len() != 2 || shape[1] != channels {
        return Err(Error::shape(
            what,
            format!("2 dimensions (entries, {channels})"),
            format!("shape {shape:?}"),
        ));
    }
    if shape[0] < 2 {
        return Err(Error::shape(
            what,
            "at least 2 entries",
            format!("{} entries", shape[0]),
        ));
    }
    Ok(())
}

/// Check an `(N, N, N, out)` CLUT
fn check_clut(clut: &ArrayView<'_, u16>, output_channels: usize) -> Result<()> {
    let shape = clut.shape();
    if shape.len() != 4 || shape[3] != output_channels {
        return Err(Error::shape(
            "clut",
            format!("4 dimensions (N, N, N, {output_channels})"),
            format!("shape {shape:?}"),
        ));
    }
    if shape[0] != shape[1] || shape[1] != shape[2] {
        return Err(Error::shape(
            "clut",
            "equal grid extents on the first three axes",
            format!("shape {shape:?}"),
        ));
    }
    if shape[0] < 2 {
        return Err(Error::shape(
            "clut",
            "at least 2 grid points per axis",
            format!("{} grid points", shape[0]),
        ));
    }
    Ok(())
}

fn build_lut16(
    tag_name: &str,
    output_channels: usize,
    clut: &ArrayView<'_, u16>,
    pre_table: &ArrayView<'_, u16>,
    post_table: &ArrayView<'_, u16>,
) -> Result<(LutTag, Pipeline)> {
    if output_channels == 0 || output_channels > MAX_CHANNELS {
        return Err(Error::shape(
            "output_channels",
            format!("1 to {MAX_CHANNELS}"),
            output_channels.to_string(),
        ));
    }
    check_curve_table("pre_table", pre_table, PIPELINE_INPUT_CHANNELS)?;
    check_clut(clut, output_channels)?;
    check_curve_table("post_table", post_table, output_channels)?;
    let tag = LutTag::resolve(tag_name)?;

    let pipeline = Pipeline::from_tables(pre_table, clut, post_table)?;
    Ok((tag, pipeline))
}

/// Build a pre-curves → CLUT → post-curves pipeline and store it under
/// `tag_name`
///
/// * `pre_table`: `entries × 3`, one column per input channel
/// * `clut`: `(N, N, N, output_channels)`
/// * `post_table`: `entries × output_channels`
///
/// An existing tag of the same name is replaced.
pub fn add_lut16(
    profile: &mut Profile,
    tag_name: &str,
    output_channels: usize,
    clut: &ArrayView<'_, u16>,
    pre_table: &ArrayView<'_, u16>,
    post_table: &ArrayView<'_, u16>,
) -> Result<()> {
    let (tag, pipeline) = build_lut16(tag_name, output_channels, clut, pre_table, post_table)
        .inspect_err(|e| profile.context().report(e))?;

    tracing::debug!(
        tag = %tag,
        grid = pipeline.clut().grid_points(),
        output_channels,
        pre_entries = pre_table.shape()[0],
        post_entries = post_table.shape()[0],
        "stored lut16 pipeline"
    );
    profile.write_tag(tag, TagData::Pipeline(pipeline));
    Ok(())
}

/// Make `link_tag_name` refer to the data stored under `dest_tag_name`
///
/// Both names must be LUT tags and the destination must already be present.
pub fn link_tag(profile: &mut Profile, link_tag_name: &str, dest_tag_name: &str) -> Result<()> {
    let resolved = LutTag::resolve(link_tag_name).and_then(|link| {
        let dest = LutTag::resolve(dest_tag_name)?;
        if profile.has_tag(dest) {
            Ok((link, dest))
        } else {
            Err(Error::Attachment {
                tag: link.to_string(),
                reason: format!("link target '{dest}' holds no data"),
            })
        }
    });
    let (link, dest) = resolved.inspect_err(|e| profile.context().report(e))?;

    profile.link_tag(link, dest);
    tracing::debug!(link = %link, dest = %dest, "linked tag");
    Ok(())
}
