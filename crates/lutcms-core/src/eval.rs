//! Evaluating stored pipelines against caller buffers
//!
//! Input and output are `rows × channels` views. Every row is evaluated
//! independently; nothing is written unless all checks pass.

use crate::array::{ArrayView, ArrayViewMut};
use crate::icc::LutTag;
use crate::pipeline::{Pipeline, Stage};
use crate::profile::Profile;
use crate::{Error, Result};

fn stored_pipeline<'p>(profile: &'p Profile, tag_name: &str) -> Result<&'p Pipeline> {
    let tag = LutTag::resolve(tag_name)?;
    profile
        .read_tag(tag)
        .ok_or_else(|| Error::MissingTag(tag_name.to_string()))?
        .as_pipeline()
        .ok_or_else(|| Error::NotAPipeline(tag_name.to_string()))
}

fn check_rows(
    input: &ArrayView<'_, u16>,
    output: &ArrayViewMut<'_, u16>,
    in_ch: usize,
    out_ch: usize,
) -> Result<usize> {
    let (ins, outs) = (input.shape(), output.shape());
    if ins.len() != 2 || ins[1] != in_ch {
        return Err(Error::shape(
            "input",
            format!("(rows, {in_ch})"),
            format!("shape {ins:?}"),
        ));
    }
    if outs.len() != 2 || outs[1] != out_ch {
        return Err(Error::shape(
            "output",
            format!("(rows, {out_ch})"),
            format!("shape {outs:?}"),
        ));
    }
    if ins[0] != outs[0] {
        return Err(Error::shape(
            "output",
            format!("{} rows", ins[0]),
            format!("{} rows", outs[0]),
        ));
    }
    Ok(ins[0])
}

fn eval_rows(
    profile: &Profile,
    tag_name: &str,
    input: &ArrayView<'_, u16>,
    output: &mut ArrayViewMut<'_, u16>,
    stage_of: impl for<'a> Fn(&'a Pipeline) -> Option<Stage<'a>>,
) -> Result<()> {
    let checked = stored_pipeline(profile, tag_name).and_then(|pipeline| {
        let stage = stage_of(pipeline);
        let (in_ch, out_ch) = match stage {
            Some(stage) => (stage.input_channels(), stage.output_channels()),
            None => (pipeline.input_channels(), pipeline.output_channels()),
        };
        let rows = check_rows(input, output, in_ch, out_ch)?;
        Ok((pipeline, stage, rows))
    });
    let (pipeline, stage, rows) = checked.inspect_err(|e| profile.context().report(e))?;

    for row in 0..rows {
        let src = input.row(row);
        let dst = output.row_mut(row);
        match stage {
            Some(stage) => stage.eval16(src, dst),
            None => pipeline.eval16(src, dst),
        }
    }

    tracing::trace!(tag = tag_name, rows, "evaluated rows");
    Ok(())
}

/// Evaluate the full pipeline stored under `tag_name`
///
/// `input` is `rows × 3`, `output` is `rows × output_channels`.
pub fn eval_lut16(
    profile: &Profile,
    tag_name: &str,
    input: &ArrayView<'_, u16>,
    output: &mut ArrayViewMut<'_, u16>,
) -> Result<()> {
    eval_rows(profile, tag_name, input, output, |_| None)
}

/// Evaluate only the leading tone curves of the pipeline under `tag_name`
///
/// Both `input` and `output` are `rows × curves`.
pub fn eval_pre_table(
    profile: &Profile,
    tag_name: &str,
    input: &ArrayView<'_, u16>,
    output: &mut ArrayViewMut<'_, u16>,
) -> Result<()> {
    eval_rows(profile, tag_name, input, output, |pipeline| {
        Some(pipeline.first_stage())
    })
}
