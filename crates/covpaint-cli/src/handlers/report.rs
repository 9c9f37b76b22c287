//! Report mode: per-file function tables and the run total

use super::RenderContext;
use crate::error::CliResult;
use crate::output::Reporter;
use covpaint::{display_path, CoverProfile, RunSummary, SourceFile};

/// Header and function rows for one profiled file
pub fn render_file_section(ctx: &RenderContext<'_>, cover: &CoverProfile) -> CliResult<String> {
    let file = SourceFile::load(cover, ctx.resolver)?;
    let report = file.report(display_path(file.path(), &ctx.cwd))?;
    Ok(report.render(&ctx.gradient, ctx.mode))
}

/// Run-wide total over every block of every profile
#[must_use]
pub fn render_summary(ctx: &RenderContext<'_>, profiles: &[CoverProfile]) -> String {
    RunSummary::from_profiles(profiles).render(&ctx.gradient, ctx.mode)
}

/// Print each file section as soon as it is ready, then the summary.
///
/// Stops at the first file that cannot be resolved or read.
pub fn execute_report(
    ctx: &RenderContext<'_>,
    reporter: &Reporter,
    profiles: &[CoverProfile],
) -> CliResult<()> {
    for cover in profiles {
        reporter.emit(&render_file_section(ctx, cover)?)?;
    }
    reporter.emit(&render_summary(ctx, profiles))?;
    Ok(())
}
