//! File mode: annotated source of matching profiled files

use super::RenderContext;
use crate::error::CliResult;
use crate::output::Reporter;
use covpaint::{files_matching, CoverProfile};

/// Annotated source of every profiled file whose path contains `needle`
pub fn render_files(
    ctx: &RenderContext<'_>,
    profiles: &[CoverProfile],
    needle: &str,
) -> CliResult<Vec<String>> {
    let files = files_matching(profiles, ctx.resolver, needle)?;
    tracing::debug!(needle, matched = files.len(), "selected files");
    let mut rendered = Vec::with_capacity(files.len());
    for file in &files {
        rendered.push(file.render(&ctx.gradient, ctx.mode)?);
    }
    Ok(rendered)
}

/// Print each matching file
pub fn execute_file(
    ctx: &RenderContext<'_>,
    reporter: &Reporter,
    profiles: &[CoverProfile],
    needle: &str,
) -> CliResult<()> {
    for text in render_files(ctx, profiles, needle)? {
        reporter.line(&text)?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::handlers::fixture;
    use covpaint::{Gradient, OutputMode};

    #[test]
    fn test_render_matching_file() {
        let (dir, resolver, profiles) = fixture::module();
        let ctx = RenderContext {
            resolver: &resolver,
            cwd: dir.path().to_path_buf(),
            gradient: Gradient::default(),
            mode: OutputMode::Plain,
        };
        let rendered = render_files(&ctx, &profiles, "foo.go").unwrap();
        assert_eq!(rendered, [fixture::FOO_GO]);
    }

    #[test]
    fn test_no_match_is_lookup_miss() {
        let (dir, resolver, profiles) = fixture::module();
        let ctx = RenderContext {
            resolver: &resolver,
            cwd: dir.path().to_path_buf(),
            gradient: Gradient::default(),
            mode: OutputMode::Plain,
        };
        let err = render_files(&ctx, &profiles, "other.go").unwrap_err();
        assert!(err.is_lookup_miss());
    }
}
