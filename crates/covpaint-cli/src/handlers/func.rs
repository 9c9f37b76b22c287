//! Function mode: annotated source of one function

use super::RenderContext;
use crate::error::CliResult;
use crate::output::Reporter;
use covpaint::{locate_function, CoverProfile};

/// Annotated declaration of the first function called `name`
pub fn render_function(
    ctx: &RenderContext<'_>,
    profiles: &[CoverProfile],
    name: &str,
) -> CliResult<String> {
    let (file, extent) = locate_function(profiles, ctx.resolver, name)?;
    tracing::debug!(
        function = name,
        file = %file.path().display(),
        line = extent.start_line(),
        "found function"
    );
    Ok(file.render_function(&extent, &ctx.gradient, ctx.mode)?)
}

/// Print the annotated function
pub fn execute_function(
    ctx: &RenderContext<'_>,
    reporter: &Reporter,
    profiles: &[CoverProfile],
    name: &str,
) -> CliResult<()> {
    let text = render_function(ctx, profiles, name)?;
    reporter.line(&text)?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::handlers::fixture;
    use covpaint::{ansi, Gradient, OutputMode};

    #[test]
    fn test_render_function_plain() {
        let (dir, resolver, profiles) = fixture::module();
        let ctx = RenderContext {
            resolver: &resolver,
            cwd: dir.path().to_path_buf(),
            gradient: Gradient::default(),
            mode: OutputMode::Plain,
        };
        let text = render_function(&ctx, &profiles, "bar").unwrap();
        assert_eq!(text, "func bar() string {\n\treturn \"bar\"\n}");
    }

    #[test]
    fn test_render_function_colored() {
        let (dir, resolver, profiles) = fixture::module();
        let ctx = RenderContext {
            resolver: &resolver,
            cwd: dir.path().to_path_buf(),
            gradient: Gradient::default(),
            mode: OutputMode::RichAnsi,
        };
        let text = render_function(&ctx, &profiles, "foo").unwrap();
        // the `if` body never ran
        assert!(text.contains(ansi::RED));
        // the declaration line before the body is uninstrumented
        assert!(text.starts_with(ansi::BRIGHT_WHITE));
    }

    #[test]
    fn test_unknown_function_is_lookup_miss() {
        let (dir, resolver, profiles) = fixture::module();
        let ctx = RenderContext {
            resolver: &resolver,
            cwd: dir.path().to_path_buf(),
            gradient: Gradient::default(),
            mode: OutputMode::Plain,
        };
        let err = render_function(&ctx, &profiles, "Missing").unwrap_err();
        assert!(err.is_lookup_miss());
        assert_eq!(err.to_string(), "could not find function Missing");
    }
}
