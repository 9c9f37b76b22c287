//! Legend mode: sample percentages in their colors

use crate::error::CliResult;
use crate::output::Reporter;
use covpaint::{Gradient, OutputMode};

/// One line per sample percentage
#[must_use]
pub fn render_legend(gradient: &Gradient, mode: OutputMode) -> String {
    let mut out = String::new();
    for line in gradient.legend(mode) {
        out.push_str(&line);
        out.push('\n');
    }
    out
}

/// Print the legend
pub fn execute_legend(gradient: &Gradient, mode: OutputMode, reporter: &Reporter) -> CliResult<()> {
    reporter.emit(&render_legend(gradient, mode))?;
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_legend() {
        let text = render_legend(&Gradient::default(), OutputMode::Plain);
        assert!(text.starts_with("0.0% test\n0.2% test\n"));
        assert!(text.ends_with("95% test\n100% test\n"));
        assert_eq!(text.lines().count(), 26);
    }

    #[test]
    fn test_rich_legend_marks_extremes() {
        let text = render_legend(&Gradient::default(), OutputMode::RichAnsi);
        let first = text.lines().next().unwrap();
        assert_eq!(first, "0.0% \x1b[31mtest\x1b[0m");
        let last = text.lines().last().unwrap();
        assert!(last.contains("\x1b[1m"));
    }
}
