//! CLI command definitions using clap

use crate::error::{CliError, CliResult};
use clap::{Parser, ValueEnum};
use covpaint::{Gradient, Rgb};
use std::path::{Path, PathBuf};

/// Covpaint: Go test coverage painted onto source in the terminal
#[derive(Parser, Debug)]
#[command(name = "covpaint")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "With a single argument, a path ending in .go that exists is shown \
                        as --file, anything else as --func.")]
pub struct Cli {
    /// Function name or .go file to show
    #[arg(value_name = "FUNC|FILE")]
    pub target: Option<String>,

    /// Show only the named function
    #[arg(long = "func", value_name = "NAME")]
    pub func: Option<String>,

    /// Show annotated source for profiled files whose path contains NAME
    #[arg(long, value_name = "NAME")]
    pub file: Option<String>,

    /// Cover profile location (a temp file when running tests without it)
    #[arg(long, value_name = "PATH", env = "COVPAINT_PROFILE")]
    pub profile: Option<PathBuf>,

    /// Read an existing profile instead of running `go test`
    #[arg(long)]
    pub no_tests: bool,

    /// Print sample colors and exit
    #[arg(long)]
    pub legend: bool,

    /// Gradient color for the lowest coverage step
    #[arg(long, value_name = "HEX", env = "COVPAINT_LOW_COLOR", default_value = "#abc8aa")]
    pub low_color: Rgb,

    /// Gradient color for full coverage
    #[arg(long, value_name = "HEX", env = "COVPAINT_HIGH_COLOR", default_value = "#2a770b")]
    pub high_color: Rgb,

    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (suppress non-error output)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,
}

/// What a single invocation renders
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Sample colors
    Legend,
    /// One function's annotated source
    Function(String),
    /// Annotated source of matching files
    File(String),
    /// Per-file, per-function table and run total
    Report,
}

impl Cli {
    /// Gradient from the color flags
    #[must_use]
    pub const fn gradient(&self) -> Gradient {
        Gradient::new(self.low_color, self.high_color)
    }

    /// Rendering mode, checking the filesystem for a positional `.go` file
    pub fn mode(&self) -> CliResult<Mode> {
        self.mode_with(Path::is_file)
    }

    /// Rendering mode with an injectable existence check
    pub fn mode_with(&self, exists: impl Fn(&Path) -> bool) -> CliResult<Mode> {
        if self.legend {
            return Ok(Mode::Legend);
        }
        if self.target.is_some() && (self.func.is_some() || self.file.is_some()) {
            return Err(CliError::invalid_argument(
                "give a positional FUNC|FILE or --func/--file, not both",
            ));
        }
        if let Some(ref name) = self.func {
            return Ok(Mode::Function(name.clone()));
        }
        if let Some(ref name) = self.file {
            return Ok(Mode::File(name.clone()));
        }
        Ok(match self.target {
            Some(ref target)
                if Path::new(target).extension().is_some_and(|ext| ext == "go")
                    && exists(Path::new(target)) =>
            {
                Mode::File(target.clone())
            }
            Some(ref target) => Mode::Function(target.clone()),
            None => Mode::Report,
        })
    }
}

/// Color argument for CLI
#[derive(Debug, Clone, Copy, ValueEnum, Default)]
pub enum ColorArg {
    /// Automatic color detection
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

impl From<ColorArg> for crate::config::ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Auto => Self::Auto,
            ColorArg::Always => Self::Always,
            ColorArg::Never => Self::Never,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
mod tests {
    use super::*;
    use crate::config::ColorChoice;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("covpaint").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn test_no_args_is_report() {
        assert_eq!(parse(&[]).mode_with(|_| true).unwrap(), Mode::Report);
    }

    #[test]
    fn test_legend_wins() {
        let cli = parse(&["--legend", "--func", "Foo"]);
        assert_eq!(cli.mode_with(|_| true).unwrap(), Mode::Legend);
    }

    #[test]
    fn test_func_flag() {
        let cli = parse(&["--func", "Handle"]);
        assert_eq!(cli.mode_with(|_| true).unwrap(), Mode::Function("Handle".to_string()));
    }

    #[test]
    fn test_file_flag() {
        let cli = parse(&["--file", "server"]);
        assert_eq!(cli.mode_with(|_| false).unwrap(), Mode::File("server".to_string()));
    }

    #[test]
    fn test_positional_existing_go_file() {
        let cli = parse(&["main.go"]);
        assert_eq!(cli.mode_with(|_| true).unwrap(), Mode::File("main.go".to_string()));
    }

    #[test]
    fn test_positional_missing_go_file_is_function() {
        let cli = parse(&["main.go"]);
        assert_eq!(cli.mode_with(|_| false).unwrap(), Mode::Function("main.go".to_string()));
    }

    #[test]
    fn test_positional_name_is_function() {
        let cli = parse(&["ParseConfig"]);
        assert_eq!(cli.mode_with(|_| true).unwrap(), Mode::Function("ParseConfig".to_string()));
    }

    #[test]
    fn test_positional_and_flag_conflict() {
        let cli = parse(&["Foo", "--func", "Bar"]);
        let err = cli.mode_with(|_| true).unwrap_err();
        assert!(err.to_string().contains("Invalid argument"));
    }

    #[test]
    fn test_default_gradient() {
        let cli = parse(&[]);
        assert_eq!(cli.gradient(), Gradient::default());
    }

    #[test]
    fn test_custom_colors() {
        let cli = parse(&["--low-color", "#000000", "--high-color", "ffffff"]);
        assert_eq!(
            cli.gradient(),
            Gradient::new(Rgb::new(0, 0, 0), Rgb::new(255, 255, 255))
        );
    }

    #[test]
    fn test_bad_color_is_rejected() {
        let result = Cli::try_parse_from(["covpaint", "--low-color", "green"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_verbosity_flags() {
        let cli = parse(&["-vv", "--no-tests"]);
        assert_eq!(cli.verbose, 2);
        assert!(cli.no_tests);
        assert!(!cli.quiet);
    }

    #[test]
    fn test_color_arg_conversion() {
        let cli = parse(&["--color", "never"]);
        assert_eq!(ColorChoice::from(cli.color), ColorChoice::Never);
        assert_eq!(ColorChoice::from(ColorArg::Always), ColorChoice::Always);
        assert_eq!(ColorChoice::from(ColorArg::Auto), ColorChoice::Auto);
    }
}
