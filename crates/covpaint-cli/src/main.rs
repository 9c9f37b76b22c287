//! Covpaint CLI: Go test coverage painted onto source
//!
//! ## Usage
//!
//! ```bash
//! covpaint                         # Run tests, print per-function report
//! covpaint --func ParseConfig      # Annotated source of one function
//! covpaint server.go               # Annotated source of one file
//! covpaint --no-tests --profile c.out
//! covpaint --legend                # Sample colors
//! ```

use clap::Parser;
use covpaint::{load_profiles, CoverProfile, ModuleResolver};
use covpaint_cli::{
    handlers, init_logging, run_go_test, Cli, CliConfig, CliError, CliResult, Mode,
    ProfileLocation, RenderContext, Reporter, Verbosity,
};
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) if e.is_lookup_miss() => {
            println!("{e}");
            ExitCode::FAILURE
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = build_config(&cli);
    let use_color = config.color.should_color();
    init_logging(config.verbosity, use_color);

    let reporter = Reporter::new(use_color, config.verbosity.is_quiet());
    match cli.mode()? {
        Mode::Legend => {
            handlers::execute_legend(&config.gradient, config.output_mode(), &reporter)
        }
        Mode::Function(name) => with_profiles(&config, &reporter, |ctx, profiles| {
            handlers::execute_function(ctx, &reporter, profiles, &name)
        }),
        Mode::File(needle) => with_profiles(&config, &reporter, |ctx, profiles| {
            handlers::execute_file(ctx, &reporter, profiles, &needle)
        }),
        Mode::Report => with_profiles(&config, &reporter, |ctx, profiles| {
            handlers::execute_report(ctx, &reporter, profiles)
        }),
    }
}

fn build_config(cli: &Cli) -> CliConfig {
    let config = CliConfig::new()
        .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
        .with_color(cli.color.into())
        .with_gradient(cli.gradient())
        .with_run_tests(!cli.no_tests);
    match cli.profile {
        Some(ref path) => config.with_profile_path(path.clone()),
        None => config,
    }
}

/// Produce or locate the profile, parse it, and hand it to `render`.
///
/// A temporary profile lives until `render` returns.
fn with_profiles<F>(config: &CliConfig, reporter: &Reporter, render: F) -> CliResult<()>
where
    F: FnOnce(&RenderContext<'_>, &[CoverProfile]) -> CliResult<()>,
{
    let location = ProfileLocation::prepare(config)?;
    if config.run_tests {
        run_go_test(location.path(), reporter)?;
    } else if !location.path().is_file() {
        return Err(CliError::config(format!(
            "no cover profile at {}; pass --profile or drop --no-tests",
            location.path().display()
        )));
    }
    if config.verbosity.is_verbose() {
        reporter.info(&format!("reading {}", location.path().display()));
    }

    let profiles = load_profiles(location.path())?;
    let resolver = ModuleResolver::from_env()?;
    let ctx = RenderContext {
        resolver: &resolver,
        cwd: std::env::current_dir()?,
        gradient: config.gradient,
        mode: config.output_mode(),
    };
    render(&ctx, &profiles)
}
