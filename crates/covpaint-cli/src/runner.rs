//! Producing the cover profile with `go test`

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Reporter;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use std::time::Instant;
use tempfile::TempPath;

/// Profile read when tests are skipped and no path is given
pub const DEFAULT_PROFILE: &str = "coverage.out";

/// Where this run's cover profile lives.
///
/// A temporary profile is deleted when this value is dropped.
#[derive(Debug)]
pub struct ProfileLocation {
    path: PathBuf,
    temp: Option<TempPath>,
}

impl ProfileLocation {
    /// Pick the configured path, a fresh temp file, or [`DEFAULT_PROFILE`]
    pub fn prepare(config: &CliConfig) -> CliResult<Self> {
        if let Some(ref path) = config.profile_path {
            return Ok(Self {
                path: path.clone(),
                temp: None,
            });
        }
        if !config.run_tests {
            return Ok(Self {
                path: PathBuf::from(DEFAULT_PROFILE),
                temp: None,
            });
        }
        let temp = tempfile::Builder::new()
            .prefix("coverage")
            .tempfile()?
            .into_temp_path();
        Ok(Self {
            path: temp.to_path_buf(),
            temp: Some(temp),
        })
    }

    /// Path of the profile
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the profile is removed at the end of the run
    #[must_use]
    pub const fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }
}

/// Arguments for `go test` writing a count-mode profile to `profile`
#[must_use]
pub fn go_test_args(profile: &Path) -> Vec<String> {
    vec![
        "test".to_string(),
        "-covermode=count".to_string(),
        format!("-coverprofile={}", profile.display()),
        "./...".to_string(),
    ]
}

/// Run `cmd` with stdout and stderr sharing one file, so the captured text
/// keeps the order in which the two streams were written.
pub fn combined_output(cmd: &mut Command) -> io::Result<(ExitStatus, String)> {
    let mut sink = tempfile::tempfile()?;
    let status = cmd
        .stdin(Stdio::null())
        .stdout(sink.try_clone()?)
        .stderr(sink.try_clone()?)
        .status()?;
    sink.seek(SeekFrom::Start(0))?;
    let mut bytes = Vec::new();
    sink.read_to_end(&mut bytes)?;
    Ok((status, String::from_utf8_lossy(&bytes).into_owned()))
}

/// Run the package tests in the working directory, writing `profile`.
///
/// On failure the combined test output is printed before returning.
pub fn run_go_test(profile: &Path, reporter: &Reporter) -> CliResult<()> {
    let args = go_test_args(profile);
    tracing::info!(args = ?args, "running go test");
    let started = Instant::now();
    let spinner = reporter.spinner("go test ./...");

    let result = combined_output(Command::new("go").args(&args))
        .map_err(|e| CliError::test_execution(format!("could not start go: {e}")));
    if let Some(pb) = spinner {
        pb.finish_and_clear();
    }
    let (status, combined) = result?;

    if !status.success() {
        reporter.failure("go test failed");
        eprintln!("{combined}");
        return Err(CliError::test_execution(format!(
            "go test exited with {status}"
        )));
    }

    tracing::info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        profile = %profile.display(),
        "go test finished"
    );
    Ok(())
}
