//! Tabular coverage report: file headers, function rows and the run summary.

use crate::coverage::{CoverProfile, FunctionCoverage, StatementTotals};
use crate::paint::{ansi, Gradient, OutputMode};
use std::fmt::Write as _;
use std::path::Path;

const FILE_RULE: usize = 27;
const SUMMARY_RULE: usize = 49;
const PATH_WIDTH: usize = 20;

/// Painted `NN.N%` for totals, or plain `n/a` when nothing is instrumented
#[must_use]
pub fn format_percent(
    totals: StatementTotals,
    precision: usize,
    gradient: &Gradient,
    mode: OutputMode,
) -> String {
    match totals.percent_of("report cell") {
        Ok(percent) => gradient.color_for(&format!("{percent:.precision$}%"), percent, mode),
        Err(_) => "n/a".to_string(),
    }
}

/// `path` relative to `cwd` when it lies below it
#[must_use]
pub fn display_path(path: &Path, cwd: &Path) -> String {
    path.strip_prefix(cwd)
        .unwrap_or(path)
        .display()
        .to_string()
}

fn bold(text: &str, mode: OutputMode) -> String {
    match mode {
        OutputMode::RichAnsi => format!("{}{text}{}", ansi::BOLD, ansi::RESET),
        OutputMode::Plain => text.to_string(),
    }
}

/// Coverage of one file and the functions declared in it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Path shown in the header
    pub path: String,
    /// Every block of the file, including code outside functions
    pub totals: StatementTotals,
    /// Functions in declaration order
    pub functions: Vec<FunctionCoverage>,
}

impl FileReport {
    /// Create a report
    #[must_use]
    pub fn new(
        path: impl Into<String>,
        totals: StatementTotals,
        functions: Vec<FunctionCoverage>,
    ) -> Self {
        Self {
            path: path.into(),
            totals,
            functions,
        }
    }

    /// Sum over functions that have statements
    #[must_use]
    pub fn function_totals(&self) -> StatementTotals {
        self.functions
            .iter()
            .filter(|f| !f.totals.is_empty())
            .map(|f| f.totals)
            .sum()
    }

    /// Header, one aligned row per function, and a blank separator line
    #[must_use]
    pub fn render(&self, gradient: &Gradient, mode: OutputMode) -> String {
        let mut out = String::new();
        let header = format!("# {:<PATH_WIDTH$} ", self.path);
        let _ = writeln!(
            out,
            "{}{}",
            bold(&header, mode),
            format_percent(self.totals, 1, gradient, mode)
        );
        let _ = writeln!(out, "{}", "-".repeat(FILE_RULE));

        let base = Path::new(&self.path)
            .file_name()
            .map_or_else(|| self.path.clone(), |n| n.to_string_lossy().into_owned());
        let locations: Vec<String> = self
            .functions
            .iter()
            .map(|f| format!("{base}:{}:", f.line))
            .collect();
        let loc_width = locations.iter().map(|l| l.chars().count()).max().unwrap_or(0);
        let name_width = self
            .functions
            .iter()
            .map(|f| f.name.chars().count())
            .max()
            .unwrap_or(0);

        for (function, location) in self.functions.iter().zip(&locations) {
            let _ = writeln!(
                out,
                "{location:<loc_width$} {:<name_width$} {}",
                function.name,
                format_percent(function.totals, 1, gradient, mode)
            );
        }
        out.push('\n');
        out
    }
}

/// Whole-run statement totals, counted over every block of every profile
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Totals across all profiles
    pub totals: StatementTotals,
}

impl RunSummary {
    /// Aggregate raw profiles
    #[must_use]
    pub fn from_profiles<'a>(profiles: impl IntoIterator<Item = &'a CoverProfile>) -> Self {
        Self {
            totals: profiles.into_iter().map(CoverProfile::totals).sum(),
        }
    }

    /// Rule followed by `Total covered: NN.NN%`
    #[must_use]
    pub fn render(&self, gradient: &Gradient, mode: OutputMode) -> String {
        format!(
            "{}\nTotal covered: {}\n",
            "-".repeat(SUMMARY_RULE),
            format_percent(self.totals, 2, gradient, mode)
        )
    }
}
