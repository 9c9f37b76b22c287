//! Mode handlers - extracted from main.rs for testability
//!
//! Each handler module contains:
//! - A pure `render_*` function returning the text to print
//! - An `execute_*` function writing it through the [`Reporter`]
//! - Tests against a fixture Go module in a temporary directory
//!
//! [`Reporter`]: crate::Reporter

pub mod file;
pub mod func;
pub mod legend;
pub mod report;

use covpaint::{Gradient, OutputMode, SourceResolver};
use std::path::PathBuf;

pub use file::{execute_file, render_files};
pub use func::{execute_function, render_function};
pub use legend::{execute_legend, render_legend};
pub use report::{execute_report, render_file_section, render_summary};

/// Everything a handler needs besides the profiles
pub struct RenderContext<'a> {
    /// Maps profile file references to paths on disk
    pub resolver: &'a dyn SourceResolver,
    /// Prefix stripped from displayed paths
    pub cwd: PathBuf,
    /// Coverage colors
    pub gradient: Gradient,
    /// Escapes or plain text
    pub mode: OutputMode,
}

impl std::fmt::Debug for RenderContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderContext")
            .field("cwd", &self.cwd)
            .field("gradient", &self.gradient)
            .field("mode", &self.mode)
            .finish_non_exhaustive()
    }
}
