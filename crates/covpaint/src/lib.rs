//! Covpaint: statement coverage painted onto Go source
//!
//! Reads a Go cover profile, lines its blocks up with the source they came
//! from, and renders either the annotated source or a per-function report.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                     COVPAINT Architecture                        │
//! ├──────────────────────────────────────────────────────────────────┤
//! │  ┌────────────┐    ┌────────────┐    ┌────────────┐              │
//! │  │ coverage   │    │ Paint      │    │ Renderer   │              │
//! │  │ .out       │───►│ Points     │───►│ + Gradient │──► terminal  │
//! │  └────────────┘    └────────────┘    └────────────┘              │
//! │        │                                   ▲                     │
//! │        ▼                                   │                     │
//! │  ┌────────────┐    ┌────────────┐          │                     │
//! │  │ Source     │───►│ Function   │──────────┘                     │
//! │  │ (go.mod)   │    │ Matcher    │   report rows                  │
//! │  └────────────┘    └────────────┘                                │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```
//! use covpaint::{parse_profiles, Gradient, OutputMode, SourceFile};
//!
//! let src = b"package p\n\nfunc f() {\n\tprintln()\n}\n".to_vec();
//! let profiles = parse_profiles("mode: set\np/p.go:3.10,5.2 1 1\n").unwrap();
//! let file = SourceFile::from_source("p.go", src, &profiles[0]).unwrap();
//!
//! let text = file.render(&Gradient::default(), OutputMode::Plain).unwrap();
//! assert!(text.starts_with("package p"));
//! ```

#![warn(missing_docs)]
#![cfg_attr(test, allow(clippy::unwrap_used, clippy::expect_used))]

mod annotator;
mod result;

/// Profiles, blocks, boundaries and per-function matching
pub mod coverage;

/// Gradient, paint points and annotated rendering
pub mod paint;

/// Tabular report sections
pub mod report;

/// Source positions, function extents and file resolution
pub mod source;

pub use annotator::{files_matching, locate_function, SourceFile};
pub use coverage::{
    load_profiles, parse_profiles, Block, Boundary, CoverMode, CoverProfile, FunctionCoverage,
    FunctionMatcher, Profile, StatementTotals,
};
pub use paint::{
    ansi, build_paint_points, render_annotated, BoundaryError, Gradient, OutputMode, PaintPoint,
    Rgb, Tint,
};
pub use report::{display_path, format_percent, FileReport, RunSummary};
pub use result::{CoverError, CoverResult};
pub use source::{extract_functions, FunctionExtent, ModuleResolver, SourceResolver};
