//! Coverage data: profiles, blocks, boundaries and per-function matching.
//!
//! ```text
//! coverage.out ──parse──► CoverProfile (line.col) ──resolve(src)──► Profile (bytes)
//!                                                                   │
//!                                        boundaries() ◄─────────────┤
//!                                        FunctionMatcher ◄──────────┘
//! ```

mod block;
mod matcher;
mod profile;
mod totals;

pub use block::{Block, Boundary, Profile};
pub use matcher::{coverage_in_range, FunctionCoverage, FunctionMatcher};
pub use profile::{load_profiles, parse_profiles, CoverMode, CoverProfile, ProfileBlock};
pub use totals::StatementTotals;
