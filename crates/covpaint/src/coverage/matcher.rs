//! Matching function extents against coverage blocks.

use super::block::Profile;
use super::totals::StatementTotals;
use crate::result::CoverResult;
use crate::source::{FunctionExtent, LineMap};
use std::ops::Range;

/// Coverage of one function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCoverage {
    /// Function name
    pub name: String,
    /// Line the declaration starts on
    pub line: usize,
    /// Byte range of the declaration
    pub range: Range<usize>,
    /// Statements inside the declaration
    pub totals: StatementTotals,
}

impl FunctionCoverage {
    /// Percentage covered; undefined for a function without statements
    pub fn percent(&self) -> CoverResult<f64> {
        self.totals.percent_of(format!("function {}", self.name))
    }
}

/// Sum the blocks that start inside `range`.
///
/// Blocks are attributed whole: a block belongs to the range when its start
/// offset does, whatever its end.
#[must_use]
pub fn coverage_in_range(profile: &Profile, range: &Range<usize>) -> StatementTotals {
    let mut totals = StatementTotals::default();
    for block in profile.blocks().iter().filter(|b| range.contains(&b.start)) {
        totals.record(block.statements, block.hits);
    }
    totals
}

/// Computes per-function coverage for one resolved profile and its source
#[derive(Debug)]
pub struct FunctionMatcher<'a> {
    profile: &'a Profile,
    map: LineMap,
}

impl<'a> FunctionMatcher<'a> {
    /// Create a matcher over `profile`, whose offsets index into `src`
    #[must_use]
    pub fn new(profile: &'a Profile, src: &[u8]) -> Self {
        Self {
            profile,
            map: LineMap::new(src),
        }
    }

    /// Resolve the extent and total the blocks inside it
    pub fn coverage(&self, extent: &FunctionExtent) -> CoverResult<FunctionCoverage> {
        let range = extent.byte_range(&self.map, self.profile.file_reference())?;
        let totals = coverage_in_range(self.profile, &range);
        Ok(FunctionCoverage {
            name: extent.name.clone(),
            line: extent.start_line(),
            range,
            totals,
        })
    }

    /// Coverage of every extent, in the order given
    pub fn coverage_all(&self, extents: &[FunctionExtent]) -> CoverResult<Vec<FunctionCoverage>> {
        extents.iter().map(|e| self.coverage(e)).collect()
    }
}
