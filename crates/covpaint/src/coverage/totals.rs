//! Covered/total statement accumulation.

use crate::result::{CoverError, CoverResult};
use std::ops::{Add, AddAssign};

/// Running covered and total statement counts
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatementTotals {
    /// Statements in blocks executed at least once
    pub covered: u64,
    /// All instrumented statements
    pub total: u64,
}

impl StatementTotals {
    /// Create totals from raw counts
    #[must_use]
    pub const fn new(covered: u64, total: u64) -> Self {
        Self { covered, total }
    }

    /// Account for one block
    pub fn record(&mut self, statements: u32, hits: u32) {
        self.total += u64::from(statements);
        if hits > 0 {
            self.covered += u64::from(statements);
        }
    }

    /// Whether no statements have been recorded
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// `100 * covered / total`, undefined when there are no statements
    pub fn percent_of(&self, subject: impl Into<String>) -> CoverResult<f64> {
        if self.total == 0 {
            return Err(CoverError::division_undefined(subject));
        }
        Ok(100.0 * self.covered as f64 / self.total as f64)
    }
}

impl Add for StatementTotals {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.covered + rhs.covered, self.total + rhs.total)
    }
}

impl AddAssign for StatementTotals {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl std::iter::Sum for StatementTotals {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::default(), Add::add)
    }
}
