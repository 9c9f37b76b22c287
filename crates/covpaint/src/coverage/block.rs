//! Byte-offset coverage blocks and the boundary events derived from them.

use super::totals::StatementTotals;
use crate::result::CoverResult;

/// One instrumented block, addressed by byte offsets into its source file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block {
    /// First byte of the block
    pub start: usize,
    /// One past the last byte of the block
    pub end: usize,
    /// Number of statements the block contains
    pub statements: u32,
    /// Times the block executed
    pub hits: u32,
}

impl Block {
    /// Create a new block
    #[must_use]
    pub const fn new(start: usize, end: usize, statements: u32, hits: u32) -> Self {
        Self {
            start,
            end,
            statements,
            hits,
        }
    }

    /// Whether the block executed at least once
    #[must_use]
    pub const fn is_covered(&self) -> bool {
        self.hits > 0
    }
}

/// Start or stop edge of a block at a byte offset
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Boundary {
    /// Byte offset in the source
    pub offset: usize,
    /// Start edge (`true`) or stop edge (`false`)
    pub is_start: bool,
    /// Hit count of the block (0 on stop edges)
    pub hits: u32,
    /// Hit count normalised to 0.0..=1.0 across the profile (start edges only)
    pub weight: f64,
}

impl Boundary {
    /// Create a start edge
    #[must_use]
    pub const fn start(offset: usize, hits: u32, weight: f64) -> Self {
        Self {
            offset,
            is_start: true,
            hits,
            weight,
        }
    }

    /// Create a stop edge
    #[must_use]
    pub const fn stop(offset: usize) -> Self {
        Self {
            offset,
            is_start: false,
            hits: 0,
            weight: 0.0,
        }
    }
}

/// Coverage blocks of one source file. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    file_reference: String,
    blocks: Vec<Block>,
}

impl Profile {
    /// Create a profile; blocks are expected in source order
    #[must_use]
    pub fn new(file_reference: impl Into<String>, blocks: Vec<Block>) -> Self {
        Self {
            file_reference: file_reference.into(),
            blocks,
        }
    }

    /// File reference as written by the coverage producer
    #[must_use]
    pub fn file_reference(&self) -> &str {
        &self.file_reference
    }

    /// Blocks in source order
    #[must_use]
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Covered and total statements over every block of the file
    #[must_use]
    pub fn totals(&self) -> StatementTotals {
        let mut totals = StatementTotals::default();
        for block in &self.blocks {
            totals.record(block.statements, block.hits);
        }
        totals
    }

    /// Percentage of statements covered in this file
    pub fn percent(&self) -> CoverResult<f64> {
        self.totals()
            .percent_of(format!("file {}", self.file_reference))
    }

    /// Start/stop events for every block, ordered by offset.
    ///
    /// Events at the same offset keep emission order: the stop of one block
    /// precedes the start of the next, and an empty block's start precedes
    /// its own stop.
    ///
    /// Start weights are `ln(hits) / ln(max_hits)`. A profile whose maximum
    /// is 1 carries no gradient information (set mode) and weighs every
    /// executed block at 0.8.
    #[must_use]
    pub fn boundaries(&self) -> Vec<Boundary> {
        let max = self.blocks.iter().map(|b| b.hits).max().unwrap_or(0);
        let divisor = f64::from(max).ln();
        let weight = |hits: u32| {
            if hits == 0 {
                0.0
            } else if max <= 1 {
                0.8
            } else {
                f64::from(hits).ln() / divisor
            }
        };

        let mut boundaries = Vec::with_capacity(self.blocks.len() * 2);
        for block in &self.blocks {
            boundaries.push(Boundary::start(block.start, block.hits, weight(block.hits)));
            boundaries.push(Boundary::stop(block.end));
        }
        // stable: equal offsets stay in emission order
        boundaries.sort_by_key(|b| b.offset);
        tracing::trace!(
            file = %self.file_reference,
            boundaries = boundaries.len(),
            max_hits = max,
            "derived boundaries"
        );
        boundaries
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_block_is_covered() {
        assert!(Block::new(0, 4, 1, 3).is_covered());
        assert!(!Block::new(0, 4, 1, 0).is_covered());
    }

    #[test]
    fn test_boundaries_pair_up_in_order() {
        let profile = Profile::new("f.go", vec![Block::new(0, 5, 1, 4), Block::new(8, 12, 1, 0)]);
        let offsets: Vec<_> = profile
            .boundaries()
            .iter()
            .map(|b| (b.offset, b.is_start))
            .collect();
        assert_eq!(offsets, [(0, true), (5, false), (8, true), (12, false)]);
    }

    #[test]
    fn test_adjacent_blocks_stop_before_start() {
        let profile = Profile::new("f.go", vec![Block::new(0, 5, 1, 1), Block::new(5, 9, 1, 1)]);
        let b = profile.boundaries();
        assert_eq!(b[1].offset, 5);
        assert!(!b[1].is_start);
        assert_eq!(b[2].offset, 5);
        assert!(b[2].is_start);
    }

    #[test]
    fn test_empty_block_start_before_stop() {
        let profile = Profile::new("f.go", vec![Block::new(3, 3, 0, 1)]);
        let b = profile.boundaries();
        assert!(b[0].is_start);
        assert!(!b[1].is_start);
    }

    #[test]
    fn test_weights_are_log_normalised() {
        let profile = Profile::new(
            "f.go",
            vec![
                Block::new(0, 1, 1, 100),
                Block::new(1, 2, 1, 10),
                Block::new(2, 3, 1, 1),
                Block::new(3, 4, 1, 0),
            ],
        );
        let starts: Vec<_> = profile
            .boundaries()
            .into_iter()
            .filter(|b| b.is_start)
            .map(|b| b.weight)
            .collect();
        assert!((starts[0] - 1.0).abs() < 1e-9);
        assert!((starts[1] - 0.5).abs() < 1e-9);
        assert_eq!(starts[2], 0.0);
        assert_eq!(starts[3], 0.0);
    }

    #[test]
    fn test_set_mode_weight() {
        let profile = Profile::new("f.go", vec![Block::new(0, 1, 1, 1), Block::new(1, 2, 1, 0)]);
        let b = profile.boundaries();
        assert_eq!(b[0].weight, 0.8);
        assert_eq!(b[2].weight, 0.0);
    }

    #[test]
    fn test_totals_and_percent() {
        let profile = Profile::new("f.go", vec![Block::new(0, 5, 7, 2), Block::new(6, 9, 1, 0)]);
        assert_eq!(profile.totals(), StatementTotals::new(7, 8));
        assert_eq!(profile.percent().unwrap(), 87.5);
    }

    #[test]
    fn test_empty_profile() {
        let profile = Profile::new("f.go", Vec::new());
        assert!(profile.boundaries().is_empty());
        assert!(profile.percent().is_err());
    }
}
