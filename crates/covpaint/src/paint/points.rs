//! Boundary events to non-overlapping paint points.

use crate::coverage::{Boundary, Profile};
use crate::result::{CoverError, CoverResult};
use thiserror::Error;

/// A byte range of source tagged with a coverage bucket.
///
/// `stop` is the offset of the block's stop edge. Rendering paints
/// `start..=stop`, so the byte at `stop` takes this point's color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaintPoint {
    /// First byte painted
    pub start: usize,
    /// Offset of the stop edge
    pub stop: usize,
    /// Coverage bucket (0 = never executed, 1..=100 executed)
    pub bucket: u8,
    /// Raw hit count of the block
    pub hits: u32,
}

impl PaintPoint {
    /// Create a new paint point
    #[must_use]
    pub const fn new(start: usize, stop: usize, bucket: u8, hits: u32) -> Self {
        Self {
            start,
            stop,
            bucket,
            hits,
        }
    }

    /// Whether `offset` is painted by this point
    #[must_use]
    pub const fn contains(&self, offset: usize) -> bool {
        self.start <= offset && offset <= self.stop
    }
}

/// Quantize a start edge to a bucket.
///
/// Executed code always lands in 1..=100, never-executed code in 0.
#[must_use]
pub fn coverage_bucket(hits: u32, weight: f64) -> u8 {
    if hits == 0 {
        return 0;
    }
    // f64::max drops NaN
    let bucket = (weight.max(0.0) * 99.0).floor() + 1.0;
    bucket.min(100.0) as u8
}

/// Malformed boundary input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoundaryError {
    /// Stop edge with no open start
    #[error("stop boundary at offset {offset} has no matching start")]
    UnmatchedStop {
        /// Offset of the stop edge
        offset: usize,
    },

    /// Start edge while another block is still open
    #[error("start boundary at offset {offset} opened inside block started at {open}")]
    NestedStart {
        /// Offset of the second start edge
        offset: usize,
        /// Offset of the block still open
        open: usize,
    },

    /// Boundary past the end of the source
    #[error("boundary at offset {offset} is past end of source ({len} bytes)")]
    BeyondSource {
        /// Offending offset
        offset: usize,
        /// Source length
        len: usize,
    },

    /// Boundaries not sorted by offset
    #[error("boundary at offset {offset} is out of order")]
    Unordered {
        /// First offset found below its predecessor
        offset: usize,
    },
}

/// Pair start and stop edges into paint points with one scan over the source.
///
/// Boundaries must be sorted by offset and must not nest. Zero-length blocks
/// produce no point. A trailing start with no stop is dropped.
pub fn build_paint_points(
    src: &[u8],
    boundaries: &[Boundary],
) -> Result<Vec<PaintPoint>, BoundaryError> {
    let len = src.len();
    if let Some(pair) = boundaries.windows(2).find(|w| w[1].offset < w[0].offset) {
        return Err(BoundaryError::Unordered {
            offset: pair[1].offset,
        });
    }
    if let Some(last) = boundaries.last().filter(|b| b.offset > len) {
        return Err(BoundaryError::BeyondSource {
            offset: last.offset,
            len,
        });
    }

    let mut events = boundaries.iter().peekable();
    let mut open: Option<&Boundary> = None;
    let mut points = Vec::with_capacity(boundaries.len() / 2);

    for offset in 0..=len {
        while let Some(event) = events.next_if(|b| b.offset == offset) {
            if event.is_start {
                if let Some(prev) = open {
                    return Err(BoundaryError::NestedStart {
                        offset,
                        open: prev.offset,
                    });
                }
                open = Some(event);
            } else {
                let start = open.take().ok_or(BoundaryError::UnmatchedStop { offset })?;
                if offset > start.offset {
                    points.push(PaintPoint::new(
                        start.offset,
                        offset,
                        coverage_bucket(start.hits, start.weight),
                        start.hits,
                    ));
                }
            }
        }
    }

    if let Some(start) = open {
        tracing::debug!(offset = start.offset, "discarding unmatched start boundary");
    }
    tracing::trace!(points = points.len(), "built paint points");
    Ok(points)
}

/// Paint points for a resolved profile over its source bytes
pub fn paint_profile(profile: &Profile, src: &[u8]) -> CoverResult<Vec<PaintPoint>> {
    build_paint_points(src, &profile.boundaries())
        .map_err(|e| CoverError::inconsistent(profile.file_reference(), e.to_string()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::coverage::Block;
    use proptest::prelude::*;

    #[test]
    fn test_bucket_zero_hits() {
        assert_eq!(coverage_bucket(0, 0.0), 0);
        assert_eq!(coverage_bucket(0, 1.0), 0);
    }

    #[test]
    fn test_bucket_range() {
        assert_eq!(coverage_bucket(1, 0.0), 1);
        assert_eq!(coverage_bucket(2, 0.5), 50);
        assert_eq!(coverage_bucket(9, 1.0), 100);
        assert_eq!(coverage_bucket(9, 3.0), 100);
        assert_eq!(coverage_bucket(9, f64::NAN), 1);
    }

    #[test]
    fn test_single_block_whole_source() {
        let src = b"abcdef";
        let boundaries = [Boundary::start(0, 2, 0.5), Boundary::stop(6)];
        let points = build_paint_points(src, &boundaries).unwrap();
        assert_eq!(points, [PaintPoint::new(0, 6, 50, 2)]);
    }

    #[test]
    fn test_no_boundaries() {
        assert!(build_paint_points(b"abc", &[]).unwrap().is_empty());
        assert!(build_paint_points(b"", &[]).unwrap().is_empty());
    }

    #[test]
    fn test_adjacent_blocks() {
        let boundaries = [
            Boundary::start(0, 1, 1.0),
            Boundary::stop(3),
            Boundary::start(3, 0, 0.0),
            Boundary::stop(6),
        ];
        let points = build_paint_points(b"abcdefg", &boundaries).unwrap();
        assert_eq!(
            points,
            [PaintPoint::new(0, 3, 100, 1), PaintPoint::new(3, 6, 0, 0)]
        );
    }

    #[test]
    fn test_zero_length_block_emits_nothing() {
        let boundaries = [Boundary::start(2, 1, 0.8), Boundary::stop(2)];
        assert!(build_paint_points(b"abcd", &boundaries).unwrap().is_empty());
    }

    #[test]
    fn test_trailing_start_is_discarded() {
        let boundaries = [
            Boundary::start(0, 1, 0.8),
            Boundary::stop(2),
            Boundary::start(3, 1, 0.8),
        ];
        let points = build_paint_points(b"abcdef", &boundaries).unwrap();
        assert_eq!(points.len(), 1);
    }

    #[test]
    fn test_unmatched_stop() {
        let err = build_paint_points(b"abc", &[Boundary::stop(1)]).unwrap_err();
        assert_eq!(err, BoundaryError::UnmatchedStop { offset: 1 });
    }

    #[test]
    fn test_nested_start() {
        let boundaries = [Boundary::start(0, 1, 0.8), Boundary::start(1, 1, 0.8)];
        let err = build_paint_points(b"abc", &boundaries).unwrap_err();
        assert_eq!(err, BoundaryError::NestedStart { offset: 1, open: 0 });
    }

    #[test]
    fn test_beyond_source() {
        let boundaries = [Boundary::start(0, 1, 0.8), Boundary::stop(9)];
        let err = build_paint_points(b"abc", &boundaries).unwrap_err();
        assert_eq!(err, BoundaryError::BeyondSource { offset: 9, len: 3 });
    }

    #[test]
    fn test_unordered() {
        let boundaries = [Boundary::start(2, 1, 0.8), Boundary::stop(1)];
        let err = build_paint_points(b"abc", &boundaries).unwrap_err();
        assert_eq!(err, BoundaryError::Unordered { offset: 1 });
    }

    #[test]
    fn test_paint_profile_reports_file() {
        let profile = Profile::new("example.com/m/a.go", vec![Block::new(0, 40, 1, 1)]);
        let err = paint_profile(&profile, b"short").unwrap_err();
        assert!(err.to_string().starts_with("example.com/m/a.go:"));
    }

    #[test]
    fn test_paint_profile_from_blocks() {
        let profile = Profile::new(
            "a.go",
            vec![Block::new(0, 4, 1, 100), Block::new(5, 9, 1, 10), Block::new(9, 12, 2, 0)],
        );
        let points = paint_profile(&profile, b"0123456789abcdef").unwrap();
        let buckets: Vec<_> = points.iter().map(|p| p.bucket).collect();
        // ln(10)/ln(100) = 0.5
        assert_eq!(buckets, [100, 50, 0]);
    }

    fn disjoint_blocks() -> impl Strategy<Value = (Vec<Block>, usize)> {
        prop::collection::vec((0usize..5, 1usize..10, 0u32..50), 0..20).prop_flat_map(|specs| {
            let mut blocks = Vec::with_capacity(specs.len());
            let mut cursor = 0;
            for (gap, len, hits) in specs {
                let start = cursor + gap;
                blocks.push(Block::new(start, start + len, 1, hits));
                cursor = start + len;
            }
            (Just(blocks), cursor..cursor + 10)
        })
    }

    proptest! {
        #[test]
        fn prop_one_point_per_block((blocks, len) in disjoint_blocks()) {
            let src = vec![b'x'; len];
            let n = blocks.len();
            let profile = Profile::new("p.go", blocks);
            let points = paint_profile(&profile, &src).unwrap();

            prop_assert_eq!(points.len(), n);
            for pair in points.windows(2) {
                prop_assert!(pair[0].start < pair[1].start);
                prop_assert!(pair[0].stop <= pair[1].start);
            }
            for p in &points {
                prop_assert!(p.start < p.stop);
                prop_assert!(p.stop <= len);
                prop_assert_eq!(p.bucket == 0, p.hits == 0);
            }
        }
    }
}
