//! Annotated source rendering.

use super::gradient::{Gradient, OutputMode, Tint};
use super::points::PaintPoint;
use std::ops::Range;

/// A run of consecutive bytes painted the same way
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    /// Byte range of the run
    pub range: Range<usize>,
    /// Bucket of the paint point covering the run, `None` for neutral text
    pub bucket: Option<u8>,
}

impl Run {
    /// How this run is painted under `gradient`
    #[must_use]
    pub fn tint(&self, gradient: &Gradient) -> Tint {
        self.bucket
            .map_or(Tint::Neutral, |bucket| gradient.tint(f64::from(bucket)))
    }
}

/// Split `range` into runs that follow paint-point boundaries.
///
/// The point index only moves forward, so a range starting mid-file skips
/// every point that ends before it. A new run starts whenever the covering
/// point changes, even if two neighbours share a bucket.
#[must_use]
pub fn annotate(points: &[PaintPoint], range: Range<usize>) -> Vec<Run> {
    let mut runs: Vec<Run> = Vec::new();
    let mut last_point = None;
    let mut pi = 0;

    for offset in range {
        while points.get(pi).is_some_and(|p| p.stop < offset) {
            pi += 1;
        }
        let covering = points
            .get(pi)
            .filter(|p| p.contains(offset))
            .map(|p| (pi, p.bucket));
        let point = covering.map(|(index, _)| index);

        match runs.last_mut() {
            Some(run) if last_point == point && run.range.end == offset => {
                run.range.end = offset + 1;
            }
            _ => {
                runs.push(Run {
                    range: offset..offset + 1,
                    bucket: covering.map(|(_, bucket)| bucket),
                });
                last_point = point;
            }
        }
    }
    runs
}

/// Render `range` of `src` with each run painted by its coverage bucket.
///
/// The range is clamped to the source. Bytes that are not valid UTF-8 are
/// replaced rather than failing the render.
#[must_use]
pub fn render_annotated(
    src: &[u8],
    points: &[PaintPoint],
    range: Range<usize>,
    gradient: &Gradient,
    mode: OutputMode,
) -> String {
    let end = range.end.min(src.len());
    let start = range.start.min(end);
    let mut out = String::with_capacity(end - start);
    for run in annotate(points, start..end) {
        let text = src
            .get(run.range.clone())
            .map(String::from_utf8_lossy)
            .unwrap_or_default();
        out.push_str(&run.tint(gradient).paint(&text, mode));
    }
    out
}
