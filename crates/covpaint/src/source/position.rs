//! Line/column to byte offset conversion.
//!
//! Profiles and function extents address source by 1-based line and byte
//! column; the engine works on byte offsets. A [`LineMap`] is built with one
//! forward scan counting `\n` and answers both directions.

use std::fmt;

/// A 1-based line and 1-based byte column
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position {
    /// Line number (1-based)
    pub line: usize,
    /// Byte column (1-based)
    pub col: usize,
}

impl Position {
    /// Create a new position
    #[must_use]
    pub const fn new(line: usize, col: usize) -> Self {
        Self { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

/// Pre-computed line start offsets for one source buffer
#[derive(Debug, Clone)]
pub struct LineMap {
    /// `line_starts[n]` is the byte offset of line n+1
    line_starts: Vec<usize>,
    len: usize,
}

impl LineMap {
    /// Scan `src` once and record where every line starts
    #[must_use]
    pub fn new(src: &[u8]) -> Self {
        let mut line_starts = vec![0];
        line_starts.extend(
            src.iter()
                .enumerate()
                .filter(|(_, &b)| b == b'\n')
                .map(|(i, _)| i + 1),
        );
        Self {
            line_starts,
            len: src.len(),
        }
    }

    /// Number of lines (a trailing newline opens an empty last line)
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Length of the mapped source in bytes
    #[must_use]
    pub const fn source_len(&self) -> usize {
        self.len
    }

    /// Byte offset of `pos`, if it lies inside the source.
    ///
    /// The newline terminating a line is addressable (one past its last
    /// character), as is the end of the file.
    #[must_use]
    pub fn offset(&self, pos: Position) -> Option<usize> {
        if pos.line == 0 || pos.col == 0 {
            return None;
        }
        let start = *self.line_starts.get(pos.line - 1)?;
        let last = self
            .line_starts
            .get(pos.line)
            .map_or(self.len, |next| next - 1);
        let offset = start.checked_add(pos.col - 1)?;
        (offset <= last).then_some(offset)
    }

    /// Position of a byte offset; offsets past the end clamp to the end
    #[must_use]
    pub fn position(&self, offset: usize) -> Position {
        let offset = offset.min(self.len);
        let line_idx = match self.line_starts.binary_search(&offset) {
            Ok(i) => i,
            Err(i) => i - 1,
        };
        Position::new(line_idx + 1, offset - self.line_starts[line_idx] + 1)
    }

    /// Position one past the last byte, used in diagnostics
    #[must_use]
    pub fn end(&self) -> Position {
        self.position(self.len)
    }
}
