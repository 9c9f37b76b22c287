//! Go cover profile parsing.
//!
//! The text format written by `go test -coverprofile`:
//!
//! ```text
//! mode: count
//! example.com/m/foo.go:3.21,5.3 2 7
//! ```
//!
//! Each block line is `file:startLine.startCol,endLine.endCol numStmt count`.

use super::block::{Block, Profile};
use super::totals::StatementTotals;
use crate::result::{CoverError, CoverResult};
use crate::source::{LineMap, Position};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::str::FromStr;

/// How the instrumented binary counted executions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoverMode {
    /// Executed or not
    Set,
    /// Execution counts
    #[default]
    Count,
    /// Execution counts, updated atomically
    Atomic,
}

impl FromStr for CoverMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "set" => Ok(Self::Set),
            "count" => Ok(Self::Count),
            "atomic" => Ok(Self::Atomic),
            other => Err(format!("unknown cover mode {other:?}")),
        }
    }
}

impl fmt::Display for CoverMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Set => "set",
            Self::Count => "count",
            Self::Atomic => "atomic",
        })
    }
}

/// A block as written in the profile, addressed by line and column
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBlock {
    /// First character of the block
    pub start: Position,
    /// Just past the last character of the block
    pub end: Position,
    /// Number of statements
    pub statements: u32,
    /// Execution count
    pub hits: u32,
}

/// All blocks the profile lists for one file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoverProfile {
    /// File reference (an import path for module builds)
    pub file_reference: String,
    /// Counting mode of the run
    pub mode: CoverMode,
    /// Blocks sorted by start position
    pub blocks: Vec<ProfileBlock>,
}

impl CoverProfile {
    /// Covered and total statements, no source needed
    #[must_use]
    pub fn totals(&self) -> StatementTotals {
        let mut totals = StatementTotals::default();
        for block in &self.blocks {
            totals.record(block.statements, block.hits);
        }
        totals
    }

    /// Convert line/column blocks to byte offsets into `src`.
    ///
    /// Fails with [`CoverError::Inconsistent`] when a block does not lie
    /// inside the source, which means the profile is stale.
    pub fn resolve(&self, src: &[u8]) -> CoverResult<Profile> {
        let map = LineMap::new(src);
        let locate = |pos: Position| {
            map.offset(pos).ok_or_else(|| {
                CoverError::inconsistent(
                    &self.file_reference,
                    format!("block position {pos} is outside the source (ends at {})", map.end()),
                )
            })
        };

        let blocks = self
            .blocks
            .iter()
            .map(|b| {
                let start = locate(b.start)?;
                let end = locate(b.end)?;
                if end < start {
                    return Err(CoverError::inconsistent(
                        &self.file_reference,
                        format!("block ends at {} before it starts at {}", b.end, b.start),
                    ));
                }
                Ok(Block::new(start, end, b.statements, b.hits))
            })
            .collect::<CoverResult<Vec<_>>>()?;

        Ok(Profile::new(self.file_reference.clone(), blocks))
    }
}

/// Read and parse a profile file
pub fn load_profiles(path: &Path) -> CoverResult<Vec<CoverProfile>> {
    let text = std::fs::read_to_string(path)?;
    let profiles = parse_profiles(&text)?;
    tracing::debug!(path = %path.display(), files = profiles.len(), "parsed cover profile");
    Ok(profiles)
}

/// Parse profile text into per-file profiles, sorted by file reference.
///
/// Repeated blocks for the same extent are merged: counts add up, except in
/// set mode where any hit marks the block.
pub fn parse_profiles(text: &str) -> CoverResult<Vec<CoverProfile>> {
    let mut mode = None;
    let mut files: BTreeMap<String, Vec<ProfileBlock>> = BTreeMap::new();

    for (idx, line) in text.lines().enumerate() {
        let lineno = idx + 1;
        let line = line.trim_end();
        if line.is_empty() {
            continue;
        }
        if let Some(rest) = line.strip_prefix("mode:") {
            let parsed = rest
                .trim()
                .parse::<CoverMode>()
                .map_err(|e| CoverError::profile_parse(lineno, e))?;
            if mode.is_some_and(|m| m != parsed) {
                return Err(CoverError::profile_parse(
                    lineno,
                    format!("mode {parsed} conflicts with earlier mode line"),
                ));
            }
            mode = Some(parsed);
            continue;
        }
        if mode.is_none() {
            return Err(CoverError::profile_parse(
                lineno,
                format!("bad mode line: {line}"),
            ));
        }
        let (file, block) = parse_block_line(line).map_err(|e| CoverError::profile_parse(lineno, e))?;
        files.entry(file.to_string()).or_default().push(block);
    }

    let mode = mode.unwrap_or_default();
    files
        .into_iter()
        .map(|(file_reference, blocks)| {
            let blocks = merge_blocks(blocks, mode).map_err(|e| {
                CoverError::profile_parse(0, format!("{file_reference}: {e}"))
            })?;
            Ok(CoverProfile {
                file_reference,
                mode,
                blocks,
            })
        })
        .collect()
}

fn parse_block_line(line: &str) -> Result<(&str, ProfileBlock), String> {
    let (file, rest) = line
        .rsplit_once(':')
        .ok_or_else(|| format!("line {line:?} does not match file:extent form"))?;
    if file.is_empty() {
        return Err(format!("line {line:?} has no file name"));
    }
    let mut fields = rest.split(' ');
    let (extent, statements, hits) = match (fields.next(), fields.next(), fields.next(), fields.next()) {
        (Some(e), Some(s), Some(h), None) => (e, s, h),
        _ => return Err(format!("line {line:?} does not have extent, statements and count")),
    };
    let (start, end) = extent
        .split_once(',')
        .ok_or_else(|| format!("extent {extent:?} is missing ','"))?;

    Ok((
        file,
        ProfileBlock {
            start: parse_position(start)?,
            end: parse_position(end)?,
            statements: parse_number(statements, "statement count")?,
            hits: parse_number(hits, "hit count")?,
        },
    ))
}

fn parse_position(text: &str) -> Result<Position, String> {
    let (line, col) = text
        .split_once('.')
        .ok_or_else(|| format!("position {text:?} is not line.col"))?;
    Ok(Position::new(
        parse_number(line, "line")?,
        parse_number(col, "column")?,
    ))
}

fn parse_number<T: FromStr>(text: &str, what: &str) -> Result<T, String> {
    text.parse()
        .map_err(|_| format!("invalid {what} {text:?}"))
}

fn merge_blocks(mut blocks: Vec<ProfileBlock>, mode: CoverMode) -> Result<Vec<ProfileBlock>, String> {
    blocks.sort_by_key(|b| (b.start, b.end));
    let mut merged: Vec<ProfileBlock> = Vec::with_capacity(blocks.len());
    for block in blocks {
        match merged.last_mut() {
            Some(last) if last.start == block.start && last.end == block.end => {
                if last.statements != block.statements {
                    return Err(format!(
                        "inconsistent statement count for block {}-{}: {} vs {}",
                        block.start, block.end, last.statements, block.statements
                    ));
                }
                last.hits = match mode {
                    CoverMode::Set => last.hits.max(block.hits),
                    CoverMode::Count | CoverMode::Atomic => last.hits.saturating_add(block.hits),
                };
            }
            _ => merged.push(block),
        }
    }
    Ok(merged)
}
