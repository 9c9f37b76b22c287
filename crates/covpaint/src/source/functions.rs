//! Function declaration extents for Go sources.
//!
//! Uses tree-sitter to find every top-level `func` declaration (plain
//! functions and methods) and reports its extent in the same 1-based
//! line/column coordinates the coverage profile uses.

use super::position::{LineMap, Position};
use crate::result::{CoverError, CoverResult};
use std::ops::Range;
use tree_sitter::{Node, Parser};

/// The source extent of one function declaration.
///
/// `end` is exclusive: it addresses the byte just past the closing brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionExtent {
    /// Function or method name (receiver not included)
    pub name: String,
    /// Position of the `func` keyword
    pub start: Position,
    /// Position just past the declaration
    pub end: Position,
}

impl FunctionExtent {
    /// Create a new extent
    #[must_use]
    pub fn new(name: impl Into<String>, start: Position, end: Position) -> Self {
        Self {
            name: name.into(),
            start,
            end,
        }
    }

    /// Line the declaration starts on
    #[must_use]
    pub const fn start_line(&self) -> usize {
        self.start.line
    }

    /// Resolve the extent to a half-open byte range of the mapped source.
    ///
    /// Both ends must land inside the source; an extent that does not is a
    /// stale parse of a different buffer and cannot be recovered from.
    pub fn byte_range(&self, map: &LineMap, file: &str) -> CoverResult<Range<usize>> {
        let locate = |pos: Position, what: &str| {
            map.offset(pos).ok_or_else(|| {
                CoverError::inconsistent(
                    file,
                    format!(
                        "{what} of function {} expected at {pos}, source ends at {}",
                        self.name,
                        map.end()
                    ),
                )
            })
        };
        let start = locate(self.start, "start")?;
        let stop = locate(self.end, "end")?;
        if stop < start {
            return Err(CoverError::inconsistent(
                file,
                format!(
                    "function {} ends at {} before it starts at {}",
                    self.name, self.end, self.start
                ),
            ));
        }
        Ok(start..stop)
    }
}

/// Extracts function extents from Go source
pub struct GoFunctions {
    parser: Parser,
}

impl std::fmt::Debug for GoFunctions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoFunctions").finish_non_exhaustive()
    }
}

impl GoFunctions {
    /// Create an extractor with the Go grammar loaded
    pub fn new() -> CoverResult<Self> {
        let mut parser = Parser::new();
        parser
            .set_language(&tree_sitter_go::LANGUAGE.into())
            .map_err(|e| CoverError::source_parse("<go grammar>", e.to_string()))?;
        Ok(Self { parser })
    }

    /// Function declarations in source order
    pub fn extract(&mut self, src: &[u8], file: &str) -> CoverResult<Vec<FunctionExtent>> {
        let tree = self
            .parser
            .parse(src, None)
            .ok_or_else(|| CoverError::source_parse(file, "parser returned no tree"))?;

        let root = tree.root_node();
        let mut cursor = root.walk();
        let mut funcs = Vec::new();
        for child in root.children(&mut cursor) {
            if !matches!(child.kind(), "function_declaration" | "method_declaration") {
                continue;
            }
            let Some(name) = declared_name(child, src) else {
                continue;
            };
            funcs.push(FunctionExtent::new(
                name,
                point_position(child.start_position()),
                point_position(child.end_position()),
            ));
        }

        tracing::debug!(file, functions = funcs.len(), "extracted function extents");
        Ok(funcs)
    }
}

/// Extract function extents with a one-off parser
pub fn extract_functions(src: &[u8], file: &str) -> CoverResult<Vec<FunctionExtent>> {
    GoFunctions::new()?.extract(src, file)
}

fn declared_name(node: Node<'_>, src: &[u8]) -> Option<String> {
    let name = node.child_by_field_name("name")?;
    name.utf8_text(src).ok().map(str::to_string)
}

const fn point_position(point: tree_sitter::Point) -> Position {
    Position::new(point.row + 1, point.column + 1)
}
