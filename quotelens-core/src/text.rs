//! Positions and spans within document text

use serde::{Deserialize, Serialize};

/// Zero-based cursor position. `character` counts Unicode scalar values
/// from the start of the line, matching the offsets in [`Span`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub line: usize,
    pub character: usize,
}

impl Position {
    pub fn new(line: usize, character: usize) -> Self {
        Self { line, character }
    }
}

/// Char-offset range within a single line, `end` exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub line: usize,
    pub start: usize,
    pub end: usize,
}

/// Look up a line of `text` by zero-based index.
///
/// Lines are delimited by `\n` only; a missing line yields `None` rather
/// than a panic, since the cursor's line is caller-supplied.
pub fn line_at(text: &str, line: usize) -> Option<&str> {
    text.split('\n').nth(line)
}
