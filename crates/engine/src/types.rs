use crate::config::ComposeConfig;
use crate::render;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A source line selected for one spine position
///
/// Columns are char indices into the line, not byte offsets.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MatchedLine {
    /// 0-based index among the alphabetic spine characters
    pub spine_position: usize,

    /// 0-based index of the physical line in the source text
    pub source_index: usize,

    /// Char index within the line where the spine letter was found
    pub column: usize,
}

/// One rendered output line: a run of consecutive matches on the same
/// physical source line, collapsed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MesosticLine {
    /// 0-based index of the physical line in the source text
    pub source_index: usize,

    /// The line text with its original casing
    pub text: String,

    /// Marked columns, ascending
    pub columns: Vec<usize>,
}

impl MesosticLine {
    pub(crate) fn open(source_index: usize, text: String, column: usize) -> Self {
        Self {
            source_index,
            text,
            columns: vec![column],
        }
    }

    /// Column of the first mark on this line
    #[must_use]
    pub fn first_column(&self) -> usize {
        self.columns.first().copied().unwrap_or(0)
    }
}

/// A completed composition
///
/// `matches` holds exactly one entry per alphabetic spine character, in
/// spine order; `lines` holds the grouped render units in the same order.
/// A composition is never partial: a failed scan returns an error instead.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Mesostic {
    /// The spine string as submitted
    pub spine: String,

    /// One match per alphabetic spine character
    pub matches: Vec<MatchedLine>,

    /// Rendered output lines, in source order
    pub lines: Vec<MesosticLine>,
}

impl Mesostic {
    /// Render to text with the given configuration
    #[must_use]
    pub fn render(&self, config: &ComposeConfig) -> String {
        render::render(self, config)
    }
}

impl fmt::Display for Mesostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render(&ComposeConfig::default()))
    }
}
