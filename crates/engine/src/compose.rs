use crate::config::ComposeConfig;
use crate::error::{ComposeError, Result};
use crate::spine::{self, SpineToken};
use crate::types::{MatchedLine, Mesostic, MesosticLine};

/// Main composition interface
///
/// Holds the render configuration; the scan itself has no tunables. The
/// composer is stateless between calls and safe to share across threads.
pub struct Composer {
    config: ComposeConfig,
}

/// One source line prepared for scanning: original chars for output,
/// case-folded chars for matching.
struct SourceLine {
    chars: Vec<char>,
    folded: Vec<char>,
}

impl SourceLine {
    fn new(text: &str) -> Self {
        let chars: Vec<char> = text.chars().collect();
        let folded = chars.iter().map(|&ch| spine::fold(ch)).collect();
        Self { chars, folded }
    }

    fn is_blank(&self) -> bool {
        self.chars.iter().all(|ch| ch.is_whitespace())
    }
}

impl Composer {
    /// Create a composer with the given render configuration
    #[must_use]
    pub fn new(config: ComposeConfig) -> Self {
        Self { config }
    }

    /// Compose a mesostic from source text and a spine string.
    ///
    /// The scan is a single left-to-right pass: a (line, column) cursor
    /// advances monotonically and never backtracks, so output lines appear
    /// in source order and a column is never reused. For each spine letter
    /// the leftmost occurrence at or after the cursor wins.
    pub fn compose(&self, source: &str, spine: &str) -> Result<Mesostic> {
        let lines: Vec<SourceLine> = source.lines().map(SourceLine::new).collect();
        if lines.iter().all(SourceLine::is_blank) {
            return Err(ComposeError::EmptySource);
        }

        let tokens = spine::normalize(spine);
        if tokens.is_empty() {
            return Err(ComposeError::EmptySpine);
        }

        let mut matches = Vec::new();
        let mut out: Vec<MesosticLine> = Vec::new();
        let mut line_idx = 0usize;
        let mut column = 0usize;
        let mut position = 0usize;
        let mut pending_break = false;

        for token in tokens {
            let target = match token {
                SpineToken::Break => {
                    pending_break = true;
                    continue;
                }
                SpineToken::Letter(target) => target,
            };

            let (found_line, found_col) =
                find_from(&lines, &mut line_idx, &mut column, target)
                    .ok_or_else(|| ComposeError::exhausted(position, target))?;

            let extends_run = !pending_break
                && out
                    .last()
                    .map_or(false, |last| last.source_index == found_line);
            if extends_run {
                if let Some(last) = out.last_mut() {
                    last.columns.push(found_col);
                }
            } else {
                out.push(MesosticLine::open(
                    found_line,
                    lines[found_line].chars.iter().collect(),
                    found_col,
                ));
            }
            pending_break = false;

            matches.push(MatchedLine {
                spine_position: position,
                source_index: found_line,
                column: found_col,
            });
            position += 1;
        }

        Ok(Mesostic {
            spine: spine.to_string(),
            matches,
            lines: out,
        })
    }

    /// Compose and render in one step
    pub fn compose_text(&self, source: &str, spine: &str) -> Result<String> {
        Ok(self.compose(source, spine)?.render(&self.config))
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new(ComposeConfig::default())
    }
}

/// Compose with the default configuration
pub fn compose(source: &str, spine: &str) -> Result<Mesostic> {
    Composer::default().compose(source, spine)
}

/// Scan forward from the cursor for the first occurrence of `target`.
///
/// Searches the remainder of the current line first, then whole lines
/// below it. On a hit the column cursor lands one past the match; the line
/// cursor stays, so later letters may reuse the same line. Returns `None`
/// once the source is exhausted.
fn find_from(
    lines: &[SourceLine],
    line_idx: &mut usize,
    column: &mut usize,
    target: char,
) -> Option<(usize, usize)> {
    while *line_idx < lines.len() {
        let folded = &lines[*line_idx].folded;
        if let Some(offset) = folded[*column..].iter().position(|&ch| ch == target) {
            let col = *column + offset;
            *column = col + 1;
            return Some((*line_idx, col));
        }
        *line_idx += 1;
        *column = 0;
    }
    None
}
