use thiserror::Error;

/// Result type for composition operations
pub type Result<T> = std::result::Result<T, ComposeError>;

/// Errors that can occur while composing a mesostic
///
/// All variants are input/feasibility failures. The computation is pure, so
/// retrying the same inputs reproduces the same failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComposeError {
    /// Source text is empty or contains only blank lines
    #[error("source text has no content")]
    EmptySource,

    /// Spine contains no alphabetic characters
    #[error("spine has no alphabetic characters")]
    EmptySpine,

    /// No remaining source line contains the needed spine letter
    #[error("spine letter '{letter}' at position {position} not found in remaining source")]
    SpineExhaustsSource { position: usize, letter: char },
}

impl ComposeError {
    /// Create an exhaustion error for a spine position
    pub(crate) fn exhausted(position: usize, letter: char) -> Self {
        Self::SpineExhaustsSource { position, letter }
    }
}
