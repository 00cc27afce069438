use serde::{Deserialize, Serialize};

/// Configuration for rendering a composed mesostic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComposeConfig {
    /// Uppercase the matched spine letters in the rendered output
    pub uppercase_marks: bool,

    /// Left-pad lines so the first mark of every line sits at one column
    pub align_marks: bool,

    /// Fixed indent (spaces) applied to every rendered line
    pub left_margin: usize,
}

impl Default for ComposeConfig {
    fn default() -> Self {
        Self {
            uppercase_marks: true,
            align_marks: true,
            left_margin: 0,
        }
    }
}

impl ComposeConfig {
    /// Raw selection output: no alignment, no mark capitalization
    #[must_use]
    pub fn plain() -> Self {
        Self {
            uppercase_marks: false,
            align_marks: false,
            left_margin: 0,
        }
    }
}
