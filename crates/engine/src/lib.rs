//! # Mesostic Engine
//!
//! Deterministic mesostic composition: given a block of source text and a
//! spine string, select one source line per spine letter so the spine is
//! spelled down the page at a fixed column.
//!
//! ## Architecture
//!
//! ```text
//! Source Text + Spine
//!     │
//!     ├──> Spine Normalization (letters + break markers)
//!     │
//!     ├──> Line Scan
//!     │    ├─> Monotonic (line, column) cursor
//!     │    ├─> Leftmost match per spine letter
//!     │    └─> Hard failure when the source is exhausted
//!     │
//!     └──> Render
//!          ├─> Collapse same-line runs into one output line
//!          ├─> Uppercase the marked columns
//!          └─> Align first marks vertically
//! ```
//!
//! ## Example
//!
//! ```rust
//! use mesostic_engine::compose;
//!
//! let poem = compose("road\nmist\nplain", "RIP").unwrap();
//! assert_eq!(poem.lines.len(), 3);
//! assert_eq!(poem.lines[0].text, "road");
//! ```
//!
//! The engine is a pure function: no I/O, no logging, no shared state.
//! Concurrent invocations need no coordination.

mod compose;
mod config;
mod error;
mod render;
mod spine;
mod types;

pub use compose::{compose, Composer};
pub use config::ComposeConfig;
pub use error::{ComposeError, Result};
pub use spine::SpineToken;
pub use types::{MatchedLine, Mesostic, MesosticLine};
