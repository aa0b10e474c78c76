//! CLI-facing helpers shared with the binary crate.

mod progress;

pub use progress::{format_bytes, ProgressManager};
