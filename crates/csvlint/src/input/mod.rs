//! Line sources and the per-row quote scanner.

mod lines;
pub(crate) mod row;

pub use lines::{split_lines, ReaderLines, SplitLines};
