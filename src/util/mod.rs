//! Small shared helpers: page-level signals and display formatting.

pub mod format;
pub mod page;
