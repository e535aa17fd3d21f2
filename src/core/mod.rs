/*!
# Core Module

Shared location types and file system helpers used by every stage of the
analyzer.
*/

pub mod fs_utils;
pub mod position;

pub use fs_utils::{normalize_path, read_source_file};
pub use position::Span;
