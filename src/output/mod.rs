//! Output formatting module

mod formatter;

pub use formatter::{finish_progress, print_progress, OutputFormat, ResultFormatter};
