//! Run an external formatter (`clang-format` by default) in place over every
//! source file below a fixed set of project directories.
//!
//! A run has two phases. Discovery walks the roots and keeps the files whose
//! extension is eligible; formatting then hands each file, in order, to a
//! [`formatter::FileFormatter`].

pub mod config;
pub mod discovery;
pub mod driver;
pub mod exit_codes;
pub mod formatter;
pub mod roots;

pub use crate::config::Config;
pub use crate::driver::{Driver, RunSummary};
pub use crate::formatter::{ClangFormat, FileFormatter, FormatError};

use std::path::Path;

/// Format everything `config` selects below `cwd` with the configured formatter.
pub fn run(config: &Config, cwd: &Path) -> Result<RunSummary, discovery::DiscoveryError> {
    let formatter = ClangFormat::from_config(&config.formatter);
    Driver::from_config(config, cwd, formatter).run()
}
