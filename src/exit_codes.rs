//! Exit codes for clang-format-all
//!
//! Per-file formatter failures never change the exit code; only a failure
//! that stops the run before formatting does.

/// Success - Discovery completed and every eligible file was handed to the formatter
pub const SUCCESS: i32 = 0;

/// Tool error - Configuration error or directory traversal failure
pub const TOOL_ERROR: i32 = 2;

/// Helper functions for consistent exit behavior
pub mod exit {
    use super::{SUCCESS, TOOL_ERROR};

    /// Exit with success code (0)
    pub fn success() -> ! {
        std::process::exit(SUCCESS);
    }

    /// Exit with tool error code (2)
    pub fn tool_error() -> ! {
        std::process::exit(TOOL_ERROR);
    }
}
