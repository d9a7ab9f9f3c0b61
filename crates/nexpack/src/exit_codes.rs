//! Exit codes for the CLI

/// Success, including `--help` and `--version`
pub const SUCCESS: i32 = 0;

/// Configuration error, missing dependency, or external step failure
pub const ERROR: i32 = 1;
