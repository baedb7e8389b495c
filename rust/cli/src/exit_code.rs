//! Process exit codes returned by [`crate::run`].

pub const SUCCESS: i32 = 0;

/// Parse errors, invalid input and failed commands.
pub const ERROR: i32 = 2;

/// Interrupted by user (Ctrl+C).
pub const INTERRUPTED: i32 = 130;
