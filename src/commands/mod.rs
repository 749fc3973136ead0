//! CLI command handlers, mirroring `examples/sthagen-rvben-rumdl/src/commands/`'s one-handler-
//! per-subcommand layout. Boundary only (spec.md §1): handlers call into the library, render
//! with `formatter`, and translate the result into a process exit code.

pub mod lint;
pub mod rule;

/// Exit codes (spec.md §6: "0 = no violations, 1 = violations found, 2 = error").
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const VIOLATIONS_FOUND: i32 = 1;
    pub const TOOL_ERROR: i32 = 2;
}
