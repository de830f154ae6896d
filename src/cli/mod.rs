//! Command-line interface for the `z64decompress` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|----------------|
//! | [`constants`] | Program identity strings, the shared display level and the `display!` / `displaylevel!` macros. |
//! | [`args`]      | `Cli`: the clap-derived argument set and its post-parse validation. |
//!
//! Typical call sequence: `Cli::parse` → `Cli::validate` → dispatch to
//! `decode_rom` or `decode_file`.

pub mod args;
pub mod constants;
