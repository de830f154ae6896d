// cli/constants.rs - Program identity, display level and the logging macros.
//
// Every diagnostic in the crate goes to stderr through `display!` /
// `displaylevel!`, gated on one process-wide display level so the library and
// the binary share a single verbosity setting.

use std::sync::atomic::{AtomicU32, Ordering};

// ── Identity ──────────────────────────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "z64decompress";
pub const AUTHOR: &str = "z64.me";

/// Infix inserted between the input stem and its extension when no output
/// path is given: `rom.z64` → `rom.decompressed.z64`.
pub const DECOMPRESSED_INFIX: &str = "decompressed";

/// Extension used for derived output names when the input has none.
pub const DEFAULT_EXTENSION: &str = "z64";

// ── Display level ─────────────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal; 3 = info; 4 = verbose
pub const DISPLAY_LEVEL_DEFAULT: u32 = 2;
pub const DISPLAY_LEVEL_MAX: u32 = 4;

pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(DISPLAY_LEVEL_DEFAULT);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level, clamped to [`DISPLAY_LEVEL_MAX`].
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level.min(DISPLAY_LEVEL_MAX), Ordering::Relaxed);
}

/// Applies `-v` / `-q` counts on top of the default level.
pub fn display_level_from_flags(verbose: u8, quiet: u8) -> u32 {
    (DISPLAY_LEVEL_DEFAULT + verbose as u32)
        .saturating_sub(quiet as u32)
        .min(DISPLAY_LEVEL_MAX)
}

// ── Display macros ────────────────────────────────────────────────────────────

/// Print to stderr unconditionally.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Print to stderr when the display level is at least `level`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
