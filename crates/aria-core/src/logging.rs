//! Tracing bootstrap for binaries and integration tests.

use std::str::FromStr;

use tracing::Level;

/// Initialize the global tracing subscriber at the given level.
///
/// Unknown level strings fall back to `info`. Calling this more than once
/// is harmless; later calls are ignored.
pub fn init(level: &str) {
    let level = Level::from_str(level).unwrap_or(Level::INFO);
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
