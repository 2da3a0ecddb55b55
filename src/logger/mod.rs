//! `tracing` for the console: a bootstrap filter from `ADMIN_CONSOLE_LOG`
//! (or `RUST_LOG`), swapped for `log.filter` once settings are loaded.
//! The global subscriber itself is checked by hand with `bin/logger_demo.rs`.

mod logger;
pub use logger::*;

pub use tracing::{debug, error, info, trace, warn};
