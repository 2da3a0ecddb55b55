//! Where the backend lives, where the session is kept and how loudly to log.
//! `settings/dev.toml` or `settings/release.toml` by build profile, then
//! `ADMIN_CONSOLE__SECTION__KEY` environment overrides.

mod cli;
pub use clap::Parser;
pub use cli::*;

mod settings;
pub use settings::*;
