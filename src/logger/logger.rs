use anyhow::{Context, Result};
use tracing_subscriber::{
    EnvFilter, Registry, fmt, layer::SubscriberExt, reload, util::SubscriberInitExt,
};

/// Checked before `RUST_LOG` while settings are not loaded yet.
pub const LOG_ENV: &str = "ADMIN_CONSOLE_LOG";
const BOOTSTRAP_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub filter: String,
}

impl LogConfig {
    /// `--log-filter` beats `log.filter` from the settings file.
    pub fn resolve(settings_filter: &str, cli_override: Option<&str>) -> Self {
        let filter = cli_override
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .unwrap_or(settings_filter);
        LogConfig {
            filter: filter.to_owned(),
        }
    }
}

fn bootstrap_directives(console_env: Option<String>, rust_log: Option<String>) -> String {
    [console_env, rust_log]
        .into_iter()
        .flatten()
        .find(|f| !f.trim().is_empty() && EnvFilter::try_new(f).is_ok())
        .unwrap_or_else(|| BOOTSTRAP_FILTER.to_owned())
}

pub struct Logger {
    reload_handle: reload::Handle<EnvFilter, Registry>,
}

impl Logger {
    pub fn new_bootstrap() -> Self {
        let directives = bootstrap_directives(
            std::env::var(LOG_ENV).ok(),
            std::env::var("RUST_LOG").ok(),
        );
        let filter = EnvFilter::new(&directives);
        let (filter, reload_handle) = reload::Layer::new(filter);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true))
            .init();

        Self { reload_handle }
    }

    pub fn reload_from_config(&self, config: &LogConfig) -> Result<()> {
        let filter = EnvFilter::try_new(&config.filter)
            .with_context(|| format!("invalid log filter '{}'", config.filter))?;
        self.reload_handle
            .reload(filter)
            .context("log subscriber is gone")?;
        tracing::debug!(filter = %config.filter, "log filter reloaded");
        Ok(())
    }
}
