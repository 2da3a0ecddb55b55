use admin_console::logger::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::new_bootstrap();
    trace!("bootstrap trace log");
    debug!("bootstrap debug log");
    info!("bootstrap info log");

    let config = LogConfig {
        filter: "admin_console=trace,logger_demo=debug".to_string(),
    };
    logger.reload_from_config(&config)?;
    trace!("console trace log");
    debug!("console debug log");
    info!(user = "ops@example.com", "console info log with a field");

    let bad = LogConfig {
        filter: "=[".to_string(),
    };
    warn!(rejected = logger.reload_from_config(&bad).is_err(), "invalid filter");

    Ok(())
}
