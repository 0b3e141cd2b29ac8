use userbase::logger::*;

fn main() -> anyhow::Result<()> {
    let logger = Logger::try_bootstrap()?;
    debug!("bootstrap debug log, hidden");
    info!("bootstrap info log");

    let config = LogConfig {
        filter: "debug".to_string(),
    };
    logger.reload_from_config(&config)?;
    debug!("application debug log");

    let bad = LogConfig {
        filter: "userbase=loud".to_string(),
    };
    if let Err(e) = logger.reload_from_config(&bad) {
        warn!("rejected filter: {}", e);
    }

    Ok(())
}
