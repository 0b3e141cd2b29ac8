use std::fs;
use std::sync::Arc;
use tokio::signal;
use tokio::sync::oneshot;
use userbase::api;
use userbase::logger::*;
use userbase::server::*;
use userbase::settings::*;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let logger = Logger::try_bootstrap()?;

    let project_settings = parse_settings(cli.settings.as_deref())?;
    info!(?project_settings);
    let logger_config = LogConfig {
        filter: project_settings.log.filter.clone(),
    };
    logger.reload_from_config(&logger_config)?;

    let address: std::net::SocketAddr = project_settings.http.address.parse()?;
    let tls = project_settings.http.tls_paths()?;
    if let Some((cert_path, key_path)) = tls {
        if !fs::metadata(cert_path)?.is_file() {
            return Err(anyhow::anyhow!("TLS cert is not a regular file: {:?}", cert_path));
        }
        if !fs::metadata(key_path)?.is_file() {
            return Err(anyhow::anyhow!("TLS key is not a regular file: {:?}", key_path));
        }
    }

    let server = Arc::new(Server::try_new(&project_settings).await?);
    let routes = api::service(server.clone());
    let (stop_tx, stop_rx) = oneshot::channel::<()>();
    let stop = async move {
        stop_rx.await.ok();
    };

    let serving = match tls {
        Some((cert_path, key_path)) => {
            let (bound, serving) = warp::serve(routes)
                .tls()
                .cert_path(cert_path)
                .key_path(key_path)
                .bind_with_graceful_shutdown(address, stop);
            info!(%bound, "listening (https)");
            tokio::spawn(serving)
        }
        None => {
            let (bound, serving) =
                warp::serve(routes).try_bind_with_graceful_shutdown(address, stop)?;
            info!(%bound, "listening (http)");
            tokio::spawn(serving)
        }
    };

    signal::ctrl_c().await?;
    info!("SIGINT received");
    let _ = stop_tx.send(());
    serving.await?;

    let shutdown_timeout = std::time::Duration::from_secs(10);
    match tokio::time::timeout(shutdown_timeout, server.shutdown()).await {
        Ok(_) => info!("server shutdown successfully"),
        Err(_) => error!("server shutdown timed out"),
    }

    Ok(())
}
