//! Docgate Server Binary
//!
//! Serves one in-memory document namespace over HTTP(S).

use std::sync::Arc;
use tracing::info;
use tracing_subscriber::FmtSubscriber;

use docgate_server::{
    new_resolve_handler, new_update_handler, DocgateConfig, HttpServer, MemoryDocumentHandler,
    RequestHandler,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = DocgateConfig::from_env()?;

    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let documents = Arc::new(MemoryDocumentHandler::new(config.namespace.clone()));

    let handlers: Vec<Arc<dyn RequestHandler>> = vec![
        Arc::new(new_update_handler(&config.base_path, documents.clone())),
        Arc::new(new_resolve_handler(&config.base_path, documents)),
    ];

    info!(
        namespace = %config.namespace,
        base_path = %config.base_path,
        address = %config.address,
        "Starting document server"
    );

    let server = HttpServer::new(
        config.address.clone(),
        config.cert_file.clone(),
        config.key_file.clone(),
        handlers,
    )?;
    server.start().await?;

    tokio::signal::ctrl_c().await?;
    info!("Shutdown signal received");

    server.stop(config.shutdown_timeout).await?;
    Ok(())
}
