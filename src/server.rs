use crate::config::Config;
use crate::core_network::network;
use anyhow::{Context, Result};
use log::{error, info};
use std::sync::Arc;

/// Runs the FTP server with the provided configuration.
///
/// The filesystem is built once here and shared read-only with every session.
///
/// # Arguments
///
/// * `config` - The server configuration.
///
/// # Returns
///
/// Result<(), anyhow::Error> indicating the success or failure of the operation.
pub async fn run(config: Config) -> Result<()> {
    info!("Starting server with config: {:?}", config.server);

    let vfs = Arc::new(
        config
            .build_filesystem()
            .context("Invalid [filesystem] table in configuration")?,
    );

    if let Err(e) = network::start_server(Arc::new(config), vfs).await {
        error!("Server stopped: {:#}", e);
        return Err(e);
    }

    Ok(())
}
