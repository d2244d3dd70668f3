use anyhow::Result;
use clap::Parser;
use memftpd::core_cli::Cli;
use memftpd::core_log::logger::init_logger;
use memftpd::{server, Config};

#[tokio::main]
async fn main() -> Result<()> {
    // Parse CLI arguments
    let args = Cli::parse();

    init_logger(args.verbose);

    let mut config = match &args.config {
        Some(path) => Config::load_from_file(path)?,
        None => Config::default(),
    };

    if let Some(port) = args.port {
        config.server.listen_port = port;
    }

    server::run(config).await
}
