use clap::Parser;
use lexis_analyze::config::{AnalyzerConfig, ServerConfig};
use lexis_analyze::logging::init_logging;
use lexis_analyze::server::run_server;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let analyzer_config = AnalyzerConfig::from_env();
    let server_config = ServerConfig::parse();

    init_logging(server_config.verbose, server_config.log_format)?;

    run_server(server_config, analyzer_config).await
}
