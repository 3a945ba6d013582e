use clap::Parser;
use std::net::SocketAddr;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use totalcomp::cli::{self, Cli, Command};

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "totalcomp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

#[tokio::main]
async fn main() -> ExitCode {
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Serve { host, port } => {
            let addr = SocketAddr::new(host, port);
            if let Err(e) = totalcomp::api::run_http_server(addr).await {
                tracing::error!("Server error: {e}");
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Command::Estimate(args) => cli::print_estimate(args),
        Command::Catalog => cli::print_catalog(),
    }
}
