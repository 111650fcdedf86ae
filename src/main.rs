//! actionview CLI binary entry point.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use actionview::cli::{Cli, Commands};
use actionview::config::ActionViewConfig;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match ActionViewConfig::load(cli.config.as_deref()) {
        Ok(config) => match cli.command {
            Commands::Replay(args) => actionview::cli::replay::handle_replay(args, config).await,
            Commands::Schema(args) => actionview::cli::replay::handle_schema(args, &config),
        },
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
