//! mission-relay CLI entry point.

use clap::Parser;

use mission_relay::cli::{Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Serve(args) => mission_relay::cli::commands::serve::execute(args, cli.json).await,
        Commands::Config(args) => {
            mission_relay::cli::commands::config::execute(args, cli.json).await
        }
    };

    if let Err(err) = result {
        mission_relay::cli::handle_error(err, cli.json);
    }
}
