//! Command-line interface for the mission relay.

pub mod commands;

use clap::{Parser, Subcommand};

use commands::config::ConfigArgs;
use commands::serve::ServeArgs;

#[derive(Parser, Debug)]
#[command(name = "mission-relay")]
#[command(about = "Mission relay between an operator dashboard and a field robot", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP server
    Serve(ServeArgs),

    /// Print the effective configuration
    Config(ConfigArgs),
}

/// Report a failed command and exit non-zero.
pub fn handle_error(err: anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let body = serde_json::json!({
            "status": "error",
            "message": format!("{err:#}"),
        });
        eprintln!("{body}");
    } else {
        eprintln!("Error: {err:#}");
    }
    std::process::exit(1);
}
