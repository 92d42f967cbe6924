mod commands;

use clap::{Parser, Subcommand};
use commands::cleanup::CleanupArgs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "gatesweep")]
#[command(about = "Remove stale API Gateway stages after a deployment", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Delete every stage the current deployment does not use
    Cleanup(CleanupArgs),
    /// Print the stage the compiled template declares as current
    Resolve {
        /// Compiled template or deployment state file
        #[arg(short, long)]
        template: Option<PathBuf>,
    },
    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    // version needs no settings file
    if matches!(cli.command, Commands::Version) {
        println!("gatesweep {}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let settings = gatesweep_config::Settings::load()?;

    match cli.command {
        Commands::Cleanup(args) => commands::cleanup::handle(&settings, args).await,
        Commands::Resolve { template } => commands::resolve::handle(&settings, template),
        Commands::Version => Ok(()),
    }
}
