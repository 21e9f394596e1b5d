//! senal CLI - run block-diagram patches from the command line.

mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "senal")]
#[command(author, version, about = "Block-diagram signal simulator", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a patch and report every block's output
    Run(commands::run::RunArgs),

    /// Validate a patch and print its topology
    Check(commands::check::CheckArgs),

    /// List block types, their ports and default parameters
    Blocks(commands::blocks::BlocksArgs),

    /// List factory patches or print one as TOML
    Factory(commands::factory::FactoryArgs),
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run(args) => commands::run::run(args),
        Commands::Check(args) => commands::check::run(args),
        Commands::Blocks(args) => commands::blocks::run(args),
        Commands::Factory(args) => commands::factory::run(args),
    }
}
