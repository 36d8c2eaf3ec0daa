mod cmd;
mod output;

use clap::{Parser, Subcommand};
use cmd::{catalog::CatalogSubcommand, serve::ServeArgs};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "mergington",
    about = "Mergington High School extracurricular activities: signup API and tools",
    version,
    propagate_version = true
)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true, short = 'j')]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the HTTP API and web frontend
    Serve(ServeArgs),

    /// List activities from a catalog
    Activities {
        /// YAML catalog (default: built-in)
        #[arg(long, env = "MERGINGTON_CATALOG")]
        catalog: Option<PathBuf>,
    },

    /// Inspect and validate catalog files
    Catalog {
        #[command(subcommand)]
        subcommand: CatalogSubcommand,
    },
}

fn main() {
    let cli = Cli::parse();

    let default_level = match &cli.command {
        Commands::Serve(_) => tracing::Level::INFO,
        _ => tracing::Level::WARN,
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(default_level.into()),
        )
        .with_target(false)
        .init();

    let result = match cli.command {
        Commands::Serve(args) => cmd::serve::run(args),
        Commands::Activities { catalog } => cmd::activities::run(catalog.as_deref(), cli.json),
        Commands::Catalog { subcommand } => cmd::catalog::run(subcommand, cli.json),
    };

    if let Err(e) = result {
        // Print the full error chain (anyhow's alternate Display)
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
