use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(
    name = "haul",
    about = "Haul — pack clustered farmer pickups into trucks",
    version,
    propagate_version = true,
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assign pickups to trucks, cluster by cluster.
    ///
    /// Reads the clustered pickup table (CSV with a header row). Column
    /// names and the truck capacity come from haul.toml when present.
    Pack {
        /// Clustered pickup table
        #[arg(short, long)]
        input: PathBuf,
        /// Config file (default: ./haul.toml if it exists)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Truck capacity in kg, overrides [packing].capacity_kg
        #[arg(long)]
        capacity: Option<f64>,
        /// Output format: text or json
        #[arg(short, long, default_value = "text")]
        format: String,
    },
    /// Generate a haul.toml with default settings
    Init {
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("haul=info".parse()?)
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Pack { input, config, capacity, format } => {
            commands::pack::pack(&input, config.as_deref(), capacity, &format)
        }
        Commands::Init { path } => commands::init::init(&path),
    }
}
