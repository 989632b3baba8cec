mod commands;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tripdesk-cli")]
#[command(about = "Tripdesk command line interface")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Build attraction suggestions for one or more destinations
    Suggest {
        /// Trip length in days
        #[arg(long)]
        days: Option<i64>,
        /// Total trip budget
        #[arg(long)]
        budget: Option<f64>,
        /// Destination names; comma-separated values are split
        #[arg(required = true)]
        destinations: Vec<String>,
    },
    /// List curated catalog destinations
    Catalog,
    /// Print the catalog key a destination label maps to
    Key {
        /// Destination label, e.g. "Singapore City"
        text: String,
    },
    /// Database operations
    Db {
        #[command(subcommand)]
        command: DbCommands,
    },
}

#[derive(Debug, Subcommand)]
enum DbCommands {
    /// Verify the database is reachable
    Ping,
    /// Apply pending migrations
    Migrate,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = tripdesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Some(Commands::Suggest {
            days,
            budget,
            destinations,
        }) => commands::run_suggest(&config, &destinations, days, budget).await?,
        Some(Commands::Catalog) => commands::run_catalog(&config)?,
        Some(Commands::Key { text }) => println!("{}", tripdesk_core::canonical_key(&text)),
        Some(Commands::Db { command }) => {
            let pool = tripdesk_db::connect_pool_from_config(&config).await?;
            match command {
                DbCommands::Ping => {
                    tripdesk_db::health_check(&pool).await?;
                    println!("database ok");
                }
                DbCommands::Migrate => {
                    let applied = tripdesk_db::run_migrations(&pool).await?;
                    println!("applied {applied} migration(s)");
                }
            }
        }
        None => println!("tripdesk-cli ready; see --help"),
    }

    Ok(())
}
