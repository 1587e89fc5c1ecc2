use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use mealweek::cli::generate::GenerateArgs;

/// mealweek - rotating weekly meal plans
#[derive(Parser)]
#[command(name = "mealweek")]
#[command(about = "Rotating weekly meal plan generation", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate and save the plan for the coming period
    Generate {
        /// First day of the plan, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        start_date: Option<String>,

        /// Number of days to generate (overrides config)
        #[arg(long)]
        days: Option<u32>,

        /// Seed for reproducible selection
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the current plan
    Show,
    /// Import meal options from a JSON file
    Import {
        /// Path to a JSON array of meal options
        file: PathBuf,
    },
    /// Run the recurring generation trigger until interrupted
    Schedule,
    /// Run database migrations
    Migrate,
    /// Drop the database if it exists and recreate it with migrations
    Reset,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = mealweek::config::Config::load(cli.config.clone())?;
    config
        .validate()
        .map_err(mealweek_shared::Error::Config)?;

    mealweek::observability::init_tracing(&config.observability.log_level)?;

    match cli.command {
        Commands::Generate {
            start_date,
            days,
            seed,
        } => {
            let start_date = start_date
                .map(|value| mealweek::cli::parse_date(&value))
                .transpose()?;

            let pool = mealweek::db::create_pool(
                &config.database.url,
                config.database.max_connections,
            )
            .await?;

            let args = GenerateArgs {
                start_date,
                days,
                seed,
            };

            mealweek::cli::generate::run(&config, &pool, args).await
        }
        Commands::Show => {
            let pool = mealweek::db::create_pool(
                &config.database.url,
                config.database.max_connections,
            )
            .await?;

            mealweek::cli::show::run(&pool).await
        }
        Commands::Import { file } => {
            let pool = mealweek::db::create_pool(&config.database.url, 1).await?;

            mealweek::cli::import::run(&pool, &file).await
        }
        Commands::Schedule => {
            let pool = mealweek::db::create_pool(
                &config.database.url,
                config.database.max_connections,
            )
            .await?;

            mealweek::cli::schedule::run(config, pool).await
        }
        Commands::Migrate => mealweek::migrate::migrate(&config).await,
        Commands::Reset => mealweek::migrate::reset(&config).await,
    }
}
