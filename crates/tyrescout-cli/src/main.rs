mod commands;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;
use tyrescout_pipeline::Stage;

#[derive(Debug, Parser)]
#[command(name = "tyrescout")]
#[command(about = "Tractor tyre repair business research pipeline")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Collect, enhance and review in one pass
    Run {
        /// Search only these areas instead of the configured list (repeatable)
        #[arg(long = "area")]
        areas: Vec<String>,
        /// Fill unknown researched fields with low-confidence placeholders
        #[arg(long)]
        apply_defaults: bool,
    },
    /// Search the places provider and write the collected snapshot
    Collect {
        /// Search only these areas instead of the configured list (repeatable)
        #[arg(long = "area")]
        areas: Vec<String>,
    },
    /// Scrape business websites for repair details
    Enhance,
    /// Score and flag records, writing the final snapshot
    Review {
        /// Fill unknown researched fields with low-confidence placeholders
        #[arg(long)]
        apply_defaults: bool,
    },
    /// Print the data quality report for a snapshot
    Validate {
        #[arg(long, value_enum, default_value_t = StageArg::Reviewed)]
        stage: StageArg,
    },
    /// Push the final snapshot to a new spreadsheet
    Export,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum StageArg {
    Collected,
    Enhanced,
    Reviewed,
}

impl From<StageArg> for Stage {
    fn from(arg: StageArg) -> Self {
        match arg {
            StageArg::Collected => Stage::Collected,
            StageArg::Enhanced => Stage::Enhanced,
            StageArg::Reviewed => Stage::Reviewed,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    let config = tyrescout_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    match cli.command {
        Some(Commands::Run {
            areas,
            apply_defaults,
        }) => commands::run(&config, areas, apply_defaults).await?,
        Some(Commands::Collect { areas }) => commands::collect(&config, areas).await?,
        Some(Commands::Enhance) => commands::enhance(&config).await?,
        Some(Commands::Review { apply_defaults }) => commands::review(&config, apply_defaults)?,
        Some(Commands::Validate { stage }) => commands::validate(&config, stage.into())?,
        Some(Commands::Export) => commands::export(&config).await?,
        None => println!("tyrescout: no command given; see `tyrescout --help`"),
    }

    Ok(())
}
