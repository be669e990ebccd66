use anyhow::Result;
use clap::{Parser, Subcommand};
use crewdesk_table::BucketFilter;

mod cli;

use cli::{OutputFormat, TableKind};

/// crewdesk - project table and weekly crew schedule
#[derive(Parser)]
#[command(name = "crewdesk")]
#[command(about = "Project table and weekly crew schedule views", long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Filter, sort and count project rows
    Projects {
        /// Case-insensitive substring matched against the searchable columns
        #[arg(long, short)]
        query: Option<String>,

        /// Column to sort by (defaults to the table's default column)
        #[arg(long)]
        sort: Option<String>,

        /// Sort descending
        #[arg(long)]
        desc: bool,

        /// KPI bucket filter: all, needs_assignment, not_started, in_progress, completed
        #[arg(long)]
        bucket: Option<BucketFilter>,

        #[arg(long, value_enum, default_value_t = TableKind::Projects)]
        table: TableKind,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Show the crew assignment grid for one week
    Schedule {
        /// Any date in the week to show (defaults to this week)
        #[arg(long)]
        week: Option<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = crewdesk::Config::load(cli.config.clone())?;
    config.validate().map_err(|e| anyhow::anyhow!(e))?;

    crewdesk::observability::init_observability(
        "crewdesk",
        env!("CARGO_PKG_VERSION"),
        &config.observability,
    )?;

    match cli.command {
        Commands::Projects {
            query,
            sort,
            desc,
            bucket,
            table,
            format,
        } => {
            let options = cli::projects::ProjectsOptions {
                query,
                sort,
                desc,
                bucket,
                table,
                format,
            };
            cli::projects::run(config, options).await
        }
        Commands::Schedule { week, format } => cli::schedule::run(config, week, format).await,
    }
}
