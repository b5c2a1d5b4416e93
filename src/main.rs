use anyhow::Result;
use builder_stats::{
    api::AppState,
    config::{ClientConfig, StatsConfig},
    init_logging, serve, ClobClient, ReportRequest, SortOrder, StatsProcessor,
    DEFAULT_WINDOW_HOURS,
};
use clap::{Parser, Subcommand};
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "builder-stats")]
#[command(about = "Builder trade volume statistics API")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Start the API server
    Serve {
        #[arg(short, long, default_value = "50001")]
        port: u16,

        #[arg(short = 'b', long, default_value = "127.0.0.1")]
        host: String,
    },
    /// Fetch trades once and print the report as JSON
    Report {
        #[arg(long, default_value_t = DEFAULT_WINDOW_HOURS)]
        hours: i64,

        #[arg(short, long, default_value = "desc")]
        order: SortOrder,

        #[arg(short, long)]
        debug: bool,
    },
}

fn build_processor() -> Result<StatsProcessor> {
    let client_config = ClientConfig::from_env()?;
    let stats_config = StatsConfig::from_env()?;

    info!(
        "Using venue at {} ({} mode, up to {} pages per fetch)",
        client_config.host, stats_config.window_mode, stats_config.max_pages
    );

    let client = ClobClient::new(client_config)?;
    Ok(StatsProcessor::new(Arc::new(client), stats_config))
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    init_logging();

    // Parse command line arguments
    let cli = Cli::parse();

    // Load environment variables
    dotenv::dotenv().ok();

    let processor = build_processor()?;

    match cli.command {
        Commands::Serve { host, port } => {
            info!("Starting API server");
            serve(host, port, AppState::new(processor)).await?;
        }
        Commands::Report { hours, order, debug } => {
            let request = ReportRequest {
                window_hours: hours,
                order,
                debug,
            };

            match processor.build_report(request).await {
                Ok(report) => println!("{}", serde_json::to_string_pretty(&report)?),
                Err(e) => {
                    error!("Report failed: {}", e);
                    return Err(e.into());
                }
            }
        }
    }

    Ok(())
}
