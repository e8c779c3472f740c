//! # analytics
//!
//! Runs one analytics request from a JSON file, the same shapes the HTTP
//! API accepts, and prints the result as pretty JSON.

use clap::{Parser, Subcommand};
use serde::{de::DeserializeOwned, Serialize};
use server::requests::{
    BudgetForecastRequest, DetectRequest, ForecastRequest, MultiDetectRequest, OptimizeRequest,
};
use server::{Analytics, RequestError};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

type CliResult<T> = std::result::Result<T, String>;

#[derive(Parser)]
#[command(name = "analytics")]
#[command(about = "Campaign anomaly detection, forecasting and budget CLI", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Detect anomalies in one metric series
    Detect {
        /// Request file (JSON)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file (optional)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Detect anomalies across several metrics of one campaign
    DetectMulti {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Forecast a metric
    Predict {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Recommend a daily budget for a target ROAS
    BudgetForecast {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split a total budget across campaigns
    Optimize {
        #[arg(short, long)]
        input: PathBuf,

        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn load_request<R: DeserializeOwned>(path: &Path) -> CliResult<R> {
    let file = File::open(path).map_err(|e| format!("Failed to open {:?}: {}", path, e))?;
    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| format!("Failed to parse request: {}", e))
}

fn write_result<T: Serialize>(result: &T, output: Option<&Path>) -> CliResult<()> {
    if let Some(path) = output {
        let mut file =
            File::create(path).map_err(|e| format!("Failed to create {:?}: {}", path, e))?;
        serde_json::to_writer_pretty(&mut file, result)
            .map_err(|e| format!("Failed to write JSON: {}", e))?;
        println!("Results written to {:?}", path);
    } else {
        let json = serde_json::to_string_pretty(result)
            .map_err(|e| format!("Failed to serialize result: {}", e))?;
        println!("{}", json);
    }
    Ok(())
}

/// Load a request, run it and emit the result.
fn execute<R, T>(
    analytics: &Analytics,
    input: &Path,
    output: Option<&Path>,
    run: impl FnOnce(&R, &Analytics) -> Result<T, RequestError>,
) -> CliResult<()>
where
    R: DeserializeOwned,
    T: Serialize,
{
    let request: R = load_request(input)?;
    let result = run(&request, analytics).map_err(|e| e.to_string())?;
    write_result(&result, output)
}

fn dispatch(command: Commands, analytics: &Analytics) -> CliResult<()> {
    match command {
        Commands::Detect { input, output } => {
            execute(analytics, &input, output.as_deref(), DetectRequest::run)
        }
        Commands::DetectMulti { input, output } => {
            execute(analytics, &input, output.as_deref(), MultiDetectRequest::run)
        }
        Commands::Predict { input, output } => {
            execute(analytics, &input, output.as_deref(), ForecastRequest::run)
        }
        Commands::BudgetForecast { input, output } => {
            execute(analytics, &input, output.as_deref(), BudgetForecastRequest::run)
        }
        Commands::Optimize { input, output } => {
            execute(analytics, &input, output.as_deref(), OptimizeRequest::run)
        }
    }
}

fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "server=info,analytics=info".into()),
        )
        .init();

    let cli = Cli::parse();
    let analytics = Analytics::new();

    if let Err(e) = dispatch(cli.command, &analytics) {
        tracing::debug!(error = %e, "command failed");
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
