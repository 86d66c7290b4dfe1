use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::{json, Value};
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

use person_records::{logging, Config, Pipeline, PipelineResult};

#[derive(Parser)]
#[command(name = "person-records")]
#[command(about = "Normalize, deduplicate and summarize hand-entered personal records")]
#[command(version = "0.1.0")]
struct Cli {
    /// Path to the TOML configuration file
    #[arg(long, global = true, default_value = "config.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write the cleaned records as JSON
    Clean {
        /// CSV file to read (".csv" is appended when the name has no extension)
        #[arg(long)]
        input: PathBuf,
        /// Output file; stdout when omitted
        #[arg(long)]
        output: Option<PathBuf>,
    },
    /// Print the aggregate statistics as JSON
    Stats {
        /// CSV file to read (".csv" is appended when the name has no extension)
        #[arg(long)]
        input: PathBuf,
    },
}

/// Render a query result, logging and nulling out errors
fn or_null<T: serde::Serialize>(result: person_records::Result<T>) -> Value {
    match result {
        Ok(value) => json!(value),
        Err(e) => {
            error!("{}", e);
            Value::Null
        }
    }
}

fn statistics_json(result: &PipelineResult) -> Value {
    let stats = result.statistics();
    json!({
        "most_common_surname": or_null(stats.most_common_surname()),
        "average_age": or_null(stats.average_age()),
        "youngest_dr": or_null(stats.youngest_dr()),
        "most_common_month": or_null(stats.most_common_month()),
        "percentage_titles": or_null(stats.percentage_titles()),
        "percentage_altered": or_null(result.percentage_altered()),
        "report": result.report,
    })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = Config::load(&cli.config)
        .with_context(|| format!("loading config from {}", cli.config.display()))?;
    let _guard = logging::init_logging(&config.logging);

    let pipeline = Pipeline::new(config.pipeline);

    match cli.command {
        Commands::Clean { input, output } => {
            let result = pipeline
                .run_file(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            let body = serde_json::to_string_pretty(&result.cleaned)?;

            match output {
                Some(path) => {
                    fs::write(&path, body)
                        .with_context(|| format!("writing {}", path.display()))?;
                    info!("Wrote {} cleaned records to {}", result.cleaned.len(), path.display());
                }
                None => println!("{}", body),
            }
        }
        Commands::Stats { input } => {
            let result = pipeline
                .run_file(&input)
                .with_context(|| format!("reading {}", input.display()))?;
            println!("{}", serde_json::to_string_pretty(&statistics_json(&result))?);
        }
    }

    Ok(())
}
