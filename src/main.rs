//! CLI entry point for the company data analyzer.
//!
//! Provides subcommands for producing a full report from a company CSV and
//! for exporting only the cleaned data.

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use company_analyzer::analyzers::types::AnalysisSummary;
use company_analyzer::config::Config;
use company_analyzer::fetch::load_source;
use company_analyzer::output::{EXPORT_FILE_NAME, export, print_json, print_pretty, write_report};
use company_analyzer::pipeline::{Session, analyze};
use company_analyzer::presenter::render;
use std::ffi::OsStr;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use tracing_subscriber::{
    EnvFilter, Layer,
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
};

#[derive(Parser)]
#[command(name = "company_analyzer")]
#[command(about = "Clean, summarize and chart company CSVs", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean a company CSV, print summary tables and write charts plus the cleaned CSV
    Analyze {
        /// Path to file, URL to fetch, or "-" for stdin
        #[arg(value_name = "FILE_OR_URL")]
        source: Option<String>,

        /// Directory to write charts, cleaned CSV and summary.json to
        #[arg(short, long, default_value = "report")]
        out_dir: PathBuf,

        /// Also log the run summary as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Clean a company CSV and write only the cleaned data
    Clean {
        /// Path to file, URL to fetch, or "-" for stdin
        #[arg(value_name = "FILE_OR_URL")]
        source: String,

        /// Where to write the cleaned CSV ("-" for stdout)
        #[arg(short, long, default_value = EXPORT_FILE_NAME)]
        output: String,
    },
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok(); // Load .env file

    let config = Config::from_env()?;

    // Logging setup: colored stderr + JSON rolling log file
    let log_dir = config
        .log_file_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("logs"));
    let log_file_name = config
        .log_file_path
        .file_name()
        .unwrap_or(OsStr::new("company_analyzer.log"));

    let file_appender = tracing_appender::rolling::daily(log_dir, log_file_name);
    let (non_blocking_file, _file_guard) = tracing_appender::non_blocking(file_appender);

    let stderr_layer = fmt::layer()
        .with_target(true)
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(EnvFilter::from_env("RUST_LOG").add_directive("info".parse()?));

    let json_layer = fmt::layer()
        .json()
        .with_current_span(true)
        .with_span_list(true)
        .with_writer(non_blocking_file)
        .with_filter(EnvFilter::from_env("RUST_LOG_JSON").add_directive("debug".parse()?));

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(json_layer)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            source,
            out_dir,
            json,
        } => {
            let upload = source.as_deref().map(load_source).transpose()?;

            let analysis = match Session::from_upload(upload.as_deref()) {
                Ok(Session::AwaitingInput) => {
                    info!("Please upload a CSV file to analyze.");
                    return Ok(());
                }
                Ok(Session::Displaying(analysis)) => analysis,
                Err(e) => {
                    error!(error = %e, "Company CSV could not be analyzed");
                    return Err(e.into());
                }
            };

            info!(
                rows_in = analysis.stats.rows_in,
                duplicates_removed = analysis.stats.duplicates_removed,
                rows_dropped = analysis.stats.rows_dropped,
                rows_out = analysis.stats.rows_out,
                "Company data cleaned"
            );

            let report = render(&analysis, config.chart_size)?;
            println!("{}", report.text());

            let download = export(&analysis.table)?;
            let summary = AnalysisSummary {
                generated_at: Utc::now(),
                source,
                clean: analysis.stats,
                aggregates: analysis.aggregates,
            };

            print_pretty(&summary);
            if json {
                print_json(&summary)?;
            }

            write_report(&out_dir, &report, &download, &summary)?;
        }
        Commands::Clean { source, output } => {
            clean_to(&source, &output)?;
        }
    }

    Ok(())
}

/// Cleans the CSV at `source` and writes the export to `output`.
#[tracing::instrument]
fn clean_to(source: &str, output: &str) -> Result<()> {
    let bytes = load_source(source)?;
    let analysis = analyze(&bytes).inspect_err(|e| {
        error!(error = %e, "Company CSV could not be cleaned");
    })?;
    let download = export(&analysis.table)?;

    write_output(output, &download.data)?;

    info!(
        rows_out = analysis.stats.rows_out,
        bytes = download.data.len(),
        "Cleaned CSV written"
    );
    Ok(())
}

/// Writes `data` to the file at `output`, or to stdout when it is `-`.
fn write_output(output: &str, data: &[u8]) -> Result<()> {
    if output == "-" {
        std::io::stdout()
            .write_all(data)
            .context("Failed to write cleaned CSV to stdout")
    } else {
        std::fs::write(output, data).with_context(|| format!("Failed to write {}", output))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::fs;

    #[test]
    fn test_write_output_to_file() {
        let path = env::temp_dir().join("company_analyzer_test_clean_output.csv");

        write_output(path.to_str().unwrap(), b"company_name\nAcme\n").unwrap();

        assert_eq!(fs::read(&path).unwrap(), b"company_name\nAcme\n");
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_output_names_unwritable_path() {
        let err = write_output("/definitely/not/here/cleaned.csv", b"x").unwrap_err();

        let message = err.to_string();
        assert!(message.contains("Failed to write /definitely/not/here/cleaned.csv"));
    }
}
