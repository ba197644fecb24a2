mod commands;
mod input;
mod output;
mod render;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::charts::ChartsArgs;
use commands::dashboard::DashboardArgs;
use commands::evaluate::EvaluateArgs;
use sofinscore_core::model::bundle::DEFAULT_MODELS_DIR;
use sofinscore_core::model::shared_cache;

/// Real-time credit decision support
#[derive(Parser)]
#[command(
    name = "sofinscore",
    version,
    about = "Real-time credit decision support",
    long_about = "Scores a credit applicant against a pre-trained Random Forest model. \
                  Enter monthly income, age, loan amount and credit history to get a \
                  reliability score, the default probability and an approve / manual \
                  review / reject decision."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format (dashboard accepts json or table only)
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Directory holding credit_model.json and scaler.json
    #[arg(long, default_value = DEFAULT_MODELS_DIR, global = true)]
    models_dir: PathBuf,
}

#[derive(Subcommand)]
enum Commands {
    /// Score one applicant
    Evaluate(EvaluateArgs),
    /// Render the full decision dashboard
    Dashboard(DashboardArgs),
    /// Portfolio overview charts
    Charts(ChartsArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn error_line(e: impl std::fmt::Display) -> String {
    format!("{}: {}", "error".red().bold(), e)
}

fn fail(e: impl std::fmt::Display) -> ! {
    eprintln!("{}", error_line(e));
    process::exit(1);
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    tracing::debug!(models_dir = %cli.models_dir.display(), "sofinscore starting");

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Evaluate(args) => {
            commands::evaluate::run_evaluate(args, &cli.models_dir, shared_cache())
        }
        Commands::Dashboard(args) => {
            commands::dashboard::check_output(&cli.output).unwrap_or_else(|e| fail(e));
            let view = commands::dashboard::run_dashboard(args, &cli.models_dir, shared_cache())
                .unwrap_or_else(|e| fail(e));
            match cli.output {
                OutputFormat::Table => render::print_page(&view),
                _ => output::json::print_json(&view),
            }
            process::exit(commands::dashboard::exit_code(&view));
        }
        Commands::Charts(args) => {
            let charts = commands::charts::run_charts(args).unwrap_or_else(|e| fail(e));
            match cli.output {
                OutputFormat::Table => render::print_charts(&charts),
                OutputFormat::Csv => output::csv_out::print_csv(
                    &serde_json::to_value(&charts.decision_volumes).unwrap_or_default(),
                ),
                _ => output::format_output(
                    &cli.output,
                    &serde_json::to_value(&charts).unwrap_or_default(),
                ),
            }
            return;
        }
        Commands::Version => {
            println!("sofinscore {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => fail(e),
    }
}
