mod commands;
mod input;
mod output;

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use commands::loan::{InstallmentArgs, ScheduleArgs};

/// Loan amortization schedules with extra principal payments
#[derive(Parser)]
#[command(
    name = "amort",
    version,
    about = "Loan amortization schedules with extra principal payments",
    long_about = "Computes level-installment amortization schedules in decimal precision. \
                  Extra principal payments can be scheduled per period, and the result \
                  compared against the same loan without them."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Decimal places shown in table and minimal output
    #[arg(long, default_value_t = 2, global = true)]
    dp: u32,

    /// Log debug detail to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Quote the level installment for a loan
    Installment(InstallmentArgs),
    /// Build the period-by-period amortization schedule
    Schedule(ScheduleArgs),
    /// Compare the schedule with and without extra payments
    Compare(ScheduleArgs),
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

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Installment(args) => commands::loan::run_installment(args),
        Commands::Schedule(args) => commands::loan::run_schedule(args),
        Commands::Compare(args) => commands::loan::run_compare(args),
        Commands::Version => {
            println!("amort {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            if let Some(warnings) = value.get("warnings").and_then(|w| w.as_array()) {
                for w in warnings.iter().filter_map(|w| w.as_str()) {
                    debug!(warning = w, "computation warning");
                }
            }
            debug!(format = ?cli.output, dp = cli.dp, "rendering output");
            output::format_output(&cli.output, &value, cli.dp);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
