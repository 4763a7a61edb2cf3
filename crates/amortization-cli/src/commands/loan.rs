use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use tracing::{debug, info};

use amortization_core::comparison;
use amortization_core::schedule::{self, ExtraPayments, InstallmentInput, ScheduleInput};
use amortization_core::time_value::rate_from_percent;

use crate::input;

/// Arguments for quoting the level installment
#[derive(Args)]
pub struct InstallmentArgs {
    /// Path to JSON or YAML input file; loan flags given alongside override its values
    #[arg(long)]
    pub input: Option<String>,

    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Interest rate per period, in percent (1.5 = 1.5%)
    #[arg(long)]
    pub rate_pct: Option<Decimal>,

    /// Number of installments
    #[arg(long)]
    pub term: Option<u32>,
}

pub fn run_installment(args: InstallmentArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let mut installment_input: InstallmentInput = if let Some(ref path) = args.input {
        debug!(path = %path, "reading installment input from file");
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        debug!("reading installment input from stdin");
        data
    } else {
        InstallmentInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            periodic_rate: rate_from_percent(
                args.rate_pct
                    .ok_or("--rate-pct is required (or provide --input)")?,
            ),
            term_periods: args.term.ok_or("--term is required (or provide --input)")?,
        }
    };

    if let Some(principal) = args.principal {
        installment_input.principal = principal;
    }
    if let Some(rate_pct) = args.rate_pct {
        installment_input.periodic_rate = rate_from_percent(rate_pct);
    }
    if let Some(term) = args.term {
        installment_input.term_periods = term;
    }

    info!(
        principal = %installment_input.principal,
        rate = %installment_input.periodic_rate,
        term = installment_input.term_periods,
        "quoting installment"
    );
    let result = schedule::quote_installment(&installment_input)?;
    Ok(serde_json::to_value(result)?)
}

/// Arguments shared by the schedule and compare commands
#[derive(Args)]
pub struct ScheduleArgs {
    /// Path to JSON or YAML input file; loan flags given alongside override its values
    #[arg(long)]
    pub input: Option<String>,

    /// Amount financed
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Interest rate per period, in percent (1.5 = 1.5%)
    #[arg(long)]
    pub rate_pct: Option<Decimal>,

    /// Number of installments
    #[arg(long)]
    pub term: Option<u32>,

    /// Installment to bill instead of the annuity amount
    #[arg(long)]
    pub installment: Option<Decimal>,

    /// Extra principal payment as PERIOD=AMOUNT, e.g. "12=1,000.50"; repeat for more periods
    #[arg(long = "extra", value_parser = input::extras::parse_extra)]
    pub extra: Vec<(u32, Decimal)>,

    /// CSV file of extra payments with columns period,extra
    #[arg(long)]
    pub extra_file: Option<String>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input = resolve_schedule_input(args)?;
    let result = schedule::build_schedule(&schedule_input)?;
    info!(
        periods = result.result.summary.periods_elapsed,
        paid_off = result.result.summary.paid_off,
        "schedule built"
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_compare(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let schedule_input = resolve_schedule_input(args)?;
    let result = comparison::compare_schedules(&schedule_input)?;
    info!(
        periods_saved = result.result.periods_saved,
        interest_saved = %result.result.interest_saved,
        "comparison built"
    );
    Ok(serde_json::to_value(result)?)
}

/// Loan from --input, piped stdin or flags, with any loan flags and extras
/// given on the command line layered on top.
fn resolve_schedule_input(args: ScheduleArgs) -> Result<ScheduleInput, Box<dyn std::error::Error>> {
    let mut schedule_input: ScheduleInput = if let Some(ref path) = args.input {
        debug!(path = %path, "reading schedule input from file");
        input::file::read_input(path)?
    } else if let Some(data) = input::stdin::read_stdin()? {
        debug!("reading schedule input from stdin");
        data
    } else {
        ScheduleInput {
            principal: args
                .principal
                .ok_or("--principal is required (or provide --input)")?,
            periodic_rate: rate_from_percent(
                args.rate_pct
                    .ok_or("--rate-pct is required (or provide --input)")?,
            ),
            term_periods: args.term.ok_or("--term is required (or provide --input)")?,
            installment: args.installment,
            extra_payments: ExtraPayments::new(),
        }
    };

    if let Some(principal) = args.principal {
        schedule_input.principal = principal;
    }
    if let Some(rate_pct) = args.rate_pct {
        schedule_input.periodic_rate = rate_from_percent(rate_pct);
    }
    if let Some(term) = args.term {
        schedule_input.term_periods = term;
    }
    if args.installment.is_some() {
        schedule_input.installment = args.installment;
    }

    if let Some(ref path) = args.extra_file {
        let extras = input::extras::read_extras_csv(path)?;
        debug!(path = %path, count = extras.len(), "loaded extra payments");
        for (period, amount) in extras {
            schedule_input.extra_payments.insert(period, amount);
        }
    }
    for (period, amount) in args.extra {
        schedule_input.extra_payments.insert(period, amount);
    }

    Ok(schedule_input)
}
