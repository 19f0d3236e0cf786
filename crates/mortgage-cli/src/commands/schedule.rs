use clap::{Args, ValueEnum};
use log::info;
use rust_decimal::Decimal;
use serde_json::Value;

use mortgage_core::amortization::{self, LoanParameters, STANDARD_TERMS_YEARS};

use crate::input;

/// Loan inputs shared by every command
#[derive(Args)]
pub struct LoanArgs {
    /// Path to JSON or YAML input file (overrides individual flags).
    /// Without it, piped stdin is read only when no loan flag is given
    #[arg(long)]
    pub input: Option<String>,

    /// Loan amount at origination
    #[arg(long)]
    pub principal: Option<Decimal>,

    /// Nominal annual interest rate in percent (e.g. 4.5)
    #[arg(long)]
    pub rate: Option<Decimal>,

    /// Loan term in years
    #[arg(long)]
    pub term: Option<u32>,

    /// Round amounts to this many decimal places
    #[arg(long)]
    pub precision: Option<u32>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Sample {
    /// Every month from 0 to the final payment
    Monthly,
    /// Year boundaries plus the final payment
    Yearly,
}

/// Arguments for the schedule command
#[derive(Args)]
pub struct ScheduleArgs {
    #[command(flatten)]
    pub loan: LoanArgs,

    /// Which records to print
    #[arg(long, value_enum, default_value = "yearly")]
    pub sample: Sample,

    /// Sample every N months instead (the final payment is always included)
    #[arg(long, conflicts_with = "sample")]
    pub every: Option<u32>,
}

pub fn run_schedule(args: ScheduleArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(&args.loan)?;
    let output = amortization::generate_schedule(&params)?;
    let sched = match args.loan.precision {
        Some(dp) => output.result.rounded(dp),
        None => output.result,
    };

    let records = match (args.every, args.sample) {
        (Some(months), _) => amortization::sample_every(&sched.periods, months)?,
        (None, Sample::Monthly) => sched.periods,
        (None, Sample::Yearly) => sched.yearly,
    };
    Ok(serde_json::to_value(records)?)
}

pub fn run_summary(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(&args)?;
    let output = amortization::generate_schedule(&params)?;
    let result = output.map(|s| match args.precision {
        Some(dp) => s.summary.rounded(dp),
        None => s.summary,
    });
    Ok(serde_json::to_value(result)?)
}

pub fn run_analyze(args: LoanArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_params(&args)?;
    let output = amortization::generate_schedule(&params)?;
    let result = output.map(|s| match args.precision {
        Some(dp) => s.rounded(dp),
        None => s,
    });
    Ok(serde_json::to_value(result)?)
}

fn load_params(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    // Explicit loan flags win over piped stdin
    let params: LoanParameters = if let Some(ref path) = args.input {
        input::file::read_input(path)?
    } else if has_loan_flags(args) {
        params_from_flags(args)?
    } else if let Some(params) = input::stdin::read_stdin()? {
        params
    } else {
        params_from_flags(args)?
    };

    if !STANDARD_TERMS_YEARS.contains(&params.term_years) {
        info!(
            "term of {} years is outside the standard menu {:?}",
            params.term_years, STANDARD_TERMS_YEARS
        );
    }
    Ok(params)
}

fn has_loan_flags(args: &LoanArgs) -> bool {
    args.principal.is_some() || args.rate.is_some() || args.term.is_some()
}

fn params_from_flags(args: &LoanArgs) -> Result<LoanParameters, Box<dyn std::error::Error>> {
    let principal = args
        .principal
        .ok_or("--principal is required (or provide --input)")?;
    let rate = args.rate.ok_or("--rate is required (or provide --input)")?;
    let term = args.term.ok_or("--term is required (or provide --input)")?;
    Ok(LoanParameters::new(principal, rate, term))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn flags(principal: Option<Decimal>, rate: Option<Decimal>, term: Option<u32>) -> LoanArgs {
        LoanArgs {
            input: None,
            principal,
            rate,
            term,
            precision: None,
        }
    }

    #[test]
    fn test_params_from_flags() {
        let args = flags(Some(dec!(300000)), Some(dec!(4.5)), Some(30));
        let params = params_from_flags(&args).unwrap();
        assert_eq!(params, LoanParameters::new(dec!(300000), dec!(4.5), 30));
    }

    #[test]
    fn test_any_loan_flag_takes_precedence_over_stdin() {
        assert!(!has_loan_flags(&flags(None, None, None)));
        assert!(has_loan_flags(&flags(Some(dec!(300000)), None, None)));
        assert!(has_loan_flags(&flags(None, Some(dec!(4.5)), None)));
        assert!(has_loan_flags(&flags(None, None, Some(30))));
    }

    #[test]
    fn test_missing_flag_names_it() {
        let args = flags(Some(dec!(300000)), None, Some(30));
        let err = params_from_flags(&args).unwrap_err();
        assert!(err.to_string().contains("--rate"));
    }
}
