//! Month-by-month amortization schedule for a fixed-rate, level-payment loan.
//!
//! Month 0 is the state at origination. Months 1..=N each carry one level
//! payment split into interest on the opening balance and principal. The
//! final month clears whatever residual the Decimal recurrence leaves so the
//! balance ends at exactly zero and cumulative principal equals the loan.

use log::debug;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;

use crate::amortization::sampling::yearly_sample;
use crate::amortization::summary::LoanSummary;
use crate::error::MortgageError;
use crate::time_value::{level_payment, percent_to_monthly_rate, MONTHS_PER_YEAR};
use crate::types::*;
use crate::MortgageResult;

/// Loan terms offered by a standard mortgage product menu, in years.
pub const STANDARD_TERMS_YEARS: [u32; 5] = [10, 15, 20, 25, 30];

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// The three inputs that fully determine a schedule.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoanParameters {
    /// Loan amount at origination.
    pub principal: Money,
    /// Nominal annual interest rate in percent (4.5 = 4.5%).
    pub annual_rate_percent: Percent,
    /// Term of the loan in whole years.
    pub term_years: u32,
}

impl LoanParameters {
    pub fn new(principal: Money, annual_rate_percent: Percent, term_years: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            term_years,
        }
    }

    /// Periodic (monthly) rate as a decimal.
    pub fn monthly_rate(&self) -> Rate {
        percent_to_monthly_rate(self.annual_rate_percent)
    }

    /// Number of monthly payments over the term.
    pub fn number_of_payments(&self) -> u32 {
        self.term_years.saturating_mul(MONTHS_PER_YEAR)
    }

    /// Reject parameters outside the domain of the generator. Nothing is clamped.
    pub fn validate(&self) -> MortgageResult<()> {
        if self.principal <= Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "principal".into(),
                reason: "Principal must be positive".into(),
            });
        }
        if self.annual_rate_percent < Decimal::ZERO {
            return Err(MortgageError::InvalidInput {
                field: "annual_rate_percent".into(),
                reason: "Interest rate cannot be negative".into(),
            });
        }
        if self.term_years == 0 {
            return Err(MortgageError::InvalidInput {
                field: "term_years".into(),
                reason: "Term must be at least 1 year".into(),
            });
        }
        if self.term_years.checked_mul(MONTHS_PER_YEAR).is_none() {
            return Err(MortgageError::InvalidInput {
                field: "term_years".into(),
                reason: format!("Term of {} years exceeds the supported range", self.term_years),
            });
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// A single month of the schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodRecord {
    /// Month index; 0 is the state before any payment.
    pub month: u32,
    /// Balance outstanding after this month's payment.
    pub remaining_balance: Money,
    /// Interest portion of this month's payment.
    pub interest_paid: Money,
    /// Principal portion of this month's payment.
    pub principal_paid: Money,
    /// Cumulative interest through this month.
    pub total_interest_paid: Money,
    /// Cumulative principal through this month.
    pub total_principal_paid: Money,
    /// The level payment of the schedule.
    pub monthly_payment: Money,
}

impl PeriodRecord {
    /// Whole years elapsed at this month.
    pub fn year(&self) -> u32 {
        self.month / MONTHS_PER_YEAR
    }

    /// Months past the last whole year.
    pub fn month_of_year(&self) -> u32 {
        self.month % MONTHS_PER_YEAR
    }

    /// Copy with every amount rounded to `dp` decimal places.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            month: self.month,
            remaining_balance: round_money(self.remaining_balance, dp),
            interest_paid: round_money(self.interest_paid, dp),
            principal_paid: round_money(self.principal_paid, dp),
            total_interest_paid: round_money(self.total_interest_paid, dp),
            total_principal_paid: round_money(self.total_principal_paid, dp),
            monthly_payment: round_money(self.monthly_payment, dp),
        }
    }
}

/// Full schedule, its yearly sample and the derived summary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    pub monthly_payment: Money,
    pub number_of_payments: u32,
    /// Every month from 0 to `number_of_payments`.
    pub periods: Vec<PeriodRecord>,
    /// Year boundaries plus the final month.
    pub yearly: Vec<PeriodRecord>,
    pub summary: LoanSummary,
}

impl AmortizationSchedule {
    /// Final record of the full schedule.
    pub fn last(&self) -> Option<&PeriodRecord> {
        self.periods.last()
    }

    /// Copy with every amount rounded to `dp` decimal places.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            monthly_payment: round_money(self.monthly_payment, dp),
            number_of_payments: self.number_of_payments,
            periods: self.periods.iter().map(|p| p.rounded(dp)).collect(),
            yearly: self.yearly.iter().map(|p| p.rounded(dp)).collect(),
            summary: self.summary.rounded(dp),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Generate the month-by-month amortization schedule for a fixed-rate loan.
pub fn generate_schedule(
    params: &LoanParameters,
) -> MortgageResult<ComputationOutput<AmortizationSchedule>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();

    params.validate()?;

    let monthly_rate = params.monthly_rate();
    let number_of_payments = params.number_of_payments();

    if monthly_rate.is_zero() {
        warnings.push(
            "Zero interest rate: principal is repaid in equal monthly instalments".into(),
        );
    }

    let monthly_payment = level_payment(params.principal, monthly_rate, number_of_payments)?;
    debug!(
        "amortizing {} at {} monthly over {} payments: level payment {}",
        params.principal, monthly_rate, number_of_payments, monthly_payment
    );

    let periods = build_periods(
        params.principal,
        monthly_rate,
        monthly_payment,
        number_of_payments,
    )?;
    let yearly = yearly_sample(&periods);
    let summary = LoanSummary::from_periods(params.principal, &periods)?;

    let output = AmortizationSchedule {
        monthly_payment,
        number_of_payments,
        periods,
        yearly,
        summary,
    };

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Fixed-Rate Level Payment Amortization",
        &serde_json::json!({
            "principal": params.principal.to_string(),
            "annual_rate_percent": params.annual_rate_percent.to_string(),
            "monthly_rate": monthly_rate.to_string(),
            "term_years": params.term_years,
            "number_of_payments": number_of_payments,
        }),
        warnings,
        elapsed,
        output,
    ))
}

// ---------------------------------------------------------------------------
// Recurrence
// ---------------------------------------------------------------------------

fn build_periods(
    principal: Money,
    monthly_rate: Rate,
    monthly_payment: Money,
    number_of_payments: u32,
) -> MortgageResult<Vec<PeriodRecord>> {
    let mut periods = Vec::with_capacity(number_of_payments as usize + 1);
    periods.push(PeriodRecord {
        month: 0,
        remaining_balance: principal,
        interest_paid: Decimal::ZERO,
        principal_paid: Decimal::ZERO,
        total_interest_paid: Decimal::ZERO,
        total_principal_paid: Decimal::ZERO,
        monthly_payment,
    });

    let mut balance = principal;
    let mut total_interest_paid = Decimal::ZERO;
    let mut total_principal_paid = Decimal::ZERO;

    for month in 1..=number_of_payments {
        let interest = balance * monthly_rate;
        let mut principal_part = monthly_payment - interest;

        if month == number_of_payments {
            // Terminal adjustment: retire exactly what is left of the loan
            principal_part = principal - total_principal_paid;
            balance = Decimal::ZERO;
        } else {
            balance = (balance - principal_part).max(Decimal::ZERO);
        }

        total_interest_paid =
            checked_total(total_interest_paid, interest, "cumulative interest")?;
        total_principal_paid =
            checked_total(total_principal_paid, principal_part, "cumulative principal")?;

        periods.push(PeriodRecord {
            month,
            remaining_balance: balance,
            interest_paid: interest,
            principal_paid: principal_part,
            total_interest_paid,
            total_principal_paid,
            monthly_payment,
        });
    }

    Ok(periods)
}

fn checked_total(total: Money, amount: Money, context: &str) -> MortgageResult<Money> {
    total
        .checked_add(amount)
        .ok_or_else(|| MortgageError::NumericOverflow {
            context: context.into(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn standard_30yr() -> LoanParameters {
        LoanParameters::new(dec!(300000), dec!(4.5), 30)
    }

    #[test]
    fn test_record_count_and_contiguity() {
        let result = generate_schedule(&standard_30yr()).unwrap();
        let sched = &result.result;
        assert_eq!(sched.number_of_payments, 360);
        assert_eq!(sched.periods.len(), 361);
        for (i, p) in sched.periods.iter().enumerate() {
            assert_eq!(p.month, i as u32);
        }
    }

    #[test]
    fn test_month_zero_is_origination() {
        let result = generate_schedule(&standard_30yr()).unwrap();
        let first = &result.result.periods[0];
        assert_eq!(first.remaining_balance, dec!(300000));
        assert_eq!(first.interest_paid, Decimal::ZERO);
        assert_eq!(first.principal_paid, Decimal::ZERO);
        assert_eq!(first.total_interest_paid, Decimal::ZERO);
        assert_eq!(first.total_principal_paid, Decimal::ZERO);
        assert_eq!(first.monthly_payment, result.result.monthly_payment);
    }

    #[test]
    fn test_first_month_split() {
        let result = generate_schedule(&standard_30yr()).unwrap();
        let m1 = &result.result.periods[1];
        // Interest = 300000 * 0.00375 = 1125
        assert_eq!(m1.interest_paid, dec!(1125));
        assert!((m1.principal_paid - dec!(395.06)).abs() < dec!(0.01));
        assert!((m1.remaining_balance - dec!(299604.94)).abs() < dec!(0.01));
    }

    #[test]
    fn test_terminal_balance_is_exactly_zero() {
        let result = generate_schedule(&standard_30yr()).unwrap();
        let last = result.result.last().unwrap();
        assert_eq!(last.month, 360);
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert_eq!(last.total_principal_paid, dec!(300000));
    }

    #[test]
    fn test_zero_rate_warning() {
        let result = generate_schedule(&LoanParameters::new(dec!(120000), dec!(0), 10)).unwrap();
        assert_eq!(result.warnings.len(), 1);
        assert_eq!(result.result.monthly_payment, dec!(1000));
    }

    #[test]
    fn test_zero_rate_uneven_division() {
        // 100000 / 360 does not terminate; the final month absorbs the residue
        let result = generate_schedule(&LoanParameters::new(dec!(100000), dec!(0), 30)).unwrap();
        let sched = &result.result;
        let last = sched.last().unwrap();
        assert_eq!(last.remaining_balance, Decimal::ZERO);
        assert_eq!(last.total_principal_paid, dec!(100000));
        assert_eq!(last.total_interest_paid, Decimal::ZERO);
        assert!(sched.periods.iter().all(|p| p.remaining_balance >= Decimal::ZERO));
    }

    #[test]
    fn test_invalid_principal() {
        let params = LoanParameters::new(Decimal::ZERO, dec!(4.5), 30);
        assert!(generate_schedule(&params).is_err());
        let params = LoanParameters::new(dec!(-1), dec!(4.5), 30);
        assert!(generate_schedule(&params).is_err());
    }

    #[test]
    fn test_invalid_rate() {
        let params = LoanParameters::new(dec!(100000), dec!(-0.5), 30);
        match generate_schedule(&params) {
            Err(MortgageError::InvalidInput { field, .. }) => {
                assert_eq!(field, "annual_rate_percent")
            }
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[test]
    fn test_zero_term_rejected() {
        let params = LoanParameters::new(dec!(100000), dec!(4.5), 0);
        assert!(generate_schedule(&params).is_err());
    }

    #[test]
    fn test_oversized_term_rejected() {
        let params = LoanParameters::new(dec!(100000), dec!(4.5), u32::MAX);
        assert!(params.validate().is_err());
    }

    #[test]
    fn test_running_totals_overflow_is_an_error() {
        // Payment fits in a Decimal but ~5x principal of interest does not
        let params = LoanParameters::new(dec!(70000000000000000000000000000), dec!(20), 30);
        match generate_schedule(&params) {
            Err(MortgageError::NumericOverflow { context }) => {
                assert_eq!(context, "cumulative interest")
            }
            other => panic!("expected NumericOverflow, got {other:?}"),
        }
    }

    #[test]
    fn test_year_and_month_of_year() {
        let result = generate_schedule(&LoanParameters::new(dec!(50000), dec!(5), 2)).unwrap();
        let p = &result.result.periods[14];
        assert_eq!(p.year(), 1);
        assert_eq!(p.month_of_year(), 2);
    }

    #[test]
    fn test_rounded_copy() {
        let result = generate_schedule(&standard_30yr()).unwrap();
        let rounded = result.result.rounded(2);
        assert_eq!(rounded.monthly_payment, dec!(1520.06));
        assert_eq!(rounded.periods[1].interest_paid, dec!(1125.00));
        assert_eq!(rounded.periods.len(), 361);
        assert_eq!(rounded.summary.monthly_payment, dec!(1520.06));
    }

    #[test]
    fn test_assumptions_echo_inputs() {
        let result = generate_schedule(&standard_30yr()).unwrap();
        assert_eq!(result.assumptions["term_years"], 30);
        assert_eq!(result.assumptions["number_of_payments"], 360);
        let monthly_rate: Decimal = result.assumptions["monthly_rate"]
            .as_str()
            .unwrap()
            .parse()
            .unwrap();
        assert_eq!(monthly_rate, dec!(0.00375));
    }
}
