use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;
use rust_decimal_macros::dec;

use crate::error::MortgageError;
use crate::types::{Money, Percent, Rate};
use crate::MortgageResult;

pub const MONTHS_PER_YEAR: u32 = 12;

/// Convert a nominal annual rate quoted in percent into a monthly periodic rate.
pub fn percent_to_monthly_rate(annual_percent: Percent) -> Rate {
    annual_percent / dec!(100) / Decimal::from(MONTHS_PER_YEAR)
}

/// Level payment that fully amortises `principal` over `periods` at `rate` per period.
///
/// Standard annuity formula `P * r * (1+r)^n / ((1+r)^n - 1)`. A zero rate
/// divides the principal evenly across the periods.
pub fn level_payment(principal: Money, rate: Rate, periods: u32) -> MortgageResult<Money> {
    if periods == 0 {
        return Err(MortgageError::InvalidInput {
            field: "periods".into(),
            reason: "Number of periods must be > 0".into(),
        });
    }
    if rate < Decimal::ZERO {
        return Err(MortgageError::InvalidInput {
            field: "rate".into(),
            reason: "Periodic rate cannot be negative".into(),
        });
    }

    let n = Decimal::from(periods);
    if rate.is_zero() {
        return Ok(principal / n);
    }

    let factor = (Decimal::ONE + rate)
        .checked_powu(u64::from(periods))
        .ok_or_else(|| MortgageError::NumericOverflow {
            context: format!("compounding factor (1 + {rate})^{periods}"),
        })?;

    // Rates below Decimal resolution compound to exactly one
    let annuity_denominator = factor - Decimal::ONE;
    if annuity_denominator <= Decimal::ZERO {
        return Ok(principal / n);
    }

    principal
        .checked_mul(rate)
        .and_then(|v| v.checked_mul(factor / annuity_denominator))
        .ok_or_else(|| MortgageError::NumericOverflow {
            context: "level payment".into(),
        })
}
