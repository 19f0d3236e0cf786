use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::amortization::schedule::PeriodRecord;
use crate::error::MortgageError;
use crate::types::{round_money, Money};
use crate::MortgageResult;

/// Headline figures of a schedule.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanSummary {
    pub monthly_payment: Money,
    /// Interest paid over the life of the loan.
    pub total_interest: Money,
    /// Principal retired over the life of the loan.
    pub total_principal: Money,
    /// Principal plus total interest.
    pub total_paid: Money,
    pub number_of_payments: u32,
}

impl LoanSummary {
    /// Derive the summary from a full schedule ending at the final payment.
    pub fn from_periods(principal: Money, periods: &[PeriodRecord]) -> MortgageResult<Self> {
        let last = periods.last().ok_or_else(|| {
            MortgageError::InsufficientData("Summary requires at least one period".into())
        })?;

        let total_paid = principal.checked_add(last.total_interest_paid).ok_or_else(|| {
            MortgageError::NumericOverflow {
                context: "total paid".into(),
            }
        })?;

        Ok(Self {
            monthly_payment: last.monthly_payment,
            total_interest: last.total_interest_paid,
            total_principal: last.total_principal_paid,
            total_paid,
            number_of_payments: last.month,
        })
    }

    /// Copy with every amount rounded to `dp` decimal places.
    pub fn rounded(&self, dp: u32) -> Self {
        Self {
            monthly_payment: round_money(self.monthly_payment, dp),
            total_interest: round_money(self.total_interest, dp),
            total_principal: round_money(self.total_principal, dp),
            total_paid: round_money(self.total_paid, dp),
            number_of_payments: self.number_of_payments,
        }
    }

    /// Interest as a share of everything paid.
    pub fn interest_share(&self) -> Decimal {
        if self.total_paid.is_zero() {
            return Decimal::ZERO;
        }
        self.total_interest / self.total_paid
    }
}
