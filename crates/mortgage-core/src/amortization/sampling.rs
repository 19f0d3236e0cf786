use crate::amortization::schedule::PeriodRecord;
use crate::error::MortgageError;
use crate::time_value::MONTHS_PER_YEAR;
use crate::MortgageResult;

/// Keep every record whose month is a multiple of `interval_months`, plus the
/// final record so the end of the loan always appears in the series.
pub fn sample_every(
    periods: &[PeriodRecord],
    interval_months: u32,
) -> MortgageResult<Vec<PeriodRecord>> {
    if interval_months == 0 {
        return Err(MortgageError::InvalidInput {
            field: "interval_months".into(),
            reason: "Sampling interval must be at least 1 month".into(),
        });
    }
    Ok(sample(periods, interval_months))
}

/// One record per year boundary, plus the final month.
pub fn yearly_sample(periods: &[PeriodRecord]) -> Vec<PeriodRecord> {
    sample(periods, MONTHS_PER_YEAR)
}

fn sample(periods: &[PeriodRecord], interval_months: u32) -> Vec<PeriodRecord> {
    let final_month = match periods.last() {
        Some(p) => p.month,
        None => return Vec::new(),
    };
    periods
        .iter()
        .filter(|p| p.month % interval_months == 0 || p.month == final_month)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;

    fn records(months: u32) -> Vec<PeriodRecord> {
        (0..=months)
            .map(|month| PeriodRecord {
                month,
                remaining_balance: Decimal::from(months - month),
                interest_paid: Decimal::ZERO,
                principal_paid: Decimal::ZERO,
                total_interest_paid: Decimal::ZERO,
                total_principal_paid: Decimal::from(month),
                monthly_payment: Decimal::ONE,
            })
            .collect()
    }

    fn months_of(sample: &[PeriodRecord]) -> Vec<u32> {
        sample.iter().map(|p| p.month).collect()
    }

    #[test]
    fn test_yearly_whole_years() {
        let sample = yearly_sample(&records(36));
        assert_eq!(months_of(&sample), vec![0, 12, 24, 36]);
    }

    #[test]
    fn test_yearly_keeps_partial_final_year() {
        let sample = yearly_sample(&records(30));
        assert_eq!(months_of(&sample), vec![0, 12, 24, 30]);
    }

    #[test]
    fn test_final_month_not_duplicated() {
        let sample = yearly_sample(&records(12));
        assert_eq!(months_of(&sample), vec![0, 12]);
    }

    #[test]
    fn test_quarterly_interval() {
        let sample = sample_every(&records(12), 3).unwrap();
        assert_eq!(months_of(&sample), vec![0, 3, 6, 9, 12]);
    }

    #[test]
    fn test_monthly_interval_is_identity() {
        let full = records(24);
        let sample = sample_every(&full, 1).unwrap();
        assert_eq!(sample, full);
    }

    #[test]
    fn test_zero_interval_rejected() {
        assert!(sample_every(&records(12), 0).is_err());
    }

    #[test]
    fn test_empty_input() {
        assert!(yearly_sample(&[]).is_empty());
    }
}
