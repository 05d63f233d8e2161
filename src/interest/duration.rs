use rust_decimal::Decimal;

use crate::errors::{LedgerError, Result};
use crate::types::LoanDuration;

/// convert a declared loan term into a fraction of a year
///
/// An absent duration is a hard error, never zero: a silently-zero term
/// would zero the expected interest and wave through unlimited interest
/// payments.
pub fn years_of(duration: Option<&LoanDuration>) -> Result<Decimal> {
    let duration = duration.ok_or(LedgerError::MissingDuration)?;
    Ok(Decimal::from(duration.length) / duration.period.per_year())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::DurationPeriod;
    use rust_decimal_macros::dec;

    #[test]
    fn test_conversion_table() {
        let cases = [
            (DurationPeriod::Annual, 2, dec!(2)),
            (DurationPeriod::Monthly, 18, dec!(1.5)),
            (DurationPeriod::Weekly, 26, dec!(0.5)),
            (DurationPeriod::Daily, 365, dec!(1)),
            (DurationPeriod::Other, 3, dec!(3)),
        ];

        for (period, length, expected) in cases {
            let duration = LoanDuration::new(length, period);
            assert_eq!(years_of(Some(&duration)).unwrap(), expected);
        }
    }

    #[test]
    fn test_weekly_fraction() {
        let duration = LoanDuration::new(13, DurationPeriod::Weekly);
        assert_eq!(years_of(Some(&duration)).unwrap(), dec!(0.25));
    }

    #[test]
    fn test_missing_duration_is_an_error() {
        let err = years_of(None).unwrap_err();
        assert!(matches!(err, LedgerError::MissingDuration));
    }
}
