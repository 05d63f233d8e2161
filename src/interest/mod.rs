pub mod duration;

pub use duration::years_of;

use crate::decimal::{Money, Rate};
use crate::errors::Result;
use crate::loans::LoanAccount;
use crate::types::LoanDuration;

/// total interest expected over the loan's full declared term
///
/// Simple, non-compounding interest: principal × rate × years. Independent
/// of elapsed time and of any repayments already made — this is a
/// term-level allowance, not a remaining one.
pub fn expected_interest(
    principal: Money,
    rate: Rate,
    duration: Option<&LoanDuration>,
) -> Result<Money> {
    let years = years_of(duration)?;
    Ok(Money::from_decimal(
        principal.as_decimal() * rate.as_decimal() * years,
    ))
}

/// term allowance for a loan record
pub fn expected_interest_for(loan: &LoanAccount) -> Result<Money> {
    expected_interest(
        loan.principal,
        loan.interest_rate.rate,
        loan.duration.as_ref(),
    )
}
