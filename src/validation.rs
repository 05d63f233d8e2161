use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::config::InterestCeiling;
use crate::decimal::Money;
use crate::errors::{LedgerError, PaymentPortion, Result};
use crate::interest;
use crate::ledger::LedgerTotals;
use crate::loans::LoanAccount;
use crate::types::LoanId;

/// a proposed repayment, as submitted by a caller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentRequest {
    pub loan_id: LoanId,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub entry_date: NaiveDate,
}

/// a repayment that passed every gate
///
/// Fields are not publicly constructible; the validator is the only mint,
/// so nothing unvalidated can reach `RepaymentStore::append`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AcceptedRepayment {
    pub(crate) loan_id: LoanId,
    pub(crate) principal_portion: Money,
    pub(crate) interest_portion: Money,
    pub(crate) entry_date: NaiveDate,
}

impl AcceptedRepayment {
    pub fn loan_id(&self) -> LoanId {
        self.loan_id
    }

    pub fn principal_portion(&self) -> Money {
        self.principal_portion
    }

    pub fn interest_portion(&self) -> Money {
        self.interest_portion
    }

    pub fn entry_date(&self) -> NaiveDate {
        self.entry_date
    }
}

/// gate deciding whether a proposed repayment may be appended
///
/// Pure: checks run in a fixed order against the loan record and the
/// ledger's committed totals, short-circuit on the first failure, and
/// touch no state.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepaymentValidator {
    ceiling: InterestCeiling,
}

impl RepaymentValidator {
    pub fn new(ceiling: InterestCeiling) -> Self {
        Self { ceiling }
    }

    pub fn validate(
        &self,
        request: &RepaymentRequest,
        loan: &LoanAccount,
        committed: LedgerTotals,
    ) -> Result<AcceptedRepayment> {
        if request.principal_portion <= Money::ZERO {
            warn!(loan_id = %request.loan_id, amount = %request.principal_portion,
                "principal portion must be greater than zero");
            return Err(LedgerError::InvalidAmount {
                portion: PaymentPortion::Principal,
                amount: request.principal_portion,
            });
        }

        if request.interest_portion <= Money::ZERO {
            warn!(loan_id = %request.loan_id, amount = %request.interest_portion,
                "interest portion must be greater than zero");
            return Err(LedgerError::InvalidAmount {
                portion: PaymentPortion::Interest,
                amount: request.interest_portion,
            });
        }

        // strictly after: a payment on the issue date itself is rejected
        if request.entry_date <= loan.issue_date {
            warn!(loan_id = %request.loan_id, entry_date = %request.entry_date,
                issue_date = %loan.issue_date, "entry date not after issue date");
            return Err(LedgerError::InvalidEntryDate {
                entry_date: request.entry_date,
                issue_date: loan.issue_date,
            });
        }

        let remaining = loan.principal - committed.principal_paid;
        if request.principal_portion > remaining {
            warn!(loan_id = %request.loan_id, portion = %request.principal_portion,
                remaining = %remaining, "principal portion exceeds remaining balance");
            return Err(LedgerError::PrincipalExceedsBalance {
                portion: request.principal_portion,
                remaining,
            });
        }

        let expected = interest::expected_interest_for(loan)?;
        let allowance = match self.ceiling {
            InterestCeiling::TermTotal => expected,
            InterestCeiling::RemainingAllowance => {
                (expected - committed.interest_paid).max(Money::ZERO)
            }
        };
        if request.interest_portion > allowance {
            warn!(loan_id = %request.loan_id, portion = %request.interest_portion,
                allowance = %allowance, "interest portion exceeds expected interest");
            return Err(LedgerError::InterestExceedsExpected {
                portion: request.interest_portion,
                expected: allowance,
            });
        }

        Ok(AcceptedRepayment {
            loan_id: request.loan_id,
            principal_portion: request.principal_portion,
            interest_portion: request.interest_portion,
            entry_date: request.entry_date,
        })
    }
}
