use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::decimal::Money;
use crate::errors::{LedgerError, Result};
use crate::types::{InterestRate, LoanDuration, LoanId};

/// minimum loan principal in minor currency units, a rule owned by the
/// loan directory at creation time
pub const MIN_PRINCIPAL_MINOR: i64 = 100_000;

/// a loan as read from the directory
///
/// Read-only to the repayment core; the directory owns its lifecycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanAccount {
    pub id: LoanId,
    pub principal: Money,
    pub issue_date: NaiveDate,
    pub interest_rate: InterestRate,
    pub duration: Option<LoanDuration>,
    pub created_at: DateTime<Utc>,
}

/// lookup boundary to the loan directory collaborator
///
/// `Ok(None)` means the directory has no such loan; `Err` is an
/// infrastructure failure reaching the directory.
pub trait LoanDirectory: Send + Sync {
    fn loan(&self, loan_id: LoanId) -> Result<Option<LoanAccount>>;
}

/// in-process stand-in for the loan directory
#[derive(Debug, Default)]
pub struct InMemoryLoanDirectory {
    loans: RwLock<HashMap<LoanId, LoanAccount>>,
}

impl InMemoryLoanDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    /// register a loan, enforcing the directory's minimum-principal rule
    pub fn insert(&self, loan: LoanAccount) -> Result<()> {
        let minimum = Money::from_minor(MIN_PRINCIPAL_MINOR, 2);
        if loan.principal < minimum {
            return Err(LedgerError::PrincipalBelowMinimum {
                minimum,
                provided: loan.principal,
            });
        }

        self.loans
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(loan.id, loan);
        Ok(())
    }
}

impl LoanDirectory for InMemoryLoanDirectory {
    fn loan(&self, loan_id: LoanId) -> Result<Option<LoanAccount>> {
        Ok(self
            .loans
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&loan_id)
            .cloned())
    }
}
