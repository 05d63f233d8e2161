pub mod memory;

pub use memory::InMemoryLedger;

use hourglass_rs::SafeTimeProvider;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::Result;
use crate::types::{LoanId, Repayment, RepaymentId};
use crate::validation::AcceptedRepayment;

/// cumulative committed totals for one loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LedgerTotals {
    pub principal_paid: Money,
    pub interest_paid: Money,
}

impl LedgerTotals {
    /// totals with one more repayment folded in
    pub fn plus(&self, repayment: &Repayment) -> LedgerTotals {
        LedgerTotals {
            principal_paid: self.principal_paid + repayment.principal_portion,
            interest_paid: self.interest_paid + repayment.interest_portion,
        }
    }
}

/// append-only repayment storage for the ledger
///
/// Only validated repayments can be appended: `append` takes the token the
/// validator mints, assigns the id and `created_at`, and commits. Committed
/// rows are never mutated or deleted. `cumulative_totals` must aggregate
/// over committed rows only — it is the single source of truth validation
/// reads, so an implementation may not substitute an in-memory buffer that
/// misses other writers' commits.
pub trait RepaymentStore: Send + Sync {
    /// commit an accepted repayment, assigning its id and creation time
    fn append(&self, accepted: AcceptedRepayment, time: &SafeTimeProvider) -> Result<Repayment>;

    /// sums of principal and interest over all committed repayments
    fn cumulative_totals(&self, loan_id: LoanId) -> Result<LedgerTotals>;

    /// committed repayments in canonical order: entry date ascending,
    /// creation time breaking ties
    ///
    /// This is the accumulation order for running totals, not the display
    /// order read endpoints present.
    fn sequence_for(&self, loan_id: LoanId) -> Result<Vec<Repayment>>;

    /// look up a single committed repayment
    fn find(&self, repayment_id: RepaymentId) -> Result<Option<Repayment>>;
}
