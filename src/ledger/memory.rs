use hourglass_rs::SafeTimeProvider;
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use crate::errors::Result;
use crate::ledger::{LedgerTotals, RepaymentStore};
use crate::types::{LoanId, Repayment, RepaymentId};
use crate::validation::AcceptedRepayment;

/// in-process repayment store
///
/// One vector of committed repayments per loan behind a reader-writer
/// lock. A database-backed implementation would replace this and put the
/// append inside a serializable transaction.
#[derive(Debug, Default)]
pub struct InMemoryLedger {
    repayments: RwLock<HashMap<LoanId, Vec<Repayment>>>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }
}

impl RepaymentStore for InMemoryLedger {
    fn append(&self, accepted: AcceptedRepayment, time: &SafeTimeProvider) -> Result<Repayment> {
        let repayment = Repayment::create(
            accepted.loan_id(),
            accepted.principal_portion(),
            accepted.interest_portion(),
            accepted.entry_date(),
            time.now(),
        );

        let mut ledgers = self
            .repayments
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        ledgers
            .entry(repayment.loan_id)
            .or_default()
            .push(repayment.clone());

        Ok(repayment)
    }

    fn cumulative_totals(&self, loan_id: LoanId) -> Result<LedgerTotals> {
        let ledgers = self
            .repayments
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let totals = ledgers
            .get(&loan_id)
            .map(|committed| {
                committed
                    .iter()
                    .fold(LedgerTotals::default(), |acc, r| acc.plus(r))
            })
            .unwrap_or_default();

        Ok(totals)
    }

    fn sequence_for(&self, loan_id: LoanId) -> Result<Vec<Repayment>> {
        let ledgers = self
            .repayments
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        let mut sequence = ledgers.get(&loan_id).cloned().unwrap_or_default();
        // stable sort keeps commit order for full ties
        sequence.sort_by_key(|r| (r.entry_date, r.created_at));

        Ok(sequence)
    }

    fn find(&self, repayment_id: RepaymentId) -> Result<Option<Repayment>> {
        let ledgers = self
            .repayments
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        Ok(ledgers
            .values()
            .flatten()
            .find(|r| r.id == repayment_id)
            .cloned())
    }
}
