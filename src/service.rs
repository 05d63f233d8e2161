use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use hourglass_rs::SafeTimeProvider;
use tracing::{info, instrument, warn};

use crate::config::RepaymentConfig;
use crate::errors::{LedgerError, Result};
use crate::events::{Event, EventStore};
use crate::interest;
use crate::ledger::RepaymentStore;
use crate::loans::{LoanAccount, LoanDirectory};
use crate::projection;
use crate::types::{BalanceSummary, LoanId, PaymentSummary, Repayment, RepaymentId};
use crate::validation::{RepaymentRequest, RepaymentValidator};

/// the repayment operations over a loan directory and a repayment store
///
/// Stateless per request apart from the shared ledger; safe to call from
/// concurrent handlers. Appends for one loan are serialized so validation
/// always sees the totals it commits against; reads take no such lock and
/// may observe a slightly stale ledger.
pub struct LoanRepayments<D, S> {
    directory: D,
    store: S,
    validator: RepaymentValidator,
    config: RepaymentConfig,
    events: Mutex<EventStore>,
    append_locks: Mutex<HashMap<LoanId, Arc<Mutex<()>>>>,
}

impl<D, S> LoanRepayments<D, S>
where
    D: LoanDirectory,
    S: RepaymentStore,
{
    pub fn new(directory: D, store: S) -> Self {
        Self::with_config(directory, store, RepaymentConfig::default())
    }

    pub fn with_config(directory: D, store: S, config: RepaymentConfig) -> Self {
        Self {
            directory,
            store,
            validator: RepaymentValidator::new(config.interest_ceiling),
            config,
            events: Mutex::new(EventStore::new()),
            append_locks: Mutex::new(HashMap::new()),
        }
    }

    /// validate and commit a repayment, returning its summary with the
    /// totals as of and including it
    #[instrument(skip(self, request, time), fields(loan_id = %request.loan_id))]
    pub fn add_repayment(
        &self,
        request: RepaymentRequest,
        time: &SafeTimeProvider,
    ) -> Result<PaymentSummary> {
        let loan = self.require_loan(request.loan_id)?;

        // exclusive section per loan: the totals read here are exactly the
        // totals the append lands on, whatever other writers are doing
        let lock = self.append_lock(request.loan_id);
        let guard = lock.lock().unwrap_or_else(PoisonError::into_inner);

        let committed = self.store.cumulative_totals(request.loan_id)?;
        let accepted = self.validator.validate(&request, &loan, committed)?;
        let repayment = self.store.append(accepted, time)?;
        let totals = committed.plus(&repayment);

        drop(guard);

        info!(repayment_id = %repayment.id, loan_id = %repayment.loan_id,
            "repayment committed");
        self.record_events(&loan, &repayment, totals.principal_paid == loan.principal);

        let expected = interest::expected_interest_for(&loan)?;
        Ok(projection::summarize(&repayment, &loan, totals, expected))
    }

    /// all repayment summaries for a loan, most recently recorded first
    #[instrument(skip(self))]
    pub fn list_repayments(&self, loan_id: LoanId) -> Result<Vec<PaymentSummary>> {
        let loan = self.require_loan(loan_id)?;
        let sequence = self.capped_sequence(loan_id)?;

        let mut summaries = projection::project_sequence(&loan, &sequence)?;
        // display order is newest record first; the running totals inside
        // each summary were accumulated in entry-date order
        summaries.sort_by(|a, b| b.payment_created_at.cmp(&a.payment_created_at));

        Ok(summaries)
    }

    /// summary of a single repayment, with the running totals as of and
    /// including it
    #[instrument(skip(self))]
    pub fn repayment(&self, repayment_id: RepaymentId) -> Result<PaymentSummary> {
        let target = self
            .store
            .find(repayment_id)?
            .ok_or(LedgerError::RepaymentNotFound { repayment_id })?;
        let loan = self.require_loan(target.loan_id)?;

        let sequence = self.capped_sequence(target.loan_id)?;
        projection::project_sequence(&loan, &sequence)?
            .into_iter()
            .find(|summary| summary.repayment_id == repayment_id)
            .ok_or(LedgerError::RepaymentNotFound { repayment_id })
    }

    /// current balance snapshot for a loan
    #[instrument(skip(self))]
    pub fn loan_balance(&self, loan_id: LoanId) -> Result<BalanceSummary> {
        let loan = self.require_loan(loan_id)?;
        let totals = self.store.cumulative_totals(loan_id)?;
        projection::snapshot(&loan, totals)
    }

    /// drain events collected since the last call
    pub fn take_events(&self) -> Vec<Event> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take_events()
    }

    fn require_loan(&self, loan_id: LoanId) -> Result<LoanAccount> {
        self.directory.loan(loan_id)?.ok_or_else(|| {
            warn!(loan_id = %loan_id, "loan not found");
            LedgerError::LoanNotFound { loan_id }
        })
    }

    fn append_lock(&self, loan_id: LoanId) -> Arc<Mutex<()>> {
        let mut locks = self
            .append_locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        locks.entry(loan_id).or_default().clone()
    }

    fn capped_sequence(&self, loan_id: LoanId) -> Result<Vec<Repayment>> {
        let mut sequence = self.store.sequence_for(loan_id)?;
        if sequence.len() > self.config.scan_limit {
            warn!(loan_id = %loan_id, scanned = sequence.len(),
                limit = self.config.scan_limit, "sequence truncated at scan limit");
            sequence.truncate(self.config.scan_limit);
        }
        Ok(sequence)
    }

    fn record_events(&self, loan: &LoanAccount, repayment: &Repayment, settled: bool) {
        let mut events = self.events.lock().unwrap_or_else(PoisonError::into_inner);
        events.emit(Event::RepaymentReceived {
            repayment_id: repayment.id,
            loan_id: repayment.loan_id,
            principal_portion: repayment.principal_portion,
            interest_portion: repayment.interest_portion,
            entry_date: repayment.entry_date,
            timestamp: repayment.created_at,
        });
        if settled {
            events.emit(Event::LoanSettled {
                loan_id: loan.id,
                timestamp: repayment.created_at,
            });
        }
    }
}
