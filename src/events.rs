use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::{LoanId, RepaymentId};

/// all events emitted by the repayment operations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// a repayment was committed to the ledger
    RepaymentReceived {
        repayment_id: RepaymentId,
        loan_id: LoanId,
        principal_portion: Money,
        interest_portion: Money,
        entry_date: NaiveDate,
        timestamp: DateTime<Utc>,
    },
    /// cumulative principal repaid reached the loan amount
    LoanSettled {
        loan_id: LoanId,
        timestamp: DateTime<Utc>,
    },
}

/// event store for collecting events during operations
#[derive(Debug, Default)]
pub struct EventStore {
    events: Vec<Event>,
}

impl EventStore {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn emit(&mut self, event: Event) {
        self.events.push(event);
    }

    pub fn take_events(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}
