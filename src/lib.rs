pub mod config;
pub mod decimal;
pub mod errors;
pub mod events;
pub mod interest;
pub mod ledger;
pub mod loans;
pub mod projection;
pub mod service;
pub mod types;
pub mod validation;

// re-export key types
pub use config::{InterestCeiling, RepaymentConfig};
pub use decimal::{Money, Rate};
pub use errors::{ErrorClass, LedgerError, PaymentPortion, Result};
pub use events::{Event, EventStore};
pub use ledger::{InMemoryLedger, LedgerTotals, RepaymentStore};
pub use loans::{InMemoryLoanDirectory, LoanAccount, LoanDirectory};
pub use service::LoanRepayments;
pub use types::{
    BalanceSummary, DurationPeriod, InterestRate, LoanDuration, LoanId, PaymentSummary,
    RatePeriod, Repayment, RepaymentId,
};
pub use validation::{AcceptedRepayment, RepaymentRequest, RepaymentValidator};

// re-export external dependencies that users will need
pub use chrono;
pub use hourglass_rs::{SafeTimeProvider, TimeSource};
pub use rust_decimal::Decimal;
pub use uuid::Uuid;
