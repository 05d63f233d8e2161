use chrono::NaiveDate;
use std::fmt;
use thiserror::Error;

use crate::decimal::Money;
use crate::types::{LoanId, RepaymentId};

/// which half of a repayment an amount check failed on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaymentPortion {
    Principal,
    Interest,
}

impl fmt::Display for PaymentPortion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PaymentPortion::Principal => write!(f, "principal"),
            PaymentPortion::Interest => write!(f, "interest"),
        }
    }
}

#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("loan not found: {loan_id}")]
    LoanNotFound { loan_id: LoanId },

    #[error("repayment not found: {repayment_id}")]
    RepaymentNotFound { repayment_id: RepaymentId },

    #[error("{portion} portion must be greater than zero, got {amount}")]
    InvalidAmount {
        portion: PaymentPortion,
        amount: Money,
    },

    #[error("entry date {entry_date} must be after loan issue date {issue_date}")]
    InvalidEntryDate {
        entry_date: NaiveDate,
        issue_date: NaiveDate,
    },

    #[error("principal portion {portion} exceeds remaining balance {remaining}")]
    PrincipalExceedsBalance { portion: Money, remaining: Money },

    #[error("interest portion {portion} exceeds expected interest {expected}")]
    InterestExceedsExpected { portion: Money, expected: Money },

    #[error("loan duration not available")]
    MissingDuration,

    #[error("principal below minimum: minimum {minimum}, provided {provided}")]
    PrincipalBelowMinimum { minimum: Money, provided: Money },

    #[error("storage failure: {message}")]
    Storage { message: String },
}

/// coarse classification for callers that map errors onto a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorClass {
    /// the referenced record does not exist
    NotFound,
    /// the request was understood and refused
    Validation,
    /// infrastructure failure with no business meaning
    Internal,
}

impl LedgerError {
    pub fn class(&self) -> ErrorClass {
        match self {
            LedgerError::LoanNotFound { .. } | LedgerError::RepaymentNotFound { .. } => {
                ErrorClass::NotFound
            }
            LedgerError::InvalidAmount { .. }
            | LedgerError::InvalidEntryDate { .. }
            | LedgerError::PrincipalExceedsBalance { .. }
            | LedgerError::InterestExceedsExpected { .. }
            | LedgerError::MissingDuration
            | LedgerError::PrincipalBelowMinimum { .. } => ErrorClass::Validation,
            LedgerError::Storage { .. } => ErrorClass::Internal,
        }
    }
}

pub type Result<T> = std::result::Result<T, LedgerError>;
