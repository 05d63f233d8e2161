use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::decimal::{Money, Rate};

/// unique identifier for a loan
pub type LoanId = Uuid;

/// unique identifier for a repayment
pub type RepaymentId = Uuid;

/// period an interest rate is quoted over
///
/// Carried for fidelity with the loan record; simple-interest estimation
/// uses only the percentage and the duration, so this field takes part in
/// no arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum RatePeriod {
    Annual,
    Monthly,
    Weekly,
    Daily,
    /// unrecognized period from an upstream record
    Other,
}

impl From<String> for RatePeriod {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Annual" => RatePeriod::Annual,
            "Monthly" => RatePeriod::Monthly,
            "Weekly" => RatePeriod::Weekly,
            "Daily" => RatePeriod::Daily,
            _ => RatePeriod::Other,
        }
    }
}

/// period a loan duration is measured in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum DurationPeriod {
    Annual,
    Monthly,
    Weekly,
    Daily,
    /// unrecognized period; the duration length is taken as already
    /// expressed in years
    Other,
}

impl From<String> for DurationPeriod {
    fn from(s: String) -> Self {
        match s.as_str() {
            "Annual" => DurationPeriod::Annual,
            "Monthly" => DurationPeriod::Monthly,
            "Weekly" => DurationPeriod::Weekly,
            "Daily" => DurationPeriod::Daily,
            _ => DurationPeriod::Other,
        }
    }
}

impl DurationPeriod {
    /// periods per year, the divisor scaling a duration length to years
    pub fn per_year(&self) -> Decimal {
        match self {
            DurationPeriod::Annual => Decimal::ONE,
            DurationPeriod::Monthly => Decimal::from(12),
            DurationPeriod::Weekly => Decimal::from(52),
            DurationPeriod::Daily => Decimal::from(365),
            DurationPeriod::Other => Decimal::ONE,
        }
    }
}

/// declared loan term, e.g. 18 months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoanDuration {
    pub length: u32,
    pub period: DurationPeriod,
}

impl LoanDuration {
    pub fn new(length: u32, period: DurationPeriod) -> Self {
        Self { length, period }
    }
}

/// interest rate quoted as a percentage over a period
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestRate {
    pub rate: Rate,
    pub period: RatePeriod,
}

impl InterestRate {
    /// annual rate from a percentage (e.g. 10 for 10% per year)
    pub fn annual(percentage: Decimal) -> Self {
        Self {
            rate: Rate::from_percentage(percentage),
            period: RatePeriod::Annual,
        }
    }
}

/// a committed repayment against a loan
///
/// Immutable once appended; the ledger never updates or deletes one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repayment {
    pub id: RepaymentId,
    pub loan_id: LoanId,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub entry_date: NaiveDate,
    pub created_at: DateTime<Utc>,
}

impl Repayment {
    /// build a repayment record, assigning a time-ordered id and the
    /// server-side creation timestamp
    pub fn create(
        loan_id: LoanId,
        principal_portion: Money,
        interest_portion: Money,
        entry_date: NaiveDate,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id: time_ordered_id(now),
            loan_id,
            principal_portion,
            interest_portion,
            entry_date,
            created_at: now,
        }
    }

    pub fn total_payment(&self) -> Money {
        self.principal_portion + self.interest_portion
    }
}

/// v7 uuid seeded from the given instant so natural id order approximates
/// creation order
fn time_ordered_id(now: DateTime<Utc>) -> Uuid {
    let ts = uuid::Timestamp::from_unix(
        uuid::NoContext,
        now.timestamp().max(0) as u64,
        now.timestamp_subsec_nanos(),
    );
    Uuid::new_v7(ts)
}

/// point-in-time view of what remains on a loan
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BalanceSummary {
    /// principal minus cumulative principal repaid
    pub outstanding_principal: Money,
    /// principal plus expected interest, minus everything repaid to date
    pub balance: Money,
    pub total_interest_received: Money,
}

impl BalanceSummary {
    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// per-repayment view: the payment itself plus the balances as of and
/// including it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentSummary {
    pub repayment_id: RepaymentId,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub total_payment: Money,
    pub entry_date: NaiveDate,
    pub loan_created_at: DateTime<Utc>,
    pub payment_created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub balances: BalanceSummary,
}

impl PaymentSummary {
    /// convert to pretty-printed json string
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn test_duration_period_divisors() {
        assert_eq!(DurationPeriod::Annual.per_year(), dec!(1));
        assert_eq!(DurationPeriod::Monthly.per_year(), dec!(12));
        assert_eq!(DurationPeriod::Weekly.per_year(), dec!(52));
        assert_eq!(DurationPeriod::Daily.per_year(), dec!(365));
        assert_eq!(DurationPeriod::Other.per_year(), dec!(1));
    }

    #[test]
    fn test_unknown_period_falls_back() {
        let period: DurationPeriod = serde_json::from_str("\"Fortnightly\"").unwrap();
        assert_eq!(period, DurationPeriod::Other);

        let rate_period: RatePeriod = serde_json::from_str("\"Quarterly\"").unwrap();
        assert_eq!(rate_period, RatePeriod::Other);
    }

    #[test]
    fn test_known_periods_deserialize() {
        let period: DurationPeriod = serde_json::from_str("\"Monthly\"").unwrap();
        assert_eq!(period, DurationPeriod::Monthly);
    }

    #[test]
    fn test_repayment_ids_are_time_ordered() {
        let loan_id = Uuid::new_v4();
        let earlier = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let later = Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 5).unwrap();

        let first = Repayment::create(
            loan_id,
            Money::from_major(100),
            Money::from_major(10),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            earlier,
        );
        let second = Repayment::create(
            loan_id,
            Money::from_major(100),
            Money::from_major(10),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            later,
        );

        assert!(first.id < second.id);
        assert_eq!(first.created_at, earlier);
    }

    #[test]
    fn test_total_payment() {
        let repayment = Repayment::create(
            Uuid::new_v4(),
            Money::from_major(200),
            Money::from_major(5),
            NaiveDate::from_ymd_opt(2024, 1, 2).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap(),
        );
        assert_eq!(repayment.total_payment(), Money::from_major(205));
    }
}
