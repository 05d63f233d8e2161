use crate::decimal::Money;
use crate::errors::Result;
use crate::interest;
use crate::ledger::LedgerTotals;
use crate::loans::LoanAccount;
use crate::types::{BalanceSummary, PaymentSummary, Repayment};

/// point-in-time balance view from committed totals
pub fn snapshot(loan: &LoanAccount, totals: LedgerTotals) -> Result<BalanceSummary> {
    let expected = interest::expected_interest_for(loan)?;
    Ok(balances(loan, totals, expected))
}

/// one summary per repayment, accumulating totals in canonical order
///
/// `repayments` must already be in entry-date order; summary *i* carries
/// the running totals as of and including repayment *i*, whatever each
/// row's own creation time.
pub fn project_sequence(loan: &LoanAccount, repayments: &[Repayment]) -> Result<Vec<PaymentSummary>> {
    let expected = interest::expected_interest_for(loan)?;

    let mut totals = LedgerTotals::default();
    let summaries = repayments
        .iter()
        .map(|repayment| {
            totals = totals.plus(repayment);
            summarize(repayment, loan, totals, expected)
        })
        .collect();

    Ok(summaries)
}

/// summary of one repayment given the totals as of and including it
pub fn summarize(
    repayment: &Repayment,
    loan: &LoanAccount,
    totals: LedgerTotals,
    expected: Money,
) -> PaymentSummary {
    PaymentSummary {
        repayment_id: repayment.id,
        principal_portion: repayment.principal_portion,
        interest_portion: repayment.interest_portion,
        total_payment: repayment.total_payment(),
        entry_date: repayment.entry_date,
        loan_created_at: loan.created_at,
        payment_created_at: repayment.created_at,
        balances: balances(loan, totals, expected),
    }
}

fn balances(loan: &LoanAccount, totals: LedgerTotals, expected: Money) -> BalanceSummary {
    BalanceSummary {
        outstanding_principal: loan.principal - totals.principal_paid,
        balance: (loan.principal + expected) - (totals.principal_paid + totals.interest_paid),
        total_interest_received: totals.interest_paid,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DurationPeriod, InterestRate, LoanDuration};
    use chrono::{NaiveDate, TimeZone, Utc};
    use rust_decimal_macros::dec;
    use uuid::Uuid;

    fn sample_loan() -> LoanAccount {
        LoanAccount {
            id: Uuid::new_v4(),
            principal: Money::from_major(1_000),
            issue_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            interest_rate: InterestRate::annual(dec!(10)),
            duration: Some(LoanDuration::new(1, DurationPeriod::Annual)),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        }
    }

    fn repayment(loan: &LoanAccount, principal: i64, interest: i64, day: u32) -> Repayment {
        Repayment::create(
            loan.id,
            Money::from_major(principal),
            Money::from_major(interest),
            NaiveDate::from_ymd_opt(2024, 1, day).unwrap(),
            Utc.with_ymd_and_hms(2024, 1, day, 9, 0, 0).unwrap(),
        )
    }

    #[test]
    fn test_snapshot_with_no_repayments() {
        let loan = sample_loan();
        let summary = snapshot(&loan, LedgerTotals::default()).unwrap();

        assert_eq!(summary.outstanding_principal, Money::from_major(1_000));
        assert_eq!(summary.balance, Money::from_major(1_100));
        assert_eq!(summary.total_interest_received, Money::ZERO);
    }

    #[test]
    fn test_snapshot_after_two_repayments() {
        // principal 200 + 100 repaid, interest 5 + 10 received
        let loan = sample_loan();
        let totals = LedgerTotals {
            principal_paid: Money::from_major(300),
            interest_paid: Money::from_major(15),
        };

        let summary = snapshot(&loan, totals).unwrap();
        assert_eq!(summary.outstanding_principal, Money::from_major(700));
        assert_eq!(summary.balance, Money::from_major(785));
        assert_eq!(summary.total_interest_received, Money::from_major(15));
    }

    #[test]
    fn test_sequence_carries_running_totals() {
        let loan = sample_loan();
        let first = repayment(&loan, 200, 5, 2);
        let second = repayment(&loan, 100, 10, 3);

        let summaries = project_sequence(&loan, &[first.clone(), second.clone()]).unwrap();
        assert_eq!(summaries.len(), 2);

        assert_eq!(summaries[0].repayment_id, first.id);
        assert_eq!(summaries[0].total_payment, Money::from_major(205));
        assert_eq!(
            summaries[0].balances.outstanding_principal,
            Money::from_major(800)
        );
        assert_eq!(summaries[0].balances.balance, Money::from_major(895));
        assert_eq!(
            summaries[0].balances.total_interest_received,
            Money::from_major(5)
        );

        assert_eq!(summaries[1].repayment_id, second.id);
        assert_eq!(
            summaries[1].balances.outstanding_principal,
            Money::from_major(700)
        );
        assert_eq!(summaries[1].balances.balance, Money::from_major(785));
        assert_eq!(
            summaries[1].balances.total_interest_received,
            Money::from_major(15)
        );
    }

    #[test]
    fn test_totals_follow_entry_order_not_creation_order() {
        let loan = sample_loan();
        // the day-2 payment was recorded after the day-3 one
        let mut backdated = repayment(&loan, 200, 5, 2);
        backdated.created_at = Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap();
        let earlier_record = repayment(&loan, 100, 10, 3);

        let summaries = project_sequence(&loan, &[backdated.clone(), earlier_record]).unwrap();

        // prefix sums accumulate in the slice's entry-date order
        assert_eq!(summaries[0].repayment_id, backdated.id);
        assert_eq!(
            summaries[0].balances.outstanding_principal,
            Money::from_major(800)
        );
        assert_eq!(
            summaries[1].balances.outstanding_principal,
            Money::from_major(700)
        );
    }

    #[test]
    fn test_missing_duration_fails_projection() {
        let mut loan = sample_loan();
        loan.duration = None;

        assert!(snapshot(&loan, LedgerTotals::default()).is_err());
        assert!(project_sequence(&loan, &[]).is_err());
    }

    #[test]
    fn test_summary_serializes_flat() {
        let loan = sample_loan();
        let summaries = project_sequence(&loan, &[repayment(&loan, 200, 5, 2)]).unwrap();

        let json = summaries[0].to_json_pretty().unwrap();
        // balance fields flatten into the summary object
        assert!(json.contains("\"outstanding_principal\""));
        assert!(json.contains("\"total_payment\""));
    }
}
