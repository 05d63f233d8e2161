use serde::{Deserialize, Serialize};

/// ceiling applied to a repayment's interest portion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum InterestCeiling {
    /// each payment is checked against the whole term's expected interest;
    /// many small payments can cumulatively exceed the allowance
    #[default]
    TermTotal,
    /// each payment is checked against the expected interest minus interest
    /// already received, floored at zero
    RemainingAllowance,
}

/// tuning for the repayment operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RepaymentConfig {
    pub interest_ceiling: InterestCeiling,
    /// upper bound on repayments scanned when projecting a loan's sequence
    pub scan_limit: usize,
}

impl Default for RepaymentConfig {
    fn default() -> Self {
        Self {
            interest_ceiling: InterestCeiling::default(),
            scan_limit: 1_000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RepaymentConfig::default();
        assert_eq!(config.interest_ceiling, InterestCeiling::TermTotal);
        assert_eq!(config.scan_limit, 1_000);
    }
}
