//! Applicant attributes as entered by the advisor.
//!
//! Each control carries its own range. Widgets enforce the bounds
//! structurally; flags and JSON files do not, so `collect_input` re-checks
//! them before anything reaches the model.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::error::ScoringError;
use crate::types::Money;
use crate::ScoringResult;

pub const MIN_MONTHLY_INCOME: Money = dec!(500);
pub const MAX_MONTHLY_INCOME: Money = dec!(20000);
pub const DEFAULT_MONTHLY_INCOME: Money = dec!(2500);
pub const MONTHLY_INCOME_STEP: Money = dec!(100);

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 90;
pub const DEFAULT_AGE: u32 = 35;

pub const MIN_LOAN_AMOUNT: Money = dec!(1000);
pub const MAX_LOAN_AMOUNT: Money = dec!(100000);
pub const DEFAULT_LOAN_AMOUNT: Money = dec!(15000);
pub const LOAN_AMOUNT_STEP: Money = dec!(500);

/// Past repayment behaviour. Encoded 1 (good) / 0 (bad) for the model.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CreditHistory {
    Good,
    /// First option of the selector, hence the default.
    #[default]
    Bad,
}

impl CreditHistory {
    /// Numeric encoding used when the model was trained.
    pub fn encoded(self) -> f64 {
        match self {
            CreditHistory::Good => 1.0,
            CreditHistory::Bad => 0.0,
        }
    }

    /// Inverse of `encoded` for front ends that submit the raw option value.
    pub fn from_code(code: u8) -> ScoringResult<Self> {
        match code {
            1 => Ok(CreditHistory::Good),
            0 => Ok(CreditHistory::Bad),
            other => Err(ScoringError::InvalidInput {
                field: "credit_history".into(),
                reason: format!("Expected 0 (bad) or 1 (good), got {other}."),
            }),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            CreditHistory::Good => "Bon (Pas de défaut)",
            CreditHistory::Bad => "Mauvais (Défauts passés)",
        }
    }
}

impl std::fmt::Display for CreditHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CreditHistory::Good => write!(f, "good"),
            CreditHistory::Bad => write!(f, "bad"),
        }
    }
}

/// The four operator-adjustable controls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplicantInput {
    /// Net monthly income (EUR).
    pub monthly_income: Money,
    /// Age in whole years.
    pub age: u32,
    /// Requested loan principal (EUR).
    pub loan_amount: Money,
    #[serde(default)]
    pub credit_history: CreditHistory,
}

impl Default for ApplicantInput {
    fn default() -> Self {
        Self {
            monthly_income: DEFAULT_MONTHLY_INCOME,
            age: DEFAULT_AGE,
            loan_amount: DEFAULT_LOAN_AMOUNT,
            credit_history: CreditHistory::default(),
        }
    }
}

impl ApplicantInput {
    /// Check every control against its range.
    pub fn validate(&self) -> ScoringResult<()> {
        check_range(
            "monthly_income",
            self.monthly_income,
            MIN_MONTHLY_INCOME,
            MAX_MONTHLY_INCOME,
        )?;
        check_range(
            "age",
            Decimal::from(self.age),
            Decimal::from(MIN_AGE),
            Decimal::from(MAX_AGE),
        )?;
        check_range(
            "loan_amount",
            self.loan_amount,
            MIN_LOAN_AMOUNT,
            MAX_LOAN_AMOUNT,
        )?;
        Ok(())
    }
}

/// Read the controls into an `ApplicantInput`, rejecting anything a bounded
/// widget would not have allowed.
pub fn collect_input(
    monthly_income: Money,
    age: u32,
    loan_amount: Money,
    credit_history: CreditHistory,
) -> ScoringResult<ApplicantInput> {
    let input = ApplicantInput {
        monthly_income,
        age,
        loan_amount,
        credit_history,
    };
    input.validate()?;
    Ok(input)
}

fn check_range(field: &str, value: Decimal, min: Decimal, max: Decimal) -> ScoringResult<()> {
    if value < min || value > max {
        return Err(ScoringError::InvalidInput {
            field: field.into(),
            reason: format!("Must be between {min} and {max}, got {value}."),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_page_controls() {
        let input = ApplicantInput::default();
        assert_eq!(input.monthly_income, dec!(2500));
        assert_eq!(input.age, 35);
        assert_eq!(input.loan_amount, dec!(15000));
        assert_eq!(input.credit_history, CreditHistory::Bad);
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_bounds_are_inclusive() {
        assert!(collect_input(dec!(500), 18, dec!(1000), CreditHistory::Good).is_ok());
        assert!(collect_input(dec!(20000), 90, dec!(100000), CreditHistory::Bad).is_ok());
    }

    #[test]
    fn test_income_below_minimum_rejected() {
        let err = collect_input(dec!(499.99), 35, dec!(15000), CreditHistory::Good).unwrap_err();
        match err {
            ScoringError::InvalidInput { field, .. } => assert_eq!(field, "monthly_income"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_age_out_of_range_rejected() {
        let err = collect_input(dec!(2500), 17, dec!(15000), CreditHistory::Good).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput { ref field, .. } if field == "age"));
        assert!(collect_input(dec!(2500), 91, dec!(15000), CreditHistory::Good).is_err());
    }

    #[test]
    fn test_loan_amount_above_maximum_rejected() {
        let err =
            collect_input(dec!(2500), 35, dec!(100000.01), CreditHistory::Good).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidInput { ref field, .. } if field == "loan_amount"));
    }

    #[test]
    fn test_credit_history_encoding() {
        assert_eq!(CreditHistory::Good.encoded(), 1.0);
        assert_eq!(CreditHistory::Bad.encoded(), 0.0);
        assert_eq!(CreditHistory::from_code(1).unwrap(), CreditHistory::Good);
        assert_eq!(CreditHistory::from_code(0).unwrap(), CreditHistory::Bad);
        assert!(CreditHistory::from_code(2).is_err());
    }

    #[test]
    fn test_json_history_defaults_to_bad() {
        let input: ApplicantInput = serde_json::from_str(
            r#"{"monthly_income": "3000", "age": 40, "loan_amount": "20000"}"#,
        )
        .unwrap();
        assert_eq!(input.credit_history, CreditHistory::Bad);

        let good: ApplicantInput = serde_json::from_str(
            r#"{"monthly_income": 3000, "age": 40, "loan_amount": 20000, "credit_history": "good"}"#,
        )
        .unwrap();
        assert_eq!(good.credit_history, CreditHistory::Good);
    }
}
