//! Model feature vector.
//!
//! The classifier was trained on exactly five columns in this order:
//! `monthly_income, age, loan_amount, credit_history, debt_ratio`.
//! Nothing downstream checks the order, so it is fixed here once.

use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};

use crate::applicant::ApplicantInput;

/// Number of columns the model expects.
pub const FEATURE_COUNT: usize = 5;

/// Column names in training order.
pub const FEATURE_NAMES: [&str; FEATURE_COUNT] = [
    "monthly_income",
    "age",
    "loan_amount",
    "credit_history",
    "debt_ratio",
];

const MONTHS_PER_YEAR: f64 = 12.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    pub monthly_income: f64,
    pub age: f64,
    pub loan_amount: f64,
    /// 1 = good, 0 = bad.
    pub credit_history: f64,
    /// Loan amount relative to annual income.
    pub debt_ratio: f64,
}

impl FeatureVector {
    /// Raw values in training order.
    pub fn to_array(&self) -> [f64; FEATURE_COUNT] {
        [
            self.monthly_income,
            self.age,
            self.loan_amount,
            self.credit_history,
            self.debt_ratio,
        ]
    }
}

/// Loan amount over annual income.
///
/// Computed in `f64`, the arithmetic the training pipeline used, so values
/// that land on a split threshold fall on the same side.
///
/// Callers must pass a validated income (see [`ApplicantInput::validate`]).
/// A zero income yields `0.0`, not an infinity.
pub fn debt_ratio(monthly_income: f64, loan_amount: f64) -> f64 {
    let annual_income = monthly_income * MONTHS_PER_YEAR;
    if annual_income == 0.0 {
        return 0.0;
    }
    loan_amount / annual_income
}

/// Derive the model's feature vector from the advisor's inputs.
pub fn compute_features(input: &ApplicantInput) -> FeatureVector {
    let monthly_income = input.monthly_income.to_f64().unwrap_or_default();
    let loan_amount = input.loan_amount.to_f64().unwrap_or_default();
    FeatureVector {
        monthly_income,
        age: f64::from(input.age),
        loan_amount,
        credit_history: input.credit_history.encoded(),
        debt_ratio: debt_ratio(monthly_income, loan_amount),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::applicant::CreditHistory;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn applicant(income: Decimal, age: u32, amount: Decimal, history: CreditHistory) -> ApplicantInput {
        ApplicantInput {
            monthly_income: income,
            age,
            loan_amount: amount,
            credit_history: history,
        }
    }

    #[test]
    fn test_reference_applicant_debt_ratio() {
        let input = applicant(dec!(2500), 35, dec!(15000), CreditHistory::Good);
        let fv = compute_features(&input);
        assert_eq!(fv.debt_ratio, 0.5);
    }

    #[test]
    fn test_feature_order_is_training_order() {
        let input = applicant(dec!(2500), 35, dec!(15000), CreditHistory::Good);
        let fv = compute_features(&input);
        assert_eq!(fv.to_array(), [2500.0, 35.0, 15000.0, 1.0, 0.5]);
        assert_eq!(FEATURE_NAMES[3], "credit_history");
        assert_eq!(FEATURE_NAMES[4], "debt_ratio");
    }

    #[test]
    fn test_debt_ratio_finite_across_bounds() {
        let corners = [
            (dec!(500), dec!(1000)),
            (dec!(500), dec!(100000)),
            (dec!(20000), dec!(1000)),
            (dec!(20000), dec!(100000)),
        ];
        for (income, amount) in corners {
            let fv = compute_features(&applicant(income, 18, amount, CreditHistory::Bad));
            assert!(fv.debt_ratio.is_finite());
            assert!(fv.debt_ratio >= 0.0);
        }
        // Worst case: 100000 / (500 * 12)
        let worst = applicant(dec!(500), 18, dec!(100000), CreditHistory::Bad);
        let fv = compute_features(&worst);
        assert!((fv.debt_ratio - 100000.0 / 6000.0).abs() < 1e-12);
    }

    #[test]
    fn test_debt_ratio_zero_income_is_zero() {
        assert_eq!(debt_ratio(0.0, 15000.0), 0.0);
    }

    #[test]
    fn test_bad_history_encoded_as_zero() {
        let fv = compute_features(&applicant(dec!(3000), 50, dec!(5000), CreditHistory::Bad));
        assert_eq!(fv.credit_history, 0.0);
    }

    #[test]
    fn test_compute_features_is_deterministic() {
        let input = applicant(dec!(4200), 61, dec!(37500), CreditHistory::Good);
        assert_eq!(compute_features(&input), compute_features(&input));
    }
}
