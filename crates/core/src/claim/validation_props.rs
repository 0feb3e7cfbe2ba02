//! Property-based tests for claim validation.
//!
//! Validates that `validate_claim` fails exactly when a field is absent
//! or the amount exceeds the category ceiling, for every category.

use proptest::prelude::*;
use rust_decimal::Decimal;

use crate::claim::error::ClaimError;
use crate::claim::types::Category;
use crate::claim::validation::validate_claim;

/// Strategy for generating random categories.
fn arb_category() -> impl Strategy<Value = Category> {
    prop_oneof![
        Just(Category::Travel),
        Just(Category::Relocation),
        Just(Category::TechAssets),
    ]
}

/// Strategy for generating amounts with two decimal places.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (0i64..5_000_000i64).prop_map(|n| Decimal::new(n, 2))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// validate_claim(C, A) succeeds iff A <= limit(C).
    #[test]
    fn prop_passes_iff_within_limit(category in arb_category(), amount in arb_amount()) {
        let result = validate_claim(Some(category), Some(amount));
        if amount <= category.limit() {
            prop_assert!(result.is_ok());
        } else {
            prop_assert!(
                matches!(result, Err(ClaimError::ExceedsCategoryLimit { .. })),
                "expected ExceedsCategoryLimit, got {:?}",
                result
            );
        }
    }

    /// A missing amount always fails, regardless of category.
    #[test]
    fn prop_missing_amount_fails(category in arb_category()) {
        prop_assert!(matches!(
            validate_claim(Some(category), None),
            Err(ClaimError::AmountRequired)
        ));
    }

    /// A missing category always fails, regardless of amount.
    #[test]
    fn prop_missing_category_fails(amount in arb_amount()) {
        prop_assert!(matches!(
            validate_claim(None, Some(amount)),
            Err(ClaimError::CategoryRequired)
        ));
    }

    /// The reported limit in the error always matches the category ceiling.
    #[test]
    fn prop_error_reports_correct_limit(category in arb_category()) {
        let over = category.limit() + Decimal::new(1, 2);
        match validate_claim(Some(category), Some(over)) {
            Err(ClaimError::ExceedsCategoryLimit { limit, .. }) => {
                prop_assert_eq!(limit, category.limit());
            }
            other => prop_assert!(false, "expected ExceedsCategoryLimit, got {:?}", other),
        }
    }
}
