//! Category-limit validation for reimbursement claims.
//!
//! This is the single source of truth for claim limits. Both the request
//! boundary and the repository save path call `validate_claim`, so the two
//! paths can never enforce diverging limits.

use rust_decimal::Decimal;

use crate::claim::error::ClaimError;
use crate::claim::types::Category;

/// Validates a claim's category and amount.
///
/// # Arguments
/// * `category` - The expense category, if provided
/// * `amount` - The requested amount, if provided
///
/// # Returns
/// * `Ok(())` when both fields are present and the amount is within the
///   category ceiling
/// * `Err(ClaimError::CategoryRequired)` / `Err(ClaimError::AmountRequired)`
///   when a field is absent
/// * `Err(ClaimError::ExceedsCategoryLimit)` when `amount > limit(category)`
pub fn validate_claim(category: Option<Category>, amount: Option<Decimal>) -> Result<(), ClaimError> {
    let category = category.ok_or(ClaimError::CategoryRequired)?;
    let amount = amount.ok_or(ClaimError::AmountRequired)?;

    let limit = category.limit();
    if amount > limit {
        return Err(ClaimError::ExceedsCategoryLimit {
            category,
            amount,
            limit,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_amount_at_limit_passes() {
        assert!(validate_claim(Some(Category::Travel), Some(dec!(15000))).is_ok());
        assert!(validate_claim(Some(Category::Relocation), Some(dec!(20000))).is_ok());
        assert!(validate_claim(Some(Category::TechAssets), Some(dec!(5000))).is_ok());
    }

    #[test]
    fn test_amount_over_limit_fails() {
        let result = validate_claim(Some(Category::Travel), Some(dec!(15001)));
        assert!(matches!(
            result,
            Err(ClaimError::ExceedsCategoryLimit { .. })
        ));
    }

    #[test]
    fn test_over_limit_reports_category_and_ceiling() {
        let result = validate_claim(Some(Category::TechAssets), Some(dec!(5000.01)));
        match result {
            Err(ClaimError::ExceedsCategoryLimit {
                category,
                amount,
                limit,
            }) => {
                assert_eq!(category, Category::TechAssets);
                assert_eq!(amount, dec!(5000.01));
                assert_eq!(limit, dec!(5000));
            }
            other => panic!("expected ExceedsCategoryLimit, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_category_fails() {
        let result = validate_claim(None, Some(dec!(100)));
        assert!(matches!(result, Err(ClaimError::CategoryRequired)));
    }

    #[test]
    fn test_missing_amount_fails() {
        let result = validate_claim(Some(Category::Travel), None);
        assert!(matches!(result, Err(ClaimError::AmountRequired)));
    }

    #[test]
    fn test_fractional_amount_within_limit() {
        assert!(validate_claim(Some(Category::Travel), Some(dec!(14999.99))).is_ok());
    }
}
