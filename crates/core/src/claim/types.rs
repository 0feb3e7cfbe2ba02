//! Claim domain types for the reimbursement lifecycle.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Expense category of a reimbursement claim.
///
/// Each category carries a fixed reimbursement ceiling; a claim whose
/// amount exceeds the ceiling for its category is rejected at validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Travel expenses, capped at 15000.
    Travel,
    /// Relocation expenses, capped at 20000.
    Relocation,
    /// Tech asset purchases, capped at 5000.
    TechAssets,
}

impl Category {
    /// Returns the reimbursement ceiling for this category.
    #[must_use]
    pub fn limit(&self) -> Decimal {
        match self {
            Self::Travel => Decimal::new(15_000, 0),
            Self::Relocation => Decimal::new(20_000, 0),
            Self::TechAssets => Decimal::new(5_000, 0),
        }
    }

    /// Returns the string representation of the category.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Travel => "travel",
            Self::Relocation => "relocation",
            Self::TechAssets => "tech_assets",
        }
    }

    /// Returns the human-readable label for this category.
    #[must_use]
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Travel => "Travelling",
            Self::Relocation => "Re-location",
            Self::TechAssets => "Tech Assets",
        }
    }

    /// Parses a category from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "travel" => Some(Self::Travel),
            "relocation" => Some(Self::Relocation),
            "tech_assets" => Some(Self::TechAssets),
            _ => None,
        }
    }

    /// All categories, for iteration in validation tests and forms.
    pub const ALL: [Self; 3] = [Self::Travel, Self::Relocation, Self::TechAssets];
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Claim status in the approval lifecycle.
///
/// The only valid transitions are:
/// - Pending → Approved (approve)
/// - Pending → Declined (decline)
///
/// Both `Approved` and `Declined` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClaimStatus {
    /// Claim has been submitted and awaits a decision.
    Pending,
    /// Claim has been approved (terminal).
    Approved,
    /// Claim has been declined (terminal).
    Declined,
}

impl ClaimStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Declined => "declined",
        }
    }

    /// Parses a status from a string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "pending" => Some(Self::Pending),
            "approved" => Some(Self::Approved),
            "declined" => Some(Self::Declined),
            _ => None,
        }
    }

    /// Returns true if no further transition is allowed out of this status.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Approved | Self::Declined)
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated decision on a pending claim.
///
/// Captures the resulting status and the audit trail information
/// (who decided, when, and with which comments).
#[derive(Debug, Clone)]
pub struct ClaimDecision {
    /// The new status after the decision.
    pub new_status: ClaimStatus,
    /// The user who decided the claim.
    pub decided_by: Uuid,
    /// When the decision was made.
    pub decided_at: DateTime<Utc>,
    /// Comments from the approver.
    pub comments: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_category_limits() {
        assert_eq!(Category::Travel.limit(), dec!(15000));
        assert_eq!(Category::Relocation.limit(), dec!(20000));
        assert_eq!(Category::TechAssets.limit(), dec!(5000));
    }

    #[test]
    fn test_category_from_str() {
        assert_eq!(Category::parse("travel"), Some(Category::Travel));
        assert_eq!(Category::parse("RELOCATION"), Some(Category::Relocation));
        assert_eq!(Category::parse("tech_assets"), Some(Category::TechAssets));
        assert_eq!(Category::parse("groceries"), None);
    }

    #[test]
    fn test_category_display_name() {
        assert_eq!(Category::Travel.display_name(), "Travelling");
        assert_eq!(Category::Relocation.display_name(), "Re-location");
        assert_eq!(Category::TechAssets.display_name(), "Tech Assets");
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            ClaimStatus::Pending,
            ClaimStatus::Approved,
            ClaimStatus::Declined,
        ] {
            assert_eq!(ClaimStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(ClaimStatus::parse("voided"), None);
    }

    #[test]
    fn test_status_terminal() {
        assert!(!ClaimStatus::Pending.is_terminal());
        assert!(ClaimStatus::Approved.is_terminal());
        assert!(ClaimStatus::Declined.is_terminal());
    }

    #[test]
    fn test_status_display() {
        assert_eq!(format!("{}", ClaimStatus::Pending), "pending");
        assert_eq!(format!("{}", ClaimStatus::Declined), "declined");
    }
}
