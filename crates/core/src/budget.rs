//! Budget category set and cost estimation rules.
//!
//! The category list is closed: intake payloads and budget items may only
//! use these fifteen names. The estimation rule (hard cap wins over the
//! percentage split) is shared by the prefill mapper and the budget
//! handlers.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// Tolerance applied when checking that category percentages sum to 100.
pub const PERCENT_SUM_TOLERANCE: f64 = 1.0;

/// The closed set of budget categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BudgetCategory {
    Venue,
    Catering,
    Bar,
    Photography,
    Video,
    Florals,
    Planning,
    Music,
    Attire,
    Stationery,
    Rentals,
    Cake,
    Transportation,
    Beauty,
    Misc,
}

/// All categories in display order.
pub const ALL_CATEGORIES: &[BudgetCategory] = &[
    BudgetCategory::Venue,
    BudgetCategory::Catering,
    BudgetCategory::Bar,
    BudgetCategory::Photography,
    BudgetCategory::Video,
    BudgetCategory::Florals,
    BudgetCategory::Planning,
    BudgetCategory::Music,
    BudgetCategory::Attire,
    BudgetCategory::Stationery,
    BudgetCategory::Rentals,
    BudgetCategory::Cake,
    BudgetCategory::Transportation,
    BudgetCategory::Beauty,
    BudgetCategory::Misc,
];

impl BudgetCategory {
    /// Parse a category name as stored in the database and intake payloads.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "venue" => Ok(Self::Venue),
            "catering" => Ok(Self::Catering),
            "bar" => Ok(Self::Bar),
            "photography" => Ok(Self::Photography),
            "video" => Ok(Self::Video),
            "florals" => Ok(Self::Florals),
            "planning" => Ok(Self::Planning),
            "music" => Ok(Self::Music),
            "attire" => Ok(Self::Attire),
            "stationery" => Ok(Self::Stationery),
            "rentals" => Ok(Self::Rentals),
            "cake" => Ok(Self::Cake),
            "transportation" => Ok(Self::Transportation),
            "beauty" => Ok(Self::Beauty),
            "misc" => Ok(Self::Misc),
            _ => Err(CoreError::Validation(format!(
                "Unknown budget category '{s}'"
            ))),
        }
    }

    /// Convert to the database/payload string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Venue => "venue",
            Self::Catering => "catering",
            Self::Bar => "bar",
            Self::Photography => "photography",
            Self::Video => "video",
            Self::Florals => "florals",
            Self::Planning => "planning",
            Self::Music => "music",
            Self::Attire => "attire",
            Self::Stationery => "stationery",
            Self::Rentals => "rentals",
            Self::Cake => "cake",
            Self::Transportation => "transportation",
            Self::Beauty => "beauty",
            Self::Misc => "misc",
        }
    }
}

/// Check whether a raw category name is in the closed set.
pub fn is_valid_category(name: &str) -> bool {
    BudgetCategory::from_str_db(name).is_ok()
}

/// Estimated cost for one category line.
///
/// A hard cap, when given, wins outright; otherwise the category's share of
/// the total is `percent / 100 * total`.
pub fn estimated_cost(percent: f64, hard_cap: Option<f64>, total: f64) -> f64 {
    match hard_cap {
        Some(cap) => cap,
        None => percent / 100.0 * total,
    }
}

/// Check that a list of category percents sums to 100 within
/// [`PERCENT_SUM_TOLERANCE`].
pub fn percents_sum_to_100(percents: &[f64]) -> bool {
    let sum: f64 = percents.iter().sum();
    (sum - 100.0).abs() <= PERCENT_SUM_TOLERANCE
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip() {
        for cat in ALL_CATEGORIES {
            assert_eq!(BudgetCategory::from_str_db(cat.as_str()).unwrap(), *cat);
        }
    }

    #[test]
    fn category_count_is_fifteen() {
        assert_eq!(ALL_CATEGORIES.len(), 15);
    }

    #[test]
    fn unknown_category_rejected() {
        assert!(BudgetCategory::from_str_db("fireworks").is_err());
        assert!(BudgetCategory::from_str_db("").is_err());
        assert!(!is_valid_category("Venue")); // case sensitive
    }

    #[test]
    fn estimated_cost_from_percent() {
        assert_eq!(estimated_cost(45.0, None, 50_000.0), 22_500.0);
    }

    #[test]
    fn estimated_cost_hard_cap_wins() {
        assert_eq!(estimated_cost(45.0, Some(18_000.0), 50_000.0), 18_000.0);
    }

    #[test]
    fn percent_sum_tolerance() {
        assert!(percents_sum_to_100(&[45.0, 30.0, 25.0]));
        assert!(percents_sum_to_100(&[45.0, 30.0, 24.5])); // 99.5
        assert!(!percents_sum_to_100(&[45.0, 30.0, 9.0])); // 84
        assert!(!percents_sum_to_100(&[45.0, 30.0, 41.0])); // 116
    }
}
