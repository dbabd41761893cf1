//! Vendor categories and booking lead times.
//!
//! `required_vendors` in the intake's vendor-preferences step draws from
//! this closed set. Each category carries the lead time (months before the
//! wedding) used when the prefill mapper seeds its booking task.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The closed set of vendor categories, in seeding order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VendorCategory {
    Photographer,
    Videographer,
    Caterer,
    Musician,
    Florist,
    Officiant,
    Baker,
    Stationer,
    Transportation,
    Beauty,
}

/// All categories in the fixed order conditional timeline tasks are
/// emitted in.
pub const ALL_VENDOR_CATEGORIES: &[VendorCategory] = &[
    VendorCategory::Photographer,
    VendorCategory::Videographer,
    VendorCategory::Caterer,
    VendorCategory::Musician,
    VendorCategory::Florist,
    VendorCategory::Officiant,
    VendorCategory::Baker,
    VendorCategory::Stationer,
    VendorCategory::Transportation,
    VendorCategory::Beauty,
];

impl VendorCategory {
    /// Parse a category name as stored in intake payloads and vendor rows.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "photographer" => Ok(Self::Photographer),
            "videographer" => Ok(Self::Videographer),
            "caterer" => Ok(Self::Caterer),
            "musician" => Ok(Self::Musician),
            "florist" => Ok(Self::Florist),
            "officiant" => Ok(Self::Officiant),
            "baker" => Ok(Self::Baker),
            "stationer" => Ok(Self::Stationer),
            "transportation" => Ok(Self::Transportation),
            "beauty" => Ok(Self::Beauty),
            _ => Err(CoreError::Validation(format!(
                "Unknown vendor category '{s}'"
            ))),
        }
    }

    /// Convert to the database/payload string form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Photographer => "photographer",
            Self::Videographer => "videographer",
            Self::Caterer => "caterer",
            Self::Musician => "musician",
            Self::Florist => "florist",
            Self::Officiant => "officiant",
            Self::Baker => "baker",
            Self::Stationer => "stationer",
            Self::Transportation => "transportation",
            Self::Beauty => "beauty",
        }
    }

    /// Human-readable noun used in seeded task titles ("Book photographer").
    pub fn label(&self) -> &'static str {
        match self {
            Self::Photographer => "photographer",
            Self::Videographer => "videographer",
            Self::Caterer => "caterer",
            Self::Musician => "musician or DJ",
            Self::Florist => "florist",
            Self::Officiant => "officiant",
            Self::Baker => "cake baker",
            Self::Stationer => "stationer",
            Self::Transportation => "transportation",
            Self::Beauty => "hair and makeup",
        }
    }

    /// Months before the wedding when booking this vendor should be done.
    pub fn booking_lead_months(&self) -> f64 {
        match self {
            Self::Photographer => 10.0,
            Self::Videographer => 10.0,
            Self::Caterer => 9.0,
            Self::Musician => 8.0,
            Self::Florist => 6.0,
            Self::Officiant => 6.0,
            Self::Baker => 5.0,
            Self::Stationer => 4.0,
            Self::Transportation => 3.0,
            Self::Beauty => 3.0,
        }
    }
}

/// Check whether a raw category name is in the closed set.
pub fn is_valid_vendor_category(name: &str) -> bool {
    VendorCategory::from_str_db(name).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_roundtrip() {
        for cat in ALL_VENDOR_CATEGORIES {
            assert_eq!(VendorCategory::from_str_db(cat.as_str()).unwrap(), *cat);
        }
    }

    #[test]
    fn unknown_category_rejected() {
        assert!(VendorCategory::from_str_db("astrologer").is_err());
    }

    #[test]
    fn lead_months_are_positive_and_bounded() {
        for cat in ALL_VENDOR_CATEGORIES {
            let m = cat.booking_lead_months();
            assert!(m > 0.0 && m <= 12.0, "{} lead {m}", cat.as_str());
        }
    }

    #[test]
    fn photographer_lead_is_ten_months() {
        assert_eq!(VendorCategory::Photographer.booking_lead_months(), 10.0);
    }
}
