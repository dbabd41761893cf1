//! The typed intake record.
//!
//! Every field on every step is optional: the wizard autosaves partial
//! drafts, and the record must tolerate any subset of data without
//! crashing. Deep access goes through the accessor methods at the bottom
//! instead of ad-hoc chaining at call sites.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A full intake record: seven optional step objects.
///
/// This is the deserialized form of the `data` JSONB column on an intake
/// row. Unknown JSON keys are ignored so older drafts keep loading after
/// schema additions.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IntakeRecord {
    pub step1: Option<CoupleContacts>,
    pub step2: Option<WeddingBasics>,
    pub step3: Option<BudgetStep>,
    pub step4: Option<CeremonyReception>,
    pub step5: Option<VendorPreferences>,
    pub step6: Option<Logistics>,
    pub step7: Option<Review>,
}

/// Step 1: who the couple is and how to reach them.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CoupleContacts {
    pub partner_a: Option<ContactInfo>,
    pub partner_b: Option<ContactInfo>,
    /// "email" | "phone" | "text"
    pub preferred_contact_method: Option<String>,
    /// Optional hired-planner contact; phone here is the loose format.
    pub planner_contact: Option<PlannerContact>,
}

/// One partner's contact block. Phone must be strict E.164.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ContactInfo {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Secondary planner contact. Phone is the loose international format.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PlannerContact {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Step 2: the wedding itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WeddingBasics {
    /// Exactly two entries when present (one per partner).
    pub partner_first_names: Option<Vec<String>>,
    /// Exactly two entries when present.
    pub partner_last_names: Option<Vec<String>>,
    pub working_title: Option<String>,
    pub wedding_date: Option<NaiveDate>,
    pub city: Option<String>,
    pub venue_name: Option<String>,
    pub guest_count_estimate: Option<i32>,
    pub style_tags: Option<Vec<String>>,
}

/// Step 3: total budget and the percentage split.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct BudgetStep {
    pub currency: Option<String>,
    pub total_budget: Option<f64>,
    pub categories: Option<Vec<BudgetCategoryInput>>,
}

/// One category line in the budget step.
///
/// `name` stays a raw string here; validation checks it against the closed
/// set in [`crate::budget::BudgetCategory`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BudgetCategoryInput {
    pub name: String,
    pub percent: f64,
    #[serde(default)]
    pub hard_cap: Option<f64>,
}

/// Step 4: ceremony and reception details.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CeremonyReception {
    pub ceremony_venue: Option<String>,
    /// "HH:MM" local time.
    pub ceremony_time: Option<String>,
    pub reception_venue: Option<String>,
    pub reception_time: Option<String>,
    /// "indoor" | "outdoor" | "mixed"
    pub setting: Option<String>,
    pub has_officiant: Option<bool>,
}

/// Step 5: which vendors matter and where to look.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct VendorPreferences {
    /// Names from [`crate::vendors::VendorCategory`].
    pub required_vendors: Option<Vec<String>>,
    pub search_radius_miles: Option<i32>,
    /// "value" | "standard" | "premium"
    pub budget_band: Option<String>,
    pub style_notes: Option<String>,
}

/// Step 6: RSVP handling, site content, and guest policies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Logistics {
    /// "site" | "email" | "paper"
    pub rsvp_preference: Option<String>,
    pub site_content: Option<SiteContentInput>,
    pub guest_prefs: Option<GuestPrefsInput>,
}

/// Wedding-site content knobs.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SiteContentInput {
    pub welcome_message: Option<String>,
    pub enable_photo_sharing: Option<bool>,
    pub show_registry: Option<bool>,
}

/// Guest-facing policies.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GuestPrefsInput {
    pub dietary_options: Option<Vec<String>>,
    pub allow_plus_ones: Option<bool>,
    pub allow_children: Option<bool>,
    pub hotel_block: Option<String>,
}

/// Step 7: review and consent.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Review {
    pub consent: Option<bool>,
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Accessors
// ---------------------------------------------------------------------------

impl IntakeRecord {
    /// Partner first names when step 2 holds exactly two non-empty entries.
    pub fn partner_first_names(&self) -> Option<(&str, &str)> {
        let names = self.step2.as_ref()?.partner_first_names.as_deref()?;
        match names {
            [a, b] if !a.trim().is_empty() && !b.trim().is_empty() => {
                Some((a.as_str(), b.as_str()))
            }
            _ => None,
        }
    }

    /// Working title, if a non-empty one was entered.
    pub fn working_title(&self) -> Option<&str> {
        non_empty(self.step2.as_ref()?.working_title.as_deref())
    }

    pub fn wedding_date(&self) -> Option<NaiveDate> {
        self.step2.as_ref()?.wedding_date
    }

    pub fn city(&self) -> Option<&str> {
        non_empty(self.step2.as_ref()?.city.as_deref())
    }

    pub fn total_budget(&self) -> Option<f64> {
        self.step3.as_ref()?.total_budget
    }

    pub fn consent(&self) -> bool {
        self.step7
            .as_ref()
            .and_then(|s| s.consent)
            .unwrap_or(false)
    }

    /// Vendor categories marked required, raw strings in input order.
    pub fn required_vendors(&self) -> &[String] {
        self.step5
            .as_ref()
            .and_then(|s| s.required_vendors.as_deref())
            .unwrap_or(&[])
    }
}

fn non_empty(s: Option<&str>) -> Option<&str> {
    s.filter(|v| !v.trim().is_empty())
}
