//! Draft and complete validation for intake step payloads.
//!
//! Validation never fails with an `Err` and never panics: the outcome is
//! always a [`StepValidation`] value listing field-path issues. The draft
//! path (autosave) checks only the shape of values actually present; the
//! complete path (submit) additionally enforces required fields.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use validator::ValidateEmail;

use crate::budget;
use crate::intake::record::{
    BudgetStep, CeremonyReception, ContactInfo, CoupleContacts, IntakeRecord, Logistics,
    Review, VendorPreferences, WeddingBasics,
};
use crate::intake::steps::IntakeStep;
use crate::vendors;

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

/// Whether required fields are enforced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationMode {
    /// Autosave path: every field optional, only present values checked.
    Draft,
    /// Submit path: required fields per step enforced.
    Complete,
}

/// A single field-level problem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldIssue {
    /// Dotted path relative to the step payload (e.g. `categories[1].percent`),
    /// or prefixed with `stepN.` when produced by [`validate_record`].
    pub path: String,
    pub message: String,
}

/// Outcome of validating one step payload.
#[derive(Debug, Clone, Serialize)]
pub struct StepValidation {
    pub is_valid: bool,
    pub issues: Vec<FieldIssue>,
}

impl StepValidation {
    fn from_issues(issues: Vec<FieldIssue>) -> Self {
        Self {
            is_valid: issues.is_empty(),
            issues,
        }
    }
}

fn push(issues: &mut Vec<FieldIssue>, path: impl Into<String>, message: impl Into<String>) {
    issues.push(FieldIssue {
        path: path.into(),
        message: message.into(),
    });
}

// ---------------------------------------------------------------------------
// Field format rules
// ---------------------------------------------------------------------------

/// Strict E.164: `+`, first digit 1-9, at most 15 digits total.
static E164_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\+[1-9]\d{0,14}$").unwrap());

/// Loose international phone: optional `+`, then 10 or more digits and
/// common separators.
static LOOSE_PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[0-9 ().\-]{10,}$").unwrap());

/// 24-hour wall-clock time, `HH:MM`.
static TIME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap());

fn check_email(issues: &mut Vec<FieldIssue>, path: String, value: &str) {
    if !value.validate_email() {
        push(issues, path, format!("'{value}' is not a valid email address"));
    }
}

fn check_e164_phone(issues: &mut Vec<FieldIssue>, path: String, value: &str) {
    if !E164_RE.is_match(value) {
        push(
            issues,
            path,
            format!("'{value}' is not a valid E.164 phone number (+ followed by 1-15 digits)"),
        );
    }
}

fn check_loose_phone(issues: &mut Vec<FieldIssue>, path: String, value: &str) {
    if !LOOSE_PHONE_RE.is_match(value) {
        push(
            issues,
            path,
            format!("'{value}' is not a valid phone number"),
        );
    }
}

fn check_one_of(issues: &mut Vec<FieldIssue>, path: String, value: &str, allowed: &[&str]) {
    if !allowed.contains(&value) {
        push(
            issues,
            path,
            format!("'{value}' must be one of: {}", allowed.join(", ")),
        );
    }
}

fn check_time(issues: &mut Vec<FieldIssue>, path: String, value: &str) {
    if !TIME_RE.is_match(value) {
        push(issues, path, format!("'{value}' is not a valid HH:MM time"));
    }
}

// ---------------------------------------------------------------------------
// Entry points
// ---------------------------------------------------------------------------

/// Validate one step's raw payload.
///
/// A payload that fails to deserialize (wrong shape, wrong types) yields a
/// single issue at the offending location rather than an error return.
pub fn validate_step(
    step: IntakeStep,
    payload: &serde_json::Value,
    mode: ValidationMode,
) -> StepValidation {
    let mut issues = Vec::new();
    match step {
        IntakeStep::CoupleContacts => {
            if let Some(s) = deserialize_step::<CoupleContacts>(payload, &mut issues) {
                check_couple_contacts(&s, "", &mut issues);
            }
        }
        IntakeStep::WeddingBasics => {
            if let Some(s) = deserialize_step::<WeddingBasics>(payload, &mut issues) {
                check_wedding_basics(&s, mode, "", &mut issues);
            }
        }
        IntakeStep::Budget => {
            if let Some(s) = deserialize_step::<BudgetStep>(payload, &mut issues) {
                check_budget(&s, mode, "", &mut issues);
            }
        }
        IntakeStep::CeremonyReception => {
            if let Some(s) = deserialize_step::<CeremonyReception>(payload, &mut issues) {
                check_ceremony_reception(&s, "", &mut issues);
            }
        }
        IntakeStep::VendorPreferences => {
            if let Some(s) = deserialize_step::<VendorPreferences>(payload, &mut issues) {
                check_vendor_preferences(&s, "", &mut issues);
            }
        }
        IntakeStep::Logistics => {
            if let Some(s) = deserialize_step::<Logistics>(payload, &mut issues) {
                check_logistics(&s, "", &mut issues);
            }
        }
        IntakeStep::Review => {
            if let Some(s) = deserialize_step::<Review>(payload, &mut issues) {
                check_review(&s, mode, "", &mut issues);
            }
        }
    }
    StepValidation::from_issues(issues)
}

/// Complete-mode validation across the whole record (the submit path).
///
/// Steps 2 (basics), 3 (budget), and 7 (consent) must be present; the other
/// steps are validated only when filled in. Issue paths carry a `stepN.`
/// prefix.
pub fn validate_record(record: &IntakeRecord) -> Vec<FieldIssue> {
    let mut issues = Vec::new();

    if let Some(s) = &record.step1 {
        check_couple_contacts(s, "step1.", &mut issues);
    }

    match &record.step2 {
        Some(s) => check_wedding_basics(s, ValidationMode::Complete, "step2.", &mut issues),
        None => push(&mut issues, "step2", "Wedding basics are required"),
    }

    match &record.step3 {
        Some(s) => check_budget(s, ValidationMode::Complete, "step3.", &mut issues),
        None => push(&mut issues, "step3", "Budget information is required"),
    }

    if let Some(s) = &record.step4 {
        check_ceremony_reception(s, "step4.", &mut issues);
    }
    if let Some(s) = &record.step5 {
        check_vendor_preferences(s, "step5.", &mut issues);
    }
    if let Some(s) = &record.step6 {
        check_logistics(s, "step6.", &mut issues);
    }

    match &record.step7 {
        Some(s) => check_review(s, ValidationMode::Complete, "step7.", &mut issues),
        None => push(&mut issues, "step7.consent", "Consent is required to submit"),
    }

    issues
}

fn deserialize_step<T: DeserializeOwned>(
    payload: &serde_json::Value,
    issues: &mut Vec<FieldIssue>,
) -> Option<T> {
    if !payload.is_object() {
        push(issues, "", "Step payload must be a JSON object");
        return None;
    }
    match serde_json::from_value::<T>(payload.clone()) {
        Ok(v) => Some(v),
        Err(e) => {
            push(issues, "", format!("Malformed step payload: {e}"));
            None
        }
    }
}

// ---------------------------------------------------------------------------
// Per-step rules
// ---------------------------------------------------------------------------

fn check_contact_info(s: &ContactInfo, prefix: &str, issues: &mut Vec<FieldIssue>) {
    if let Some(email) = s.email.as_deref() {
        check_email(issues, format!("{prefix}email"), email);
    }
    // Couple contact phones are strict E.164.
    if let Some(phone) = s.phone.as_deref() {
        check_e164_phone(issues, format!("{prefix}phone"), phone);
    }
}

fn check_couple_contacts(s: &CoupleContacts, prefix: &str, issues: &mut Vec<FieldIssue>) {
    if let Some(a) = &s.partner_a {
        check_contact_info(a, &format!("{prefix}partner_a."), issues);
    }
    if let Some(b) = &s.partner_b {
        check_contact_info(b, &format!("{prefix}partner_b."), issues);
    }
    if let Some(method) = s.preferred_contact_method.as_deref() {
        check_one_of(
            issues,
            format!("{prefix}preferred_contact_method"),
            method,
            &["email", "phone", "text"],
        );
    }
    if let Some(planner) = &s.planner_contact {
        if let Some(email) = planner.email.as_deref() {
            check_email(issues, format!("{prefix}planner_contact.email"), email);
        }
        if let Some(phone) = planner.phone.as_deref() {
            check_loose_phone(issues, format!("{prefix}planner_contact.phone"), phone);
        }
    }
}

fn check_name_pair(
    names: Option<&Vec<String>>,
    path: String,
    mode: ValidationMode,
    required: bool,
    issues: &mut Vec<FieldIssue>,
) {
    match names {
        Some(list) => {
            if list.len() != 2 || list.iter().any(|n| n.trim().is_empty()) {
                push(issues, path, "Exactly two partner names are required");
            }
        }
        None => {
            if required && mode == ValidationMode::Complete {
                push(issues, path, "Exactly two partner names are required");
            }
        }
    }
}

fn check_wedding_basics(
    s: &WeddingBasics,
    mode: ValidationMode,
    prefix: &str,
    issues: &mut Vec<FieldIssue>,
) {
    check_name_pair(
        s.partner_first_names.as_ref(),
        format!("{prefix}partner_first_names"),
        mode,
        true,
        issues,
    );
    check_name_pair(
        s.partner_last_names.as_ref(),
        format!("{prefix}partner_last_names"),
        mode,
        false,
        issues,
    );

    if let Some(count) = s.guest_count_estimate {
        if count < 1 {
            push(
                issues,
                format!("{prefix}guest_count_estimate"),
                "Guest count must be at least 1",
            );
        }
    }

    if mode == ValidationMode::Complete {
        if s.working_title.as_deref().map_or(true, |t| t.trim().is_empty()) {
            push(
                issues,
                format!("{prefix}working_title"),
                "A working title is required",
            );
        }
        if s.wedding_date.is_none() {
            push(
                issues,
                format!("{prefix}wedding_date"),
                "A wedding date is required",
            );
        }
        if s.city.as_deref().map_or(true, |c| c.trim().is_empty()) {
            push(issues, format!("{prefix}city"), "A city is required");
        }
    }
}

fn check_budget(s: &BudgetStep, mode: ValidationMode, prefix: &str, issues: &mut Vec<FieldIssue>) {
    if let Some(total) = s.total_budget {
        if total < 0.0 {
            push(
                issues,
                format!("{prefix}total_budget"),
                "Total budget cannot be negative",
            );
        }
    } else if mode == ValidationMode::Complete {
        push(
            issues,
            format!("{prefix}total_budget"),
            "A total budget is required",
        );
    }

    if let Some(categories) = &s.categories {
        let mut seen = Vec::new();
        for (i, cat) in categories.iter().enumerate() {
            if !budget::is_valid_category(&cat.name) {
                push(
                    issues,
                    format!("{prefix}categories[{i}].name"),
                    format!("Unknown budget category '{}'", cat.name),
                );
            } else if seen.contains(&cat.name.as_str()) {
                push(
                    issues,
                    format!("{prefix}categories[{i}].name"),
                    format!("Duplicate budget category '{}'", cat.name),
                );
            } else {
                seen.push(cat.name.as_str());
            }

            if !(0.0..=100.0).contains(&cat.percent) {
                push(
                    issues,
                    format!("{prefix}categories[{i}].percent"),
                    "Percent must be between 0 and 100",
                );
            }
            if let Some(cap) = cat.hard_cap {
                if cap < 0.0 {
                    push(
                        issues,
                        format!("{prefix}categories[{i}].hard_cap"),
                        "Hard cap cannot be negative",
                    );
                }
            }
        }

        // The split must account for the whole budget. The whole step fails
        // on a bad sum, with the issue anchored at the categories field.
        if !categories.is_empty() {
            let percents: Vec<f64> = categories.iter().map(|c| c.percent).collect();
            if !budget::percents_sum_to_100(&percents) {
                let sum: f64 = percents.iter().sum();
                push(
                    issues,
                    format!("{prefix}categories"),
                    format!("Category percentages must sum to 100 (got {sum})"),
                );
            }
        }
    }
}

fn check_ceremony_reception(s: &CeremonyReception, prefix: &str, issues: &mut Vec<FieldIssue>) {
    if let Some(t) = s.ceremony_time.as_deref() {
        check_time(issues, format!("{prefix}ceremony_time"), t);
    }
    if let Some(t) = s.reception_time.as_deref() {
        check_time(issues, format!("{prefix}reception_time"), t);
    }
    if let Some(setting) = s.setting.as_deref() {
        check_one_of(
            issues,
            format!("{prefix}setting"),
            setting,
            &["indoor", "outdoor", "mixed"],
        );
    }
}

fn check_vendor_preferences(s: &VendorPreferences, prefix: &str, issues: &mut Vec<FieldIssue>) {
    if let Some(required) = &s.required_vendors {
        for (i, name) in required.iter().enumerate() {
            if !vendors::is_valid_vendor_category(name) {
                push(
                    issues,
                    format!("{prefix}required_vendors[{i}]"),
                    format!("Unknown vendor category '{name}'"),
                );
            }
        }
    }
    if let Some(radius) = s.search_radius_miles {
        if !(1..=500).contains(&radius) {
            push(
                issues,
                format!("{prefix}search_radius_miles"),
                "Search radius must be between 1 and 500 miles",
            );
        }
    }
    if let Some(band) = s.budget_band.as_deref() {
        check_one_of(
            issues,
            format!("{prefix}budget_band"),
            band,
            &["value", "standard", "premium"],
        );
    }
}

fn check_logistics(s: &Logistics, prefix: &str, issues: &mut Vec<FieldIssue>) {
    if let Some(pref) = s.rsvp_preference.as_deref() {
        check_one_of(
            issues,
            format!("{prefix}rsvp_preference"),
            pref,
            &["site", "email", "paper"],
        );
    }
}

fn check_review(s: &Review, mode: ValidationMode, prefix: &str, issues: &mut Vec<FieldIssue>) {
    // Consent failure is its own message, not a generic "field required".
    if mode == ValidationMode::Complete && s.consent != Some(true) {
        push(
            issues,
            format!("{prefix}consent"),
            "Consent is required to submit",
        );
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
