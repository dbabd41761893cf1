//! The prefill mapping engine.
//!
//! Seven pure functions turn a validated intake record into seed payloads
//! for the project dashboard: project metadata, a budget plan, a timeline
//! task list, vendor filters, site content, guest preferences, and event
//! details. All of them are deterministic, take the record by reference,
//! and perform no I/O; repeated calls on the same input yield identical
//! output. None of them re-validates — they trust the intake validator.
//!
//! A record with no wedding date produces an empty timeline and a `None`
//! date in the project metadata. Nothing here invents a date.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::budget::estimated_cost;
use crate::intake::record::IntakeRecord;
use crate::tasks::{TaskPriority, TaskStatus};
use crate::vendors::{VendorCategory, ALL_VENDOR_CATEGORIES};

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Currency assumed when the budget step does not name one.
pub const DEFAULT_CURRENCY: &str = "USD";

/// Vendor search radius when the intake does not set one.
pub const DEFAULT_SEARCH_RADIUS_MILES: i32 = 50;

/// RSVP collection channel when the intake does not set one.
pub const DEFAULT_RSVP_PREFERENCE: &str = "site";

/// Wedding-site greeting used when the couple wrote none.
pub const DEFAULT_WELCOME_MESSAGE: &str = "Welcome! We can't wait to celebrate with you.";

/// Project title when neither a working title nor partner names exist.
pub const FALLBACK_TITLE: &str = "Our Wedding";

/// Days used to resolve fractional month offsets (0.1 months is 3 days).
pub const DAYS_PER_MONTH: f64 = 30.0;

// Core planning-task lead times, months before the wedding.
const SET_BUDGET_MONTHS: f64 = 12.0;
const BOOK_VENUE_MONTHS: f64 = 11.0;
const HIRE_PLANNER_MONTHS: f64 = 11.0;
const CONFIRM_DETAILS_MONTHS: f64 = 0.5;
const REHEARSAL_MONTHS: f64 = 0.1;

// ---------------------------------------------------------------------------
// Derived payload types
// ---------------------------------------------------------------------------

/// Partial update applied to the project row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectMeta {
    pub title: String,
    /// `None` when the intake has no date; the project's existing date is
    /// then left untouched.
    pub wedding_date: Option<NaiveDate>,
    pub location: Option<String>,
    pub guest_count: Option<i32>,
    pub style_tags: Vec<String>,
}

/// Seed budget: total plus the per-category split.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetPlan {
    pub currency: String,
    pub total: f64,
    pub categories: Vec<BudgetCategoryPlan>,
}

/// One seeded budget line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetCategoryPlan {
    pub category: String,
    pub percent: f64,
    pub hard_cap: Option<f64>,
    pub estimated_cost: f64,
}

/// One seeded timeline task. Tasks are independent; there is no dependency
/// graph, and the list order is the insertion order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineTask {
    pub title: String,
    pub description: String,
    pub category: String,
    pub priority: TaskPriority,
    pub due_date: NaiveDate,
    pub status: TaskStatus,
}

/// Seed for the vendor-browsing filters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VendorFilters {
    pub categories: Vec<String>,
    pub radius_miles: i32,
    pub city: Option<String>,
    pub budget_band: Option<String>,
}

/// Seed for the wedding-site content settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteContentPrefs {
    pub rsvp_preference: String,
    pub welcome_message: String,
    pub enable_photo_sharing: bool,
    pub show_registry: bool,
}

/// Seed for guest-facing policies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestPrefs {
    pub dietary_options: Vec<String>,
    pub allow_plus_ones: bool,
    pub allow_children: bool,
    pub hotel_block: Option<String>,
}

/// Seed for ceremony/reception details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDetails {
    pub ceremony_venue: Option<String>,
    pub ceremony_time: Option<String>,
    pub reception_venue: Option<String>,
    pub reception_time: Option<String>,
    pub setting: Option<String>,
}

/// Everything the mappers derive from one intake record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrefillBundle {
    pub project_meta: ProjectMeta,
    pub budget_plan: Option<BudgetPlan>,
    pub timeline: Vec<TimelineTask>,
    pub vendor_filters: Option<VendorFilters>,
    pub site_content: Option<SiteContentPrefs>,
    pub guest_prefs: Option<GuestPrefs>,
    pub event_details: Option<EventDetails>,
}

// ---------------------------------------------------------------------------
// Date arithmetic
// ---------------------------------------------------------------------------

/// The calendar date `months_before` months ahead of `wedding_date`.
///
/// Whole months move by calendar month (day-of-month clamped at month
/// ends); the fractional remainder resolves to days at 30 days per month,
/// so 0.5 months is 15 days and 0.1 months is 3 days.
pub fn due_date_before(wedding_date: NaiveDate, months_before: f64) -> NaiveDate {
    let whole = months_before.trunc() as u32;
    let frac_days = (months_before.fract() * DAYS_PER_MONTH).round() as u64;
    wedding_date - Months::new(whole) - Days::new(frac_days)
}

// ---------------------------------------------------------------------------
// Mappers
// ---------------------------------------------------------------------------

/// Project metadata from the basics step.
///
/// The title falls back to `"{A} & {B}'s Wedding"` built from partner
/// first names, then to [`FALLBACK_TITLE`].
pub fn to_project_meta(record: &IntakeRecord) -> ProjectMeta {
    let title = match record.working_title() {
        Some(t) => t.to_string(),
        None => match record.partner_first_names() {
            Some((a, b)) => format!("{a} & {b}'s Wedding"),
            None => FALLBACK_TITLE.to_string(),
        },
    };

    let basics = record.step2.as_ref();

    ProjectMeta {
        title,
        wedding_date: record.wedding_date(),
        location: record.city().map(str::to_string),
        guest_count: basics.and_then(|b| b.guest_count_estimate),
        style_tags: basics
            .and_then(|b| b.style_tags.clone())
            .unwrap_or_default(),
    }
}

/// Budget plan, or `None` when the budget step is entirely absent.
///
/// "No budget data" and "zero budget" are different things: a present step
/// with no total maps to a zero-total plan.
pub fn to_budget_plan(record: &IntakeRecord) -> Option<BudgetPlan> {
    let step = record.step3.as_ref()?;
    let total = step.total_budget.unwrap_or(0.0);

    let categories = step
        .categories
        .as_deref()
        .unwrap_or(&[])
        .iter()
        .map(|c| BudgetCategoryPlan {
            category: c.name.clone(),
            percent: c.percent,
            hard_cap: c.hard_cap,
            estimated_cost: estimated_cost(c.percent, c.hard_cap, total),
        })
        .collect();

    Some(BudgetPlan {
        currency: step
            .currency
            .clone()
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string()),
        total,
        categories,
    })
}

/// Seed timeline, empty when the intake has no wedding date.
///
/// Core tasks come first, then one booking task per required vendor
/// category in the fixed category order, then the closing tasks. No sort
/// is applied afterwards.
pub fn to_timeline_seed(record: &IntakeRecord) -> Vec<TimelineTask> {
    let Some(wedding_date) = record.wedding_date() else {
        return Vec::new();
    };

    let task = |title: &str, description: &str, category: &str, priority, months| TimelineTask {
        title: title.to_string(),
        description: description.to_string(),
        category: category.to_string(),
        priority,
        due_date: due_date_before(wedding_date, months),
        status: TaskStatus::Todo,
    };

    let mut tasks = vec![
        task(
            "Set your budget",
            "Agree the total budget and how it splits across categories.",
            "planning",
            TaskPriority::High,
            SET_BUDGET_MONTHS,
        ),
        task(
            "Book your venue",
            "Tour venues and put a deposit on the one you want.",
            "venue",
            TaskPriority::High,
            BOOK_VENUE_MONTHS,
        ),
        task(
            "Hire a wedding planner",
            "Decide whether you want a planner and book one if so.",
            "planning",
            TaskPriority::Medium,
            HIRE_PLANNER_MONTHS,
        ),
    ];

    // Conditional booking tasks, in fixed category order regardless of the
    // order the intake listed them in.
    let required = record.required_vendors();
    for category in ALL_VENDOR_CATEGORIES {
        if required.iter().any(|r| r == category.as_str()) {
            tasks.push(booking_task(*category, wedding_date));
        }
    }

    tasks.push(task(
        "Confirm final details with vendors",
        "Reconfirm timing, headcount, and delivery details with every booked vendor.",
        "planning",
        TaskPriority::High,
        CONFIRM_DETAILS_MONTHS,
    ));
    tasks.push(task(
        "Rehearsal walk-through",
        "Walk the ceremony with the wedding party.",
        "planning",
        TaskPriority::Medium,
        REHEARSAL_MONTHS,
    ));

    tasks
}

fn booking_task(category: VendorCategory, wedding_date: NaiveDate) -> TimelineTask {
    TimelineTask {
        title: format!("Book {}", category.label()),
        description: format!(
            "Shortlist and book your {} before availability dries up.",
            category.label()
        ),
        category: category.as_str().to_string(),
        priority: TaskPriority::High,
        due_date: due_date_before(wedding_date, category.booking_lead_months()),
        status: TaskStatus::Todo,
    }
}

/// Vendor-browsing filters, or `None` when the preferences step is absent.
pub fn to_vendor_filters(record: &IntakeRecord) -> Option<VendorFilters> {
    let step = record.step5.as_ref()?;
    Some(VendorFilters {
        categories: step.required_vendors.clone().unwrap_or_default(),
        radius_miles: step
            .search_radius_miles
            .unwrap_or(DEFAULT_SEARCH_RADIUS_MILES),
        city: record.city().map(str::to_string),
        budget_band: step.budget_band.clone(),
    })
}

/// Wedding-site content settings, or `None` when logistics are absent.
pub fn to_site_content_prefs(record: &IntakeRecord) -> Option<SiteContentPrefs> {
    let step = record.step6.as_ref()?;
    let content = step.site_content.as_ref();
    Some(SiteContentPrefs {
        rsvp_preference: step
            .rsvp_preference
            .clone()
            .unwrap_or_else(|| DEFAULT_RSVP_PREFERENCE.to_string()),
        welcome_message: content
            .and_then(|c| c.welcome_message.clone())
            .unwrap_or_else(|| DEFAULT_WELCOME_MESSAGE.to_string()),
        enable_photo_sharing: content.and_then(|c| c.enable_photo_sharing).unwrap_or(true),
        show_registry: content.and_then(|c| c.show_registry).unwrap_or(true),
    })
}

/// Guest-facing policies, or `None` when logistics are absent.
pub fn to_guest_prefs(record: &IntakeRecord) -> Option<GuestPrefs> {
    let step = record.step6.as_ref()?;
    let prefs = step.guest_prefs.as_ref();
    Some(GuestPrefs {
        dietary_options: prefs
            .and_then(|p| p.dietary_options.clone())
            .unwrap_or_default(),
        allow_plus_ones: prefs.and_then(|p| p.allow_plus_ones).unwrap_or(true),
        allow_children: prefs.and_then(|p| p.allow_children).unwrap_or(true),
        hotel_block: prefs.and_then(|p| p.hotel_block.clone()),
    })
}

/// Ceremony/reception details, or `None` when that step is absent.
pub fn to_event_details(record: &IntakeRecord) -> Option<EventDetails> {
    let step = record.step4.as_ref()?;
    Some(EventDetails {
        ceremony_venue: step.ceremony_venue.clone(),
        ceremony_time: step.ceremony_time.clone(),
        reception_venue: step.reception_venue.clone(),
        reception_time: step.reception_time.clone(),
        setting: step.setting.clone(),
    })
}

/// Run all seven mappers over one record.
pub fn build_bundle(record: &IntakeRecord) -> PrefillBundle {
    PrefillBundle {
        project_meta: to_project_meta(record),
        budget_plan: to_budget_plan(record),
        timeline: to_timeline_seed(record),
        vendor_filters: to_vendor_filters(record),
        site_content: to_site_content_prefs(record),
        guest_prefs: to_guest_prefs(record),
        event_details: to_event_details(record),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
