//! Intake completion signals.
//!
//! Two different measures feed the UI: a strict checklist that gates
//! submission-dependent features, and a coarse per-step percentage for the
//! wizard progress bar. The percentage deliberately counts a step as done
//! the moment it holds any value at all; it is a "did you touch this step"
//! signal, not field-level completeness.

use serde_json::Value;

use crate::intake::record::IntakeRecord;
use crate::intake::steps::TOTAL_STEPS;

/// Strict completeness checklist.
///
/// All seven conditions must hold: both partner first names, a working
/// title, a wedding date, a city, a total budget, and consent.
pub fn is_intake_complete(record: &IntakeRecord) -> bool {
    record.partner_first_names().is_some()
        && record.working_title().is_some()
        && record.wedding_date().is_some()
        && record.city().is_some()
        && record.total_budget().is_some()
        && record.consent()
}

/// Progress percentage: touched steps / 7, rounded to the nearest integer.
pub fn intake_completion(record: &IntakeRecord) -> u8 {
    let touched = [
        step_touched(&record.step1),
        step_touched(&record.step2),
        step_touched(&record.step3),
        step_touched(&record.step4),
        step_touched(&record.step5),
        step_touched(&record.step6),
        step_touched(&record.step7),
    ]
    .iter()
    .filter(|t| **t)
    .count();

    ((touched as f64 / TOTAL_STEPS as f64) * 100.0).round() as u8
}

fn step_touched<T: serde::Serialize>(step: &Option<T>) -> bool {
    match step {
        Some(s) => serde_json::to_value(s).map(|v| has_any_value(&v)).unwrap_or(false),
        None => false,
    }
}

/// Whether a JSON tree contains at least one non-null, non-empty leaf.
fn has_any_value(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::String(s) => !s.trim().is_empty(),
        Value::Array(items) => items.iter().any(has_any_value),
        Value::Object(map) => map.values().any(has_any_value),
        Value::Bool(_) | Value::Number(_) => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn full_record() -> IntakeRecord {
        serde_json::from_value(json!({
            "step1": { "partner_a": { "email": "ada@example.com" } },
            "step2": {
                "partner_first_names": ["Ada", "Grace"],
                "working_title": "Ada & Grace's Wedding",
                "wedding_date": "2025-06-15",
                "city": "Portland"
            },
            "step3": { "total_budget": 40000.0 },
            "step4": { "ceremony_venue": "Rose Garden" },
            "step5": { "required_vendors": ["photographer"] },
            "step6": { "rsvp_preference": "site" },
            "step7": { "consent": true }
        }))
        .unwrap()
    }

    #[test]
    fn full_record_is_complete_and_100_percent() {
        let record = full_record();
        assert!(is_intake_complete(&record));
        assert_eq!(intake_completion(&record), 100);
    }

    #[test]
    fn only_step1_is_14_percent() {
        let record: IntakeRecord = serde_json::from_value(json!({
            "step1": { "partner_a": { "email": "ada@example.com" } }
        }))
        .unwrap();
        assert_eq!(intake_completion(&record), 14);
    }

    #[test]
    fn empty_record_is_0_percent() {
        assert_eq!(intake_completion(&IntakeRecord::default()), 0);
    }

    #[test]
    fn step_present_but_empty_does_not_count() {
        let record: IntakeRecord = serde_json::from_value(json!({
            "step2": { "working_title": "   " }
        }))
        .unwrap();
        assert_eq!(intake_completion(&record), 0);
    }

    #[test]
    fn one_trivial_field_counts_the_whole_step() {
        let record: IntakeRecord = serde_json::from_value(json!({
            "step2": { "city": "Portland" }
        }))
        .unwrap();
        assert_eq!(intake_completion(&record), 14);
    }

    #[test]
    fn missing_consent_blocks_completeness() {
        let mut record = full_record();
        record.step7.as_mut().unwrap().consent = Some(false);
        assert!(!is_intake_complete(&record));

        record.step7 = None;
        assert!(!is_intake_complete(&record));
    }

    #[test]
    fn each_checklist_field_is_load_bearing() {
        let base = full_record();

        let mut r = base.clone();
        r.step2.as_mut().unwrap().partner_first_names = Some(vec!["Ada".into()]);
        assert!(!is_intake_complete(&r));

        let mut r = base.clone();
        r.step2.as_mut().unwrap().working_title = None;
        assert!(!is_intake_complete(&r));

        let mut r = base.clone();
        r.step2.as_mut().unwrap().wedding_date = None;
        assert!(!is_intake_complete(&r));

        let mut r = base.clone();
        r.step2.as_mut().unwrap().city = None;
        assert!(!is_intake_complete(&r));

        let mut r = base.clone();
        r.step3.as_mut().unwrap().total_budget = None;
        assert!(!is_intake_complete(&r));
    }
}
