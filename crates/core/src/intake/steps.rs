//! Intake wizard step definitions and navigation rules.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The seven steps in the intake wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntakeStep {
    CoupleContacts,
    WeddingBasics,
    Budget,
    CeremonyReception,
    VendorPreferences,
    Logistics,
    Review,
}

/// Total number of steps in the wizard.
pub const TOTAL_STEPS: u8 = 7;

/// Minimum step number (1-based).
pub const MIN_STEP: u8 = 1;

/// Maximum step number (1-based).
pub const MAX_STEP: u8 = 7;

impl IntakeStep {
    /// Convert a 1-based step number to an `IntakeStep`.
    pub fn from_number(n: u8) -> Result<Self, CoreError> {
        match n {
            1 => Ok(Self::CoupleContacts),
            2 => Ok(Self::WeddingBasics),
            3 => Ok(Self::Budget),
            4 => Ok(Self::CeremonyReception),
            5 => Ok(Self::VendorPreferences),
            6 => Ok(Self::Logistics),
            7 => Ok(Self::Review),
            _ => Err(CoreError::Validation(format!(
                "Invalid step number {n}. Must be between {MIN_STEP} and {MAX_STEP}"
            ))),
        }
    }

    /// Convert to a 1-based step number.
    pub fn to_number(self) -> u8 {
        match self {
            Self::CoupleContacts => 1,
            Self::WeddingBasics => 2,
            Self::Budget => 3,
            Self::CeremonyReception => 4,
            Self::VendorPreferences => 5,
            Self::Logistics => 6,
            Self::Review => 7,
        }
    }

    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::CoupleContacts => "Couple & Contacts",
            Self::WeddingBasics => "Wedding Basics",
            Self::Budget => "Budget",
            Self::CeremonyReception => "Ceremony & Reception",
            Self::VendorPreferences => "Vendor Preferences",
            Self::Logistics => "Logistics",
            Self::Review => "Review & Consent",
        }
    }

    /// The JSON field name of this step on the intake record (`"step1"`..).
    pub fn field_name(self) -> &'static str {
        match self {
            Self::CoupleContacts => "step1",
            Self::WeddingBasics => "step2",
            Self::Budget => "step3",
            Self::CeremonyReception => "step4",
            Self::VendorPreferences => "step5",
            Self::Logistics => "step6",
            Self::Review => "step7",
        }
    }
}

/// Validate that a step number is within the valid range.
pub fn validate_step_number(step: u8) -> Result<(), CoreError> {
    if !(MIN_STEP..=MAX_STEP).contains(&step) {
        return Err(CoreError::Validation(format!(
            "Step {step} is out of range ({MIN_STEP}..{MAX_STEP})"
        )));
    }
    Ok(())
}

/// Validate a wizard navigation.
///
/// The client may move exactly one step forward or backward; jumping is
/// not allowed.
pub fn validate_step_transition(current: u8, next: u8) -> Result<(), CoreError> {
    validate_step_number(current)?;
    validate_step_number(next)?;

    let diff = (next as i16) - (current as i16);
    if diff != 1 && diff != -1 {
        return Err(CoreError::Validation(format!(
            "Cannot transition from step {current} to step {next}. \
             Must advance or go back exactly one step."
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_from_number_valid() {
        assert_eq!(
            IntakeStep::from_number(1).unwrap(),
            IntakeStep::CoupleContacts
        );
        assert_eq!(IntakeStep::from_number(7).unwrap(), IntakeStep::Review);
    }

    #[test]
    fn step_from_number_invalid() {
        assert!(IntakeStep::from_number(0).is_err());
        assert!(IntakeStep::from_number(8).is_err());
        assert!(IntakeStep::from_number(255).is_err());
    }

    #[test]
    fn step_to_number_roundtrip() {
        for n in MIN_STEP..=MAX_STEP {
            let step = IntakeStep::from_number(n).unwrap();
            assert_eq!(step.to_number(), n);
        }
    }

    #[test]
    fn field_names_are_stepn() {
        for n in MIN_STEP..=MAX_STEP {
            let step = IntakeStep::from_number(n).unwrap();
            assert_eq!(step.field_name(), format!("step{n}"));
        }
    }

    #[test]
    fn transition_by_one_is_valid() {
        for current in MIN_STEP..MAX_STEP {
            assert!(validate_step_transition(current, current + 1).is_ok());
            assert!(validate_step_transition(current + 1, current).is_ok());
        }
    }

    #[test]
    fn transition_same_or_skip_is_invalid() {
        assert!(validate_step_transition(3, 3).is_err());
        assert!(validate_step_transition(1, 3).is_err());
        assert!(validate_step_transition(7, 5).is_err());
    }

    #[test]
    fn transition_out_of_range() {
        assert!(validate_step_transition(0, 1).is_err());
        assert!(validate_step_transition(7, 8).is_err());
    }
}
