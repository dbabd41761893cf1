//! The seven-step intake wizard: step definitions, the typed record, and
//! draft/complete validation.

pub mod record;
pub mod steps;
pub mod validate;
