//! Pure domain logic for the PlanHaus wedding-planning backend.
//!
//! Nothing in this crate performs I/O or touches the database. The API and
//! repository layers depend on it for the intake wizard (step definitions,
//! validation, completion), the prefill mapping engine, the seating
//! invariants, and shared error/ID types.

pub mod budget;
pub mod completion;
pub mod error;
pub mod intake;
pub mod pagination;
pub mod prefill;
pub mod seating;
pub mod tasks;
pub mod types;
pub mod vendors;
