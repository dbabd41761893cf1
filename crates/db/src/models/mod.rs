//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches
//!
//! Entities derive `TS` so the SPA's types stay generated, not hand-kept.

pub mod budget_item;
pub mod guest;
pub mod intake;
pub mod project;
pub mod project_prefs;
pub mod seating;
pub mod task;
pub mod vendor;
