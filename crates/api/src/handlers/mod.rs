//! Request handlers, one module per resource.

pub mod budget;
pub mod guest;
pub mod intake;
pub mod prefill;
pub mod prefs;
pub mod project;
pub mod seating;
pub mod task;
pub mod vendor;
