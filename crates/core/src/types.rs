/// Database primary keys are PostgreSQL BIGSERIAL throughout.
pub type DbId = i64;

/// Timestamps are UTC everywhere; calendar dates (wedding day, task due
/// dates) use [`chrono::NaiveDate`] directly.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
