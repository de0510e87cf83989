/// Storage primary keys are PostgreSQL BIGSERIAL.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// Stable identifier shared by every version of one logical record.
pub type LogicalKey = uuid::Uuid;
