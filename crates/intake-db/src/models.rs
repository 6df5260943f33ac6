use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A persisted intake record. `id` is the natural key supplied by the
/// source record, stored and compared as an inert string.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct StoredRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_date: DateTime<Utc>,
    pub email_valid: bool,
    pub phone_valid: bool,
}
