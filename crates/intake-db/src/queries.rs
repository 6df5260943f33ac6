//! Parameterized queries against the pre-existing `users` table.
//!
//! Every field value is bound as a literal parameter. Record content never
//! reaches statement text, so a statement terminator embedded in a field is
//! stored as an inert string, and a comparison fragment in a lookup id
//! matches nothing.

use crate::models::StoredRecord;
use crate::pool::DbError;
use chrono::{DateTime, Utc};
use intake_core::NormalizedRecord;
use sqlx::MySqlPool;
use tracing::debug;

const INSERT_RECORD: &str = "INSERT INTO users (id, name, email, phone, created_date, email_valid, phone_valid) VALUES (?, ?, ?, ?, ?, ?, ?)";

const SELECT_RECORD: &str = "SELECT id, name, email, phone, created_date, email_valid, phone_valid FROM users WHERE id = ?";

/// Insert a batch of normalized records in one transaction, all or
/// nothing: any per-row failure rolls the whole batch back.
pub async fn insert_records(
    pool: &MySqlPool,
    records: &[NormalizedRecord],
    created_date: DateTime<Utc>,
) -> Result<u64, DbError> {
    let mut tx = pool.begin().await?;

    for record in records {
        sqlx::query(INSERT_RECORD)
            .bind(&record.id)
            .bind(&record.name)
            .bind(&record.email)
            .bind(&record.phone)
            .bind(created_date)
            .bind(record.email_valid)
            .bind(record.phone_valid)
            .execute(&mut *tx)
            .await
            .map_err(|e| {
                if let sqlx::Error::Database(ref db_err) = e {
                    if db_err.code().as_deref() == Some("23000") {
                        return DbError::Duplicate(format!("Record already exists: {}", record.id));
                    }
                }
                DbError::Connection(e)
            })?;
    }

    tx.commit().await?;
    debug!(count = records.len(), "Inserted intake records");
    Ok(records.len() as u64)
}

/// Exact-equality lookup by identifier. The id is a bind parameter, so an
/// injected logic operator widens nothing and simply fails to match.
pub async fn get_record(pool: &MySqlPool, id: &str) -> Result<Option<StoredRecord>, DbError> {
    let record = sqlx::query_as::<_, StoredRecord>(SELECT_RECORD)
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(record)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
