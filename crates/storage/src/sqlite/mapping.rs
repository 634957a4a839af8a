use induction_core::model::{Attempt, AttemptId, NewAttempt};
use sqlx::Row;

use crate::repository::StorageError;

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

pub(crate) fn attempt_id_from_i64(v: i64) -> Result<AttemptId, StorageError> {
    u64::try_from(v)
        .map(AttemptId::new)
        .map_err(|_| StorageError::Serialization(format!("invalid attempt id: {v}")))
}

pub(crate) fn score_from_i64(v: i64) -> Result<u32, StorageError> {
    u32::try_from(v).map_err(|_| StorageError::Serialization(format!("invalid score: {v}")))
}

pub(crate) fn map_attempt_row(row: &sqlx::sqlite::SqliteRow) -> Result<Attempt, StorageError> {
    let id = attempt_id_from_i64(row.try_get::<i64, _>("id").map_err(ser)?)?;
    let score = score_from_i64(row.try_get::<i64, _>("score").map_err(ser)?)?;

    Ok(Attempt::new(
        id,
        NewAttempt {
            name: row.try_get("name").map_err(ser)?,
            company: row.try_get("company").map_err(ser)?,
            phone: row.try_get("phone").map_err(ser)?,
            host_name: row.try_get("host_name").map_err(ser)?,
            score,
            passed: row.try_get("passed").map_err(ser)?,
            completed_at: row.try_get("completed_at").map_err(ser)?,
        },
    ))
}
