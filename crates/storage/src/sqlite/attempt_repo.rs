use induction_core::model::{Attempt, NewAttempt};

use super::{
    SqliteRepository,
    mapping::{attempt_id_from_i64, map_attempt_row},
};
use crate::repository::{AttemptRepository, NameMatch, StorageError};

// SQLite's lower() folds ASCII letters only.
fn where_clause(strategy: NameMatch) -> &'static str {
    match strategy {
        NameMatch::Exact => "name = ?1",
        NameMatch::CaseInsensitive => "lower(name) = lower(?1)",
        NameMatch::Contains => "instr(lower(name), lower(?1)) > 0",
    }
}

#[async_trait::async_trait]
impl AttemptRepository for SqliteRepository {
    async fn insert_attempt(&self, attempt: NewAttempt) -> Result<Attempt, StorageError> {
        let res = sqlx::query(
            r"
                INSERT INTO assessment_results (
                    name, company, phone, host_name, score, passed, completed_at
                )
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            ",
        )
        .bind(&attempt.name)
        .bind(&attempt.company)
        .bind(attempt.phone.as_deref())
        .bind(&attempt.host_name)
        .bind(i64::from(attempt.score))
        .bind(attempt.passed)
        .bind(attempt.completed_at)
        .execute(&self.pool)
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        let id = attempt_id_from_i64(res.last_insert_rowid())?;
        Ok(Attempt::new(id, attempt))
    }

    async fn find_by_name(
        &self,
        name: &str,
        strategy: NameMatch,
    ) -> Result<Vec<Attempt>, StorageError> {
        let sql = format!(
            r"
                SELECT id, name, company, phone, host_name, score, passed, completed_at
                FROM assessment_results
                WHERE {}
                ORDER BY completed_at DESC, id DESC
            ",
            where_clause(strategy)
        );

        let rows = sqlx::query(&sql)
            .bind(name)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            out.push(map_attempt_row(&row)?);
        }
        Ok(out)
    }
}
