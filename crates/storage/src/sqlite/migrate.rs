use chrono::Utc;
use sqlx::SqlitePool;

use super::SqliteInitError;

/// One schema version and the statements that produce it.
struct Migration {
    version: i64,
    statements: &'static [&'static str],
}

const MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    statements: &[
        r"
            CREATE TABLE IF NOT EXISTS assessment_results (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                company TEXT NOT NULL,
                phone TEXT,
                host_name TEXT NOT NULL,
                score INTEGER NOT NULL CHECK (score >= 0),
                passed INTEGER NOT NULL CHECK (passed IN (0, 1)),
                completed_at TEXT NOT NULL
            );
        ",
        r"
            CREATE INDEX IF NOT EXISTS idx_assessment_results_name_completed
                ON assessment_results (name, completed_at);
        ",
    ],
}];

async fn applied_version(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
    let version: Option<i64> = sqlx::query_scalar("SELECT MAX(version) FROM schema_migrations")
        .fetch_one(pool)
        .await?;
    Ok(version.unwrap_or(0))
}

/// Applies every migration newer than the recorded schema version, each in
/// its own transaction.
pub async fn run_migrations(pool: &SqlitePool) -> Result<(), SqliteInitError> {
    sqlx::query(
        r"
            CREATE TABLE IF NOT EXISTS schema_migrations (
                version INTEGER PRIMARY KEY,
                applied_at TEXT NOT NULL
            );
        ",
    )
    .execute(pool)
    .await?;

    let current = applied_version(pool).await?;
    for migration in MIGRATIONS.iter().filter(|m| m.version > current) {
        let mut tx = pool.begin().await?;
        for statement in migration.statements {
            sqlx::query(*statement).execute(&mut *tx).await?;
        }
        sqlx::query("INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)")
            .bind(migration.version)
            .bind(Utc::now())
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
    }

    Ok(())
}
