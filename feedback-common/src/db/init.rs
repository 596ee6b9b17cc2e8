//! Database initialization
//!
//! Opening the store and creating its schema are separate steps:
//! [`connect`] yields a pool, [`init_schema`] creates the tables and seeds
//! the default courses. [`init_database`] runs both for service startup.

use crate::db::courses::add_course;
use crate::Result;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};

/// Courses inserted on first run
pub const DEFAULT_COURSES: [&str; 8] = [
    "Python Basics",
    "Data Structures",
    "Web Development",
    "Machine Learning",
    "Database Systems",
    "Cloud Computing",
    "Cybersecurity",
    "AI Fundamentals",
];

/// Open (or create) the database file and return a connection pool
///
/// Foreign keys are enabled on every pooled connection so that feedback rows
/// can only reference existing courses.
pub async fn connect(db_path: &Path) -> Result<SqlitePool> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let options = SqliteConnectOptions::new()
        .filename(db_path)
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_millis(5000));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(options)
        .await?;

    debug!("Connected to database: {}", db_path.display());

    Ok(pool)
}

/// Open a private in-memory database
///
/// Limited to a single connection: every pooled connection to `:memory:`
/// would otherwise see its own empty database. That connection is never
/// reaped, so the database lives as long as the pool.
pub async fn connect_in_memory() -> Result<SqlitePool> {
    let options = SqliteConnectOptions::new()
        .in_memory(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create tables if needed and seed the default courses
///
/// Idempotent: safe to call any number of times.
pub async fn init_schema(pool: &SqlitePool) -> Result<()> {
    create_courses_table(pool).await?;
    create_feedback_table(pool).await?;

    let inserted = seed_courses(pool, &DEFAULT_COURSES).await?;
    if inserted > 0 {
        info!("Seeded {} default courses", inserted);
    }

    Ok(())
}

/// Open the database at `db_path` and initialize its schema
///
/// Any error is meant to abort startup.
pub async fn init_database(db_path: &Path) -> Result<SqlitePool> {
    let newly_created = !db_path.exists();

    let pool = connect(db_path).await?;

    if newly_created {
        info!("Initialized new database: {}", db_path.display());
    } else {
        info!("Opened existing database: {}", db_path.display());
    }

    init_schema(&pool).await?;

    Ok(pool)
}

/// Create the courses table
pub async fn create_courses_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS courses (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT UNIQUE NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

/// Create the feedback table
pub async fn create_feedback_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS feedback (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            course_id INTEGER NOT NULL,
            student_name TEXT NOT NULL,
            student_email TEXT NOT NULL,
            rating INTEGER NOT NULL,
            comment TEXT,
            timestamp TIMESTAMP NOT NULL DEFAULT CURRENT_TIMESTAMP,
            FOREIGN KEY(course_id) REFERENCES courses(id)
        )
        "#,
    )
    .execute(pool)
    .await?;

    sqlx::query("CREATE INDEX IF NOT EXISTS idx_feedback_course ON feedback(course_id)")
        .execute(pool)
        .await?;

    Ok(())
}

/// Insert each course name that is not present yet
///
/// Returns how many rows were actually inserted.
pub async fn seed_courses(pool: &SqlitePool, names: &[&str]) -> Result<u64> {
    let mut inserted = 0;
    for name in names {
        if add_course(pool, name).await? {
            inserted += 1;
        }
    }

    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_init_schema_twice_keeps_one_row_per_course() {
        let pool = connect_in_memory().await.unwrap();

        init_schema(&pool).await.unwrap();
        init_schema(&pool).await.unwrap();

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, DEFAULT_COURSES.len() as i64);
    }

    #[tokio::test]
    async fn test_seed_courses_skips_duplicates_within_list() {
        let pool = connect_in_memory().await.unwrap();
        create_courses_table(&pool).await.unwrap();

        let inserted = seed_courses(&pool, &["Compilers", "Compilers", "Networks"])
            .await
            .unwrap();
        assert_eq!(inserted, 2);

        let again = seed_courses(&pool, &["Networks", "Compilers"]).await.unwrap();
        assert_eq!(again, 0);
    }

    #[tokio::test]
    async fn test_in_memory_connection_never_reaped() {
        let pool = connect_in_memory().await.unwrap();

        let options = pool.options();
        assert_eq!(options.get_max_connections(), 1);
        assert_eq!(options.get_min_connections(), 1);
        assert_eq!(options.get_idle_timeout(), None);
        assert_eq!(options.get_max_lifetime(), None);

        // Schema survives across separate acquisitions of the single connection
        init_schema(&pool).await.unwrap();
        drop(pool.acquire().await.unwrap());
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM courses")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(count, DEFAULT_COURSES.len() as i64);
    }

    #[tokio::test]
    async fn test_foreign_keys_enabled() {
        let pool = connect_in_memory().await.unwrap();

        let enabled: i64 = sqlx::query_scalar("PRAGMA foreign_keys")
            .fetch_one(&pool)
            .await
            .unwrap();
        assert_eq!(enabled, 1);
    }
}
