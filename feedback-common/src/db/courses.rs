//! Course queries

use crate::db::models::Course;
use crate::{Error, Result};
use sqlx::SqlitePool;

/// List all courses ordered by name
pub async fn list_courses(pool: &SqlitePool) -> Result<Vec<Course>> {
    let courses = sqlx::query_as::<_, Course>("SELECT id, name FROM courses ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(courses)
}

/// Load one course by id
pub async fn get_course(pool: &SqlitePool, course_id: i64) -> Result<Option<Course>> {
    let course = sqlx::query_as::<_, Course>("SELECT id, name FROM courses WHERE id = ?")
        .bind(course_id)
        .fetch_optional(pool)
        .await?;

    Ok(course)
}

/// Load one course by id, failing with [`Error::NotFound`] if it is missing
pub async fn require_course(pool: &SqlitePool, course_id: i64) -> Result<Course> {
    get_course(pool, course_id)
        .await?
        .ok_or_else(|| Error::NotFound(format!("course {}", course_id)))
}

/// Insert a course unless one with the same name exists
///
/// Returns `true` if a new row was created.
pub async fn add_course(pool: &SqlitePool, name: &str) -> Result<bool> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("course name must not be empty".to_string()));
    }

    let result = sqlx::query("INSERT OR IGNORE INTO courses (name) VALUES (?)")
        .bind(name)
        .execute(pool)
        .await?;

    Ok(result.rows_affected() > 0)
}
