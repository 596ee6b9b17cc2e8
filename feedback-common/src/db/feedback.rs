//! Feedback queries

use crate::db::models::{FeedbackRow, NewFeedback};
use crate::Result;
use chrono::Utc;
use sqlx::SqlitePool;

/// Append one feedback entry stamped with the current time
///
/// The course must exist; the storage layer rejects unknown course ids.
pub async fn add_feedback(pool: &SqlitePool, feedback: &NewFeedback) -> Result<()> {
    sqlx::query(
        r#"
        INSERT INTO feedback (course_id, student_name, student_email, rating, comment, timestamp)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(feedback.course_id)
    .bind(&feedback.student_name)
    .bind(&feedback.student_email)
    .bind(feedback.rating)
    .bind(&feedback.comment)
    .bind(Utc::now())
    .execute(pool)
    .await?;

    Ok(())
}

/// List every feedback entry with its course name, in insertion order
pub async fn list_feedback(pool: &SqlitePool) -> Result<Vec<FeedbackRow>> {
    let rows = sqlx::query_as::<_, FeedbackRow>(
        r#"
        SELECT feedback.id, courses.name AS course_name, feedback.student_name,
               feedback.student_email, feedback.rating, feedback.comment, feedback.timestamp
        FROM feedback
        JOIN courses ON feedback.course_id = courses.id
        ORDER BY feedback.id
        "#,
    )
    .fetch_all(pool)
    .await?;

    Ok(rows)
}

/// Ratings submitted for one course, in insertion order
pub async fn list_ratings_by_course(pool: &SqlitePool, course_id: i64) -> Result<Vec<i64>> {
    let ratings = sqlx::query_scalar::<_, i64>(
        "SELECT rating FROM feedback WHERE course_id = ? ORDER BY id",
    )
    .bind(course_id)
    .fetch_all(pool)
    .await?;

    Ok(ratings)
}
