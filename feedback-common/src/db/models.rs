//! Database models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A named subject students give feedback on
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct Course {
    pub id: i64,
    pub name: String,
}

/// Input for a new feedback entry
///
/// Field validation (non-empty name/email, rating range) is the caller's job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewFeedback {
    pub course_id: i64,
    pub student_name: String,
    pub student_email: String,
    pub rating: i64,
    pub comment: Option<String>,
}

/// A stored feedback entry joined with its course name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct FeedbackRow {
    pub id: i64,
    pub course_name: String,
    pub student_name: String,
    pub student_email: String,
    pub rating: i64,
    pub comment: Option<String>,
    pub timestamp: DateTime<Utc>,
}
