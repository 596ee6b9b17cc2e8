//! Feedback submission and listing endpoints
//!
//! Submissions are validated here, before anything reaches the database:
//! name and email are required, the rating must be 1-5 and the course must
//! exist.

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use feedback_common::db::{self, FeedbackRow, NewFeedback};
use feedback_common::stats::{MAX_RATING, MIN_RATING};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::{ApiError, ApiResult, AppState};

/// Shown when name or email is missing
pub const MISSING_IDENTITY_MESSAGE: &str = "Please enter your name and email.";

/// Shown after a successful submission
pub const SUBMITTED_MESSAGE: &str = "Feedback submitted!";

/// POST /api/feedback request body
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitFeedbackRequest {
    pub course_id: i64,
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub student_email: String,
    pub rating: i64,
    #[serde(default)]
    pub comment: Option<String>,
}

impl SubmitFeedbackRequest {
    /// Check required fields and normalize the submission
    ///
    /// Name and email are trimmed; an empty comment is stored as NULL.
    pub fn validate(self) -> ApiResult<NewFeedback> {
        let student_name = self.student_name.trim().to_string();
        let student_email = self.student_email.trim().to_string();

        if student_name.is_empty() || student_email.is_empty() {
            return Err(ApiError::BadRequest(MISSING_IDENTITY_MESSAGE.to_string()));
        }

        if !(MIN_RATING..=MAX_RATING).contains(&self.rating) {
            return Err(ApiError::BadRequest(format!(
                "Rating must be between {} and {}",
                MIN_RATING, MAX_RATING
            )));
        }

        let comment = self.comment.filter(|c| !c.trim().is_empty());

        Ok(NewFeedback {
            course_id: self.course_id,
            student_name,
            student_email,
            rating: self.rating,
            comment,
        })
    }
}

/// POST /api/feedback response body
#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    pub message: String,
}

/// GET /api/feedback
///
/// Every feedback entry joined with its course name.
pub async fn list_feedback(State(state): State<AppState>) -> ApiResult<Json<Vec<FeedbackRow>>> {
    let rows = db::list_feedback(&state.db).await?;
    Ok(Json(rows))
}

/// POST /api/feedback
pub async fn submit_feedback(
    State(state): State<AppState>,
    payload: Result<Json<SubmitFeedbackRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<SubmitFeedbackResponse>)> {
    let Json(request) = payload.map_err(|rejection| {
        warn!("Rejected feedback body: {}", rejection.body_text());
        ApiError::from(rejection)
    })?;

    let feedback = match request.validate() {
        Ok(feedback) => feedback,
        Err(e) => {
            warn!("Rejected feedback submission: {}", e);
            return Err(e);
        }
    };

    let course = db::require_course(&state.db, feedback.course_id).await?;
    db::add_feedback(&state.db, &feedback).await?;

    info!("Recorded rating {} for '{}'", feedback.rating, course.name);

    Ok((
        StatusCode::CREATED,
        Json(SubmitFeedbackResponse {
            message: SUBMITTED_MESSAGE.to_string(),
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(name: &str, email: &str, rating: i64, comment: Option<&str>) -> SubmitFeedbackRequest {
        SubmitFeedbackRequest {
            course_id: 1,
            student_name: name.to_string(),
            student_email: email.to_string(),
            rating,
            comment: comment.map(str::to_string),
        }
    }

    #[test]
    fn test_validate_accepts_complete_submission() {
        let feedback = request(" Ada ", "ada@example.com", 5, Some("Loved it"))
            .validate()
            .unwrap();

        assert_eq!(feedback.student_name, "Ada");
        assert_eq!(feedback.student_email, "ada@example.com");
        assert_eq!(feedback.rating, 5);
        assert_eq!(feedback.comment.as_deref(), Some("Loved it"));
    }

    #[test]
    fn test_validate_requires_name_and_email() {
        for (name, email) in [("", "a@b.c"), ("Ada", ""), ("   ", "a@b.c")] {
            match request(name, email, 3, None).validate() {
                Err(ApiError::BadRequest(msg)) => assert_eq!(msg, MISSING_IDENTITY_MESSAGE),
                other => panic!("expected BadRequest, got {:?}", other),
            }
        }
    }

    #[test]
    fn test_validate_rating_range() {
        assert!(request("Ada", "a@b.c", 0, None).validate().is_err());
        assert!(request("Ada", "a@b.c", 6, None).validate().is_err());
        assert!(request("Ada", "a@b.c", 1, None).validate().is_ok());
    }

    #[test]
    fn test_validate_blank_comment_becomes_none() {
        let feedback = request("Ada", "a@b.c", 4, Some("  ")).validate().unwrap();
        assert_eq!(feedback.comment, None);
    }
}
