//! Course listing and per-course rating endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use feedback_common::db::{self, Course};
use feedback_common::RatingSummary;
use tracing::debug;

use crate::{ApiResult, AppState};

/// GET /api/courses
///
/// All courses, sorted by name.
pub async fn list_courses(State(state): State<AppState>) -> ApiResult<Json<Vec<Course>>> {
    let courses = db::list_courses(&state.db).await?;
    Ok(Json(courses))
}

/// GET /api/courses/:id/ratings
///
/// Plain rating values for one course; empty when nobody rated it yet.
pub async fn course_ratings(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> ApiResult<Json<Vec<i64>>> {
    db::require_course(&state.db, course_id).await?;
    let ratings = db::list_ratings_by_course(&state.db, course_id).await?;
    Ok(Json(ratings))
}

/// GET /api/courses/:id/summary
///
/// Average, histogram and proportions for one course.
pub async fn course_summary(
    State(state): State<AppState>,
    Path(course_id): Path<i64>,
) -> ApiResult<Json<RatingSummary>> {
    let course = db::require_course(&state.db, course_id).await?;
    let ratings = db::list_ratings_by_course(&state.db, course_id).await?;

    debug!("Summarizing {} ratings for '{}'", ratings.len(), course.name);

    Ok(Json(RatingSummary::from_ratings(&course, &ratings)))
}
