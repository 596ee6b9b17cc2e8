//! HTTP API handlers for feedback-ui

pub mod courses;
pub mod feedback;
pub mod health;
pub mod ui;

pub use courses::{course_ratings, course_summary, list_courses};
pub use feedback::{list_feedback, submit_feedback};
pub use health::health_routes;
pub use ui::{serve_app_css, serve_app_js, serve_index};
