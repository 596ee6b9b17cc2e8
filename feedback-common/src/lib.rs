//! # Course Feedback Common Library
//!
//! Shared code for the course feedback service:
//! - Database initialization and course seeding
//! - Data access for courses and feedback entries
//! - Rating statistics (average, distribution)
//! - Configuration loading

pub mod config;
pub mod db;
pub mod error;
pub mod stats;

pub use error::{Error, Result};
pub use stats::{RatingHistogram, RatingSummary};
