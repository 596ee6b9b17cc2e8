//! Rating statistics for the course summary view
//!
//! Ratings live in the 1..=5 domain. Values outside it still count towards
//! the average but are left out of the histogram buckets.

use crate::db::models::Course;
use serde::{Deserialize, Serialize};

/// Lowest bucketed rating
pub const MIN_RATING: i64 = 1;

/// Highest bucketed rating
pub const MAX_RATING: i64 = 5;

const BUCKETS: usize = (MAX_RATING - MIN_RATING + 1) as usize;

/// Round to a fixed number of decimal places
fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Mean rating rounded to 2 decimals, `None` when there are no ratings
pub fn average_rating(ratings: &[i64]) -> Option<f64> {
    if ratings.is_empty() {
        return None;
    }

    let sum: i64 = ratings.iter().sum();
    Some(round_to(sum as f64 / ratings.len() as f64, 2))
}

/// Count ratings into the five buckets
pub fn rating_histogram(ratings: &[i64]) -> RatingHistogram {
    let mut counts = [0u64; BUCKETS];
    for &rating in ratings {
        if (MIN_RATING..=MAX_RATING).contains(&rating) {
            counts[(rating - MIN_RATING) as usize] += 1;
        }
    }

    RatingHistogram { counts }
}

/// Per-rating counts; index 0 holds rating 1
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingHistogram {
    counts: [u64; BUCKETS],
}

impl RatingHistogram {
    /// Count for one rating, zero for ratings outside the domain
    pub fn count(&self, rating: i64) -> u64 {
        if (MIN_RATING..=MAX_RATING).contains(&rating) {
            self.counts[(rating - MIN_RATING) as usize]
        } else {
            0
        }
    }

    pub fn counts(&self) -> &[u64; BUCKETS] {
        &self.counts
    }

    /// `(rating, count)` pairs for ratings 1 through 5
    pub fn buckets(&self) -> impl Iterator<Item = (i64, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .map(|(i, &count)| (MIN_RATING + i as i64, count))
    }

    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }

    /// Share of each bucket in percent, rounded to 1 decimal
    pub fn proportions(&self) -> [f64; BUCKETS] {
        let total = self.total();
        let mut shares = [0.0; BUCKETS];
        if total == 0 {
            return shares;
        }

        for (share, &count) in shares.iter_mut().zip(self.counts.iter()) {
            *share = round_to(count as f64 * 100.0 / total as f64, 1);
        }
        shares
    }
}

/// Everything the summary view shows for one course
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingSummary {
    pub course_id: i64,
    pub course_name: String,
    pub count: usize,
    pub average: Option<f64>,
    pub histogram: RatingHistogram,
    pub proportions: [f64; BUCKETS],
}

impl RatingSummary {
    pub fn from_ratings(course: &Course, ratings: &[i64]) -> Self {
        let histogram = rating_histogram(ratings);
        Self {
            course_id: course.id,
            course_name: course.name.clone(),
            count: ratings.len(),
            average: average_rating(ratings),
            proportions: histogram.proportions(),
            histogram,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rounds_to_two_decimals() {
        assert_eq!(average_rating(&[5, 4, 3]), Some(4.0));
        assert_eq!(average_rating(&[1, 1, 2]), Some(1.33));
        assert_eq!(average_rating(&[2, 3]), Some(2.5));
        assert_eq!(average_rating(&[5]), Some(5.0));
    }

    #[test]
    fn test_average_of_nothing() {
        assert_eq!(average_rating(&[]), None);
    }

    #[test]
    fn test_histogram_fills_missing_buckets() {
        let histogram = rating_histogram(&[1, 1, 5]);

        assert_eq!(histogram.counts(), &[2, 0, 0, 0, 1]);
        assert_eq!(histogram.count(1), 2);
        assert_eq!(histogram.count(3), 0);
        assert_eq!(histogram.count(5), 1);
        assert_eq!(histogram.total(), 3);

        let buckets: Vec<(i64, u64)> = histogram.buckets().collect();
        assert_eq!(buckets, vec![(1, 2), (2, 0), (3, 0), (4, 0), (5, 1)]);
    }

    #[test]
    fn test_histogram_ignores_out_of_range() {
        let histogram = rating_histogram(&[0, 6, -1, 3]);

        assert_eq!(histogram.counts(), &[0, 0, 1, 0, 0]);
        assert_eq!(histogram.count(0), 0);
        assert_eq!(histogram.count(6), 0);
    }

    #[test]
    fn test_proportions() {
        let shares = rating_histogram(&[1, 1, 5]).proportions();
        assert_eq!(shares, [66.7, 0.0, 0.0, 0.0, 33.3]);

        let empty = RatingHistogram::default().proportions();
        assert_eq!(empty, [0.0; 5]);
    }

    #[test]
    fn test_summary_from_ratings() {
        let course = Course {
            id: 7,
            name: "AI Fundamentals".to_string(),
        };

        let summary = RatingSummary::from_ratings(&course, &[5, 4, 3]);
        assert_eq!(summary.course_id, 7);
        assert_eq!(summary.course_name, "AI Fundamentals");
        assert_eq!(summary.count, 3);
        assert_eq!(summary.average, Some(4.0));
        assert_eq!(summary.histogram.counts(), &[0, 0, 1, 1, 1]);
        assert!(!summary.is_empty());

        let empty = RatingSummary::from_ratings(&course, &[]);
        assert!(empty.is_empty());
        assert_eq!(empty.average, None);
        assert_eq!(empty.proportions, [0.0; 5]);
    }

    #[test]
    fn test_summary_serializes_histogram_counts() {
        let course = Course {
            id: 1,
            name: "Cybersecurity".to_string(),
        };
        let summary = RatingSummary::from_ratings(&course, &[1, 1, 5]);

        let json = serde_json::to_value(&summary).unwrap();
        assert_eq!(json["histogram"]["counts"], serde_json::json!([2, 0, 0, 0, 1]));
        assert_eq!(json["average"], serde_json::json!(2.33));
    }
}
