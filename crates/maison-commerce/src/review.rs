//! Product reviews.

use crate::error::CommerceError;
use crate::ids::{ProductId, ReviewId};
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub const MIN_REVIEW_BODY: usize = 10;
pub const MAX_REVIEW_BODY: usize = 2000;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: ReviewId,
    pub product_id: ProductId,
    pub author_name: String,
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
    #[serde(default)]
    pub verified_purchase: bool,
    pub created_at: DateTime<Utc>,
}

/// Review submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewReview {
    pub product_id: ProductId,
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    pub body: String,
}

impl NewReview {
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::rating("rating", self.rating),
            validate::length("body", &self.body, MIN_REVIEW_BODY, MAX_REVIEW_BODY),
            match &self.title {
                Some(t) => validate::length("title", t, 0, 120),
                None => Ok(()),
            },
        ])
    }
}

/// Rating aggregate shown above the review list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ReviewSummary {
    pub count: u32,
    pub average: f32,
    /// Count per star, index 0 is one star.
    pub histogram: [u32; 5],
}

impl ReviewSummary {
    /// Aggregate from individual reviews. Out-of-range ratings are skipped.
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let mut histogram = [0u32; 5];
        let mut sum = 0u32;
        for r in reviews.iter().filter(|r| (1..=5).contains(&r.rating)) {
            histogram[usize::from(r.rating - 1)] += 1;
            sum += u32::from(r.rating);
        }
        let count: u32 = histogram.iter().sum();
        let average = if count == 0 {
            0.0
        } else {
            sum as f32 / count as f32
        };
        Self {
            count,
            average,
            histogram,
        }
    }

    /// Share of reviews with `stars`, 0..=100.
    pub fn percent(&self, stars: u8) -> u8 {
        if self.count == 0 || !(1..=5).contains(&stars) {
            return 0;
        }
        let n = self.histogram[usize::from(stars - 1)];
        ((n * 100 + self.count / 2) / self.count) as u8
    }

    /// Average rounded to the nearest half star.
    pub fn rounded_average(&self) -> f32 {
        (self.average * 2.0).round() / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: u8) -> Review {
        Review {
            id: ReviewId::new(format!("r{}", rating)),
            product_id: ProductId::new("p1"),
            author_name: "Meera".to_string(),
            rating,
            title: None,
            body: "Lovely fabric and fit.".to_string(),
            verified_purchase: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_summary() {
        let reviews = vec![review(5), review(5), review(4), review(1), review(9)];
        let summary = ReviewSummary::from_reviews(&reviews);
        assert_eq!(summary.count, 4);
        assert_eq!(summary.histogram, [1, 0, 0, 1, 2]);
        assert!((summary.average - 3.75).abs() < f32::EPSILON);
        assert_eq!(summary.rounded_average(), 4.0);
        assert_eq!(summary.percent(5), 50);
        assert_eq!(summary.percent(0), 0);
    }

    #[test]
    fn test_empty_summary() {
        let summary = ReviewSummary::from_reviews(&[]);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.average, 0.0);
        assert_eq!(summary.percent(3), 0);
    }

    #[test]
    fn test_new_review_validation() {
        let ok = NewReview {
            product_id: ProductId::new("p1"),
            rating: 4,
            title: None,
            body: "Runs a little large.".to_string(),
        };
        assert!(ok.validate().is_ok());

        let bad = NewReview {
            rating: 0,
            body: "meh".to_string(),
            ..ok
        };
        let errors = bad.validate().unwrap_err();
        assert_eq!(errors.len(), 2);
    }
}
