//! Customer testimonials shown on the homepage.

use crate::error::CommerceError;
use crate::ids::TestimonialId;
use crate::validate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: TestimonialId,
    pub author_name: String,
    #[serde(default)]
    pub author_location: Option<String>,
    pub quote: String,
    #[serde(default = "default_rating")]
    pub rating: u8,
    #[serde(default)]
    pub avatar_url: Option<String>,
    /// Display order, ascending.
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub published: bool,
}

fn default_rating() -> u8 {
    5
}

impl Testimonial {
    /// Up to two initials for the avatar placeholder.
    pub fn initials(&self) -> String {
        self.author_name
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

/// Published testimonials in display order.
pub fn published(testimonials: &[Testimonial]) -> Vec<Testimonial> {
    let mut out: Vec<Testimonial> = testimonials.iter().filter(|t| t.published).cloned().collect();
    out.sort_by_key(|t| t.position);
    out
}

/// Create or update body for the admin editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct TestimonialInput {
    pub author_name: String,
    #[serde(default)]
    pub author_location: Option<String>,
    pub quote: String,
    pub rating: u8,
    #[serde(default)]
    pub avatar_url: Option<String>,
    #[serde(default)]
    pub published: bool,
}

impl TestimonialInput {
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::length("authorName", &self.author_name, 2, 80),
            validate::length("quote", &self.quote, 10, 600),
            validate::rating("rating", self.rating),
        ])
    }
}

impl From<&Testimonial> for TestimonialInput {
    fn from(t: &Testimonial) -> Self {
        Self {
            author_name: t.author_name.clone(),
            author_location: t.author_location.clone(),
            quote: t.quote.clone(),
            rating: t.rating,
            avatar_url: t.avatar_url.clone(),
            published: t.published,
        }
    }
}

/// New display order: ids listed first to last.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reorder<I> {
    pub ids: Vec<I>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(id: &str, name: &str, position: u32, published: bool) -> Testimonial {
        Testimonial {
            id: TestimonialId::new(id),
            author_name: name.to_string(),
            author_location: None,
            quote: "Beautifully made.".to_string(),
            rating: 5,
            avatar_url: None,
            position,
            published,
        }
    }

    #[test]
    fn test_initials() {
        assert_eq!(t("1", "priya nair singh", 0, true).initials(), "PN");
        assert_eq!(t("1", "Zoe", 0, true).initials(), "Z");
        assert_eq!(t("1", "  ", 0, true).initials(), "");
    }

    #[test]
    fn test_published_sorted_by_position() {
        let all = vec![
            t("a", "A", 2, true),
            t("b", "B", 0, false),
            t("c", "C", 1, true),
        ];
        let ids: Vec<_> = published(&all).into_iter().map(|t| t.id.into_inner()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_input_validation() {
        let input = TestimonialInput::from(&t("a", "Anaya Rao", 0, true));
        assert!(input.validate().is_ok());
        let bad = TestimonialInput { rating: 7, ..input };
        assert_eq!(bad.validate().unwrap_err()[0].field(), Some("rating"));
    }
}
