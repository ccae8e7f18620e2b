//! Product reviews.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::ids::{ProductId, ReviewId};
use maison_commerce::review::{NewReview, Review, ReviewSummary};
use maison_data::FetchClient;

/// Reviews for a product, newest first, with their summary.
pub async fn for_product(client: &FetchClient, product_id: &ProductId) -> ServiceResult<(Vec<Review>, ReviewSummary)> {
    let mut reviews: Vec<Review> = client
        .get(format!("/products/{}/reviews", segment(product_id)))
        .send_data()
        .await?;
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    let summary = ReviewSummary::from_reviews(&reviews);
    Ok((reviews, summary))
}

pub async fn create(client: &FetchClient, review: &NewReview) -> ServiceResult<Review> {
    review.validate()?;
    let created: Review = client.post("/reviews").json(review)?.send_data().await?;
    tracing::info!(product_id = %review.product_id, rating = review.rating, "review submitted");
    Ok(created)
}

/// Admin: remove a review.
pub async fn delete(client: &FetchClient, id: &ReviewId) -> ServiceResult<()> {
    client
        .delete(format!("/admin/reviews/{}", segment(id)))
        .send()
        .await?
        .error_for_status()?;
    tracing::info!(review_id = %id, "review deleted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, mock};
    use serde_json::json;

    fn review_json(id: &str, rating: u8, at: &str) -> serde_json::Value {
        json!({
            "id": id, "productId": "p1", "authorName": "Ira", "rating": rating,
            "body": "Gorgeous colour.", "createdAt": at
        })
    }

    #[tokio::test]
    async fn test_for_product_sorts_and_summarizes() {
        let mock = mock();
        mock.push_json(200, json!({"data": [
            review_json("r1", 4, "2024-01-01T00:00:00Z"),
            review_json("r2", 2, "2024-02-01T00:00:00Z"),
        ]}));
        let (reviews, summary) = for_product(&client(&mock), &ProductId::new("p1")).await.unwrap();
        assert_eq!(reviews[0].id.as_str(), "r2");
        assert_eq!(summary.count, 2);
        assert!((summary.average - 3.0).abs() < f32::EPSILON);
    }

    #[tokio::test]
    async fn test_create_and_delete() {
        let mock = mock();
        mock.push_json(201, review_json("r3", 5, "2024-03-01T00:00:00Z"));
        mock.push_empty();

        let new = NewReview {
            product_id: ProductId::new("p1"),
            rating: 5,
            title: Some("Perfect".to_string()),
            body: "Fits true to size.".to_string(),
        };
        let created = create(&client(&mock), &new).await.unwrap();
        assert_eq!(created.rating, 5);
        delete(&client(&mock), &created.id).await.unwrap();
        assert!(mock.last_request().unwrap().url().ends_with("/admin/reviews/r3"));

        let bad = NewReview { rating: 9, ..new };
        assert!(create(&client(&mock), &bad).await.is_err());
        assert_eq!(mock.requests().len(), 2);
    }
}
