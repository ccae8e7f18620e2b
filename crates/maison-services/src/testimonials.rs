//! Testimonials: public list plus the admin editor.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::ids::TestimonialId;
use maison_commerce::testimonial::{self, Reorder, Testimonial, TestimonialInput};
use maison_data::FetchClient;

/// Published testimonials in display order.
pub async fn published(client: &FetchClient) -> ServiceResult<Vec<Testimonial>> {
    let all: Vec<Testimonial> = client.get("/testimonials").send_data().await?;
    Ok(testimonial::published(&all))
}

/// Admin: every testimonial, drafts included, in display order.
pub async fn admin_list(client: &FetchClient) -> ServiceResult<Vec<Testimonial>> {
    let mut all: Vec<Testimonial> = client.get("/admin/testimonials").send_data().await?;
    all.sort_by_key(|t| t.position);
    Ok(all)
}

pub async fn create(client: &FetchClient, input: &TestimonialInput) -> ServiceResult<Testimonial> {
    input.validate()?;
    Ok(client
        .post("/admin/testimonials")
        .json(input)?
        .send_data()
        .await?)
}

pub async fn update(client: &FetchClient, id: &TestimonialId, input: &TestimonialInput) -> ServiceResult<Testimonial> {
    input.validate()?;
    Ok(client
        .put(format!("/admin/testimonials/{}", segment(id)))
        .json(input)?
        .send_data()
        .await?)
}

pub async fn delete(client: &FetchClient, id: &TestimonialId) -> ServiceResult<()> {
    client
        .delete(format!("/admin/testimonials/{}", segment(id)))
        .send()
        .await?
        .error_for_status()?;
    Ok(())
}

/// Persist a new display order, first to last.
pub async fn reorder(client: &FetchClient, ids: &[TestimonialId]) -> ServiceResult<Vec<Testimonial>> {
    let body = Reorder { ids: ids.to_vec() };
    let mut all: Vec<Testimonial> = client
        .put("/admin/testimonials/order")
        .json(&body)?
        .send_data()
        .await?;
    all.sort_by_key(|t| t.position);
    tracing::info!(count = ids.len(), "testimonials reordered");
    Ok(all)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, mock};
    use maison_data::Method;
    use serde_json::json;

    fn t(id: &str, position: u32, published: bool) -> serde_json::Value {
        json!({
            "id": id, "authorName": "Rhea Sen", "quote": "Exquisite tailoring.",
            "position": position, "published": published
        })
    }

    #[tokio::test]
    async fn test_published_filters_and_orders() {
        let mock = mock();
        mock.push_json(200, json!([t("a", 2, true), t("b", 1, false), t("c", 0, true)]));
        let list = published(&client(&mock)).await.unwrap();
        let ids: Vec<_> = list.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[tokio::test]
    async fn test_update_and_reorder() {
        let mock = mock();
        mock.push_json(200, t("a", 0, true));
        mock.push_json(200, json!([t("b", 1, true), t("a", 0, true)]));

        let input = TestimonialInput {
            author_name: "Rhea Sen".to_string(),
            quote: "Exquisite tailoring.".to_string(),
            rating: 5,
            published: true,
            ..Default::default()
        };
        update(&client(&mock), &TestimonialId::new("a"), &input).await.unwrap();
        let ordered = reorder(
            &client(&mock),
            &[TestimonialId::new("a"), TestimonialId::new("b")],
        )
        .await
        .unwrap();
        assert_eq!(ordered[0].id.as_str(), "a");

        let requests = mock.requests();
        assert_eq!(requests[0].method(), Method::Put);
        assert!(requests[0].url().ends_with("/admin/testimonials/a"));
        assert_eq!(requests[1].body_json().unwrap(), json!({"ids": ["a", "b"]}));
    }

    #[tokio::test]
    async fn test_create_validates() {
        let mock = mock();
        let err = create(&client(&mock), &TestimonialInput::default()).await.unwrap_err();
        assert_eq!(err.field_errors().len(), 3);
    }
}
