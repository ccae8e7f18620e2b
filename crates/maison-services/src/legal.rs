//! Legal and policy pages.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::content::{LegalPage, LegalPageInput};
use maison_data::FetchClient;

/// A page by slug, or `None` when it does not exist.
pub async fn by_slug(client: &FetchClient, slug: &str) -> ServiceResult<Option<LegalPage>> {
    match client
        .get(format!("/legal/{}", segment(slug)))
        .send_data::<LegalPage>()
        .await
    {
        Ok(page) => Ok(Some(page)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// All pages, by title.
pub async fn list(client: &FetchClient) -> ServiceResult<Vec<LegalPage>> {
    let mut pages: Vec<LegalPage> = client.get("/legal").send_data().await?;
    pages.sort_by(|a, b| a.title.cmp(&b.title));
    Ok(pages)
}

/// Admin: create or replace the page at `input.slug`.
pub async fn upsert(client: &FetchClient, input: &LegalPageInput) -> ServiceResult<LegalPage> {
    input.validate()?;
    let page: LegalPage = client
        .put(format!("/admin/legal/{}", segment(&input.slug)))
        .json(input)?
        .send_data()
        .await?;
    tracing::info!(slug = %page.slug, "legal page saved");
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, mock};
    use serde_json::json;

    fn page_json(slug: &str, title: &str) -> serde_json::Value {
        json!({
            "id": format!("lp-{}", slug), "slug": slug, "title": title,
            "body": "...", "updatedAt": "2024-04-01T00:00:00Z"
        })
    }

    #[tokio::test]
    async fn test_by_slug_and_list() {
        let mock = mock();
        mock.push_json(404, json!({"message": "Not found"}));
        mock.push_json(200, json!([page_json("terms", "Terms"), page_json("privacy", "Privacy")]));

        assert!(by_slug(&client(&mock), "missing").await.unwrap().is_none());
        let pages = list(&client(&mock)).await.unwrap();
        assert_eq!(pages[0].slug, "privacy");
    }

    #[tokio::test]
    async fn test_upsert() {
        let mock = mock();
        mock.push_json(200, page_json("shipping", "Shipping"));
        let input = LegalPageInput {
            slug: "shipping".to_string(),
            title: "Shipping".to_string(),
            body: "Free over \u{20b9}2,000.".to_string(),
        };
        upsert(&client(&mock), &input).await.unwrap();
        assert!(mock.last_request().unwrap().url().ends_with("/admin/legal/shipping"));
    }
}
