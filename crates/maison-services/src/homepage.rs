//! Homepage sections.

use crate::error::ServiceResult;
use crate::segment;
use maison_commerce::content::{HomeSection, HomeSectionEntry};
use maison_commerce::ids::SectionId;
use maison_data::FetchClient;
use serde::Serialize;

#[derive(Serialize)]
struct SectionUpdate<'a> {
    enabled: bool,
    #[serde(flatten)]
    section: &'a HomeSection,
}

/// All sections in display order, disabled ones included.
pub async fn sections(client: &FetchClient) -> ServiceResult<Vec<HomeSectionEntry>> {
    let mut entries: Vec<HomeSectionEntry> = client.get("/homepage").send_data().await?;
    entries.sort_by_key(|e| e.position);
    Ok(entries)
}

/// Admin: replace one section's content and visibility.
pub async fn update_section(
    client: &FetchClient,
    id: &SectionId,
    section: &HomeSection,
    enabled: bool,
) -> ServiceResult<HomeSectionEntry> {
    section.validate()?;
    let entry: HomeSectionEntry = client
        .put(format!("/admin/homepage/{}", segment(id)))
        .json(&SectionUpdate { enabled, section })?
        .send_data()
        .await?;
    tracing::info!(section_id = %id, kind = section.kind(), "homepage section updated");
    Ok(entry)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, mock};
    use serde_json::json;

    #[tokio::test]
    async fn test_sections_sorted() {
        let mock = mock();
        mock.push_json(200, json!([
            {"id": "s2", "position": 1, "type": "testimonials", "title": "Loved by you"},
            {"id": "s1", "position": 0, "type": "hero", "headline": "Monsoon Edit",
             "ctaText": "Shop now", "ctaUrl": "/products"}
        ]));
        let entries = sections(&client(&mock)).await.unwrap();
        assert_eq!(entries[0].section.kind(), "hero");
    }

    #[tokio::test]
    async fn test_update_section_body() {
        let mock = mock();
        mock.push_json(200, json!({
            "id": "s3", "position": 2, "enabled": false,
            "type": "banner", "imageUrl": "/b.jpg"
        }));
        let section = HomeSection::Banner {
            image_url: "/b.jpg".to_string(),
            title: None,
            link: None,
        };
        let entry = update_section(&client(&mock), &SectionId::new("s3"), &section, false)
            .await
            .unwrap();
        assert!(!entry.enabled);

        let body = mock.last_request().unwrap().body_json().unwrap();
        assert_eq!(body["type"], "banner");
        assert_eq!(body["enabled"], false);
        assert_eq!(body["imageUrl"], "/b.jpg");
    }
}
