//! `sitemap.xml` generation.

use crate::config::StorefrontConfig;
use crate::error::ServiceResult;
use maison_commerce::content::{ChangeFreq, SitemapEntry};
use maison_data::FetchClient;

/// Pages that exist regardless of catalog content.
pub fn static_entries() -> Vec<SitemapEntry> {
    [
        ("/", ChangeFreq::Daily, 1.0),
        ("/products", ChangeFreq::Daily, 0.9),
        ("/contact", ChangeFreq::Yearly, 0.3),
    ]
    .into_iter()
    .map(|(loc, freq, priority)| SitemapEntry {
        changefreq: Some(freq),
        priority: Some(priority),
        ..SitemapEntry::new(loc)
    })
    .collect()
}

/// Dynamic URLs (products, legal pages) known to the backend.
pub async fn fetch(client: &FetchClient) -> ServiceResult<Vec<SitemapEntry>> {
    Ok(client.get("/sitemap").send_data().await?)
}

/// Static entries followed by the backend's, rendered as XML.
pub async fn build(client: &FetchClient, config: &StorefrontConfig) -> ServiceResult<String> {
    let mut entries = static_entries();
    entries.extend(fetch(client).await?);
    tracing::debug!(urls = entries.len(), "sitemap built");
    Ok(render_xml(config, &entries))
}

/// Render entries as a sitemaps.org `urlset`. Relative locations are made
/// absolute against the site URL; duplicates keep their first occurrence.
pub fn render_xml(config: &StorefrontConfig, entries: &[SitemapEntry]) -> String {
    let mut seen = std::collections::HashSet::new();
    let mut xml = String::from(
        "<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n\
         <urlset xmlns=\"http://www.sitemaps.org/schemas/sitemap/0.9\">\n",
    );

    for entry in entries {
        let loc = config.absolute_url(&entry.loc);
        if !seen.insert(loc.clone()) {
            continue;
        }
        xml.push_str("  <url>\n");
        xml.push_str(&format!("    <loc>{}</loc>\n", xml_escape(&loc)));
        if let Some(lastmod) = entry.lastmod {
            xml.push_str(&format!("    <lastmod>{}</lastmod>\n", lastmod.format("%Y-%m-%d")));
        }
        if let Some(freq) = entry.changefreq {
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", freq.as_str()));
        }
        if let Some(priority) = entry.priority {
            xml.push_str(&format!("    <priority>{:.1}</priority>\n", priority.clamp(0.0, 1.0)));
        }
        xml.push_str("  </url>\n");
    }

    xml.push_str("</urlset>\n");
    xml
}

fn xml_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{client, mock};
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn config() -> StorefrontConfig {
        StorefrontConfig {
            site_url: "https://maison.in".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_xml() {
        let entries = vec![
            SitemapEntry {
                lastmod: Some(Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()),
                priority: Some(0.7),
                ..SitemapEntry::new("/products/a&b")
            },
            SitemapEntry::new("https://maison.in/products/a&b"),
        ];
        let xml = render_xml(&config(), &entries);
        assert!(xml.starts_with("<?xml"));
        assert!(xml.contains("<loc>https://maison.in/products/a&amp;b</loc>"));
        assert!(xml.contains("<lastmod>2024-06-01</lastmod>"));
        assert!(xml.contains("<priority>0.7</priority>"));
        assert_eq!(xml.matches("<url>").count(), 1);
        assert!(xml.trim_end().ends_with("</urlset>"));
    }

    #[tokio::test]
    async fn test_build_merges_static_and_backend() {
        let mock = mock();
        mock.push_json(200, json!([
            {"loc": "/products/kurta", "changefreq": "weekly"},
            {"loc": "/"}
        ]));
        let xml = build(&client(&mock), &config()).await.unwrap();
        assert_eq!(xml.matches("<url>").count(), 4);
        assert!(xml.contains("<loc>https://maison.in/products/kurta</loc>"));
        assert!(xml.contains("<changefreq>weekly</changefreq>"));
    }
}
