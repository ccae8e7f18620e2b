//! Content managed from the admin dashboard: navigation, homepage sections,
//! legal pages and sitemap entries.

use crate::error::CommerceError;
use crate::ids::{LegalPageId, NavItemId, SectionId};
use crate::validate;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Maximum nesting of the navigation menu (top level plus one submenu).
pub const MAX_NAV_DEPTH: usize = 2;

/// A navigation entry. Children form the dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavItem {
    pub id: NavItemId,
    pub label: String,
    pub href: String,
    #[serde(default)]
    pub position: u32,
    #[serde(default)]
    pub children: Vec<NavItem>,
}

impl NavItem {
    pub fn new(label: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            id: NavItemId::generate(),
            label: label.into(),
            href: href.into(),
            position: 0,
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<NavItem>) -> Self {
        self.children = children;
        renumber(&mut self.children);
        self
    }

    /// Whether `path` is this item or one of its descendants, for highlighting.
    pub fn is_active(&self, path: &str) -> bool {
        path_matches(&self.href, path) || self.children.iter().any(|c| c.is_active(path))
    }
}

fn path_matches(href: &str, path: &str) -> bool {
    if href == "/" {
        return path == "/";
    }
    path == href || path.starts_with(&format!("{}/", href.trim_end_matches('/')))
}

/// Sort each level by `position`, recursively.
pub fn sort_tree(items: &mut [NavItem]) {
    items.sort_by_key(|i| i.position);
    for item in items.iter_mut() {
        sort_tree(&mut item.children);
    }
}

/// Rewrite `position` to match the current order at every level.
pub fn renumber(items: &mut [NavItem]) {
    for (i, item) in items.iter_mut().enumerate() {
        item.position = i as u32;
        renumber(&mut item.children);
    }
}

/// Find an item anywhere in the tree.
pub fn find<'a>(items: &'a [NavItem], id: &NavItemId) -> Option<&'a NavItem> {
    items.iter().find_map(|item| {
        if &item.id == id {
            Some(item)
        } else {
            find(&item.children, id)
        }
    })
}

/// Remove an item (and its children) anywhere in the tree.
pub fn remove(items: &mut Vec<NavItem>, id: &NavItemId) -> Option<NavItem> {
    if let Some(pos) = items.iter().position(|i| &i.id == id) {
        let removed = items.remove(pos);
        renumber(items);
        return Some(removed);
    }
    items.iter_mut().find_map(|item| remove(&mut item.children, id))
}

/// Validate labels, links and nesting depth before saving.
pub fn validate_tree(items: &[NavItem]) -> Result<(), Vec<CommerceError>> {
    fn walk(items: &[NavItem], depth: usize, errors: &mut Vec<CommerceError>) {
        for item in items {
            if depth > MAX_NAV_DEPTH {
                errors.push(CommerceError::validation(
                    "children",
                    format!("{:?} is nested too deeply", item.label),
                ));
                continue;
            }
            if let Err(e) = validate::length("label", &item.label, 1, 40) {
                errors.push(e);
            }
            if let Err(e) = validate::link("href", &item.href) {
                errors.push(e);
            }
            walk(&item.children, depth + 1, errors);
        }
    }

    let mut errors = Vec::new();
    walk(items, 1, &mut errors);
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Homepage section content, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum HomeSection {
    #[serde(rename_all = "camelCase")]
    Hero {
        headline: String,
        #[serde(default)]
        subheadline: Option<String>,
        #[serde(default)]
        image_url: Option<String>,
        cta_text: String,
        cta_url: String,
    },
    /// Product carousel fed by a collection.
    #[serde(rename_all = "camelCase")]
    ProductCarousel {
        title: String,
        collection: String,
        #[serde(default = "default_limit")]
        limit: u32,
    },
    #[serde(rename_all = "camelCase")]
    Banner {
        image_url: String,
        #[serde(default)]
        title: Option<String>,
        #[serde(default)]
        link: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Testimonials { title: String },
    #[serde(rename_all = "camelCase")]
    SocialFeed {
        title: String,
        #[serde(default)]
        handle: Option<String>,
    },
}

fn default_limit() -> u32 {
    12
}

impl HomeSection {
    pub fn kind(&self) -> &'static str {
        match self {
            HomeSection::Hero { .. } => "hero",
            HomeSection::ProductCarousel { .. } => "product-carousel",
            HomeSection::Banner { .. } => "banner",
            HomeSection::Testimonials { .. } => "testimonials",
            HomeSection::SocialFeed { .. } => "social-feed",
        }
    }

    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        match self {
            HomeSection::Hero {
                headline,
                cta_text,
                cta_url,
                ..
            } => validate::collect([
                validate::length("headline", headline, 1, 120),
                validate::required("ctaText", cta_text),
                validate::link("ctaUrl", cta_url),
            ]),
            HomeSection::ProductCarousel {
                title,
                collection,
                limit,
            } => validate::collect([
                validate::required("title", title),
                validate::slug("collection", collection),
                if (1..=48).contains(limit) {
                    Ok(())
                } else {
                    Err(CommerceError::validation("limit", "must be between 1 and 48"))
                },
            ]),
            HomeSection::Banner { image_url, link, .. } => validate::collect([
                validate::required("imageUrl", image_url),
                match link {
                    Some(l) => validate::link("link", l),
                    None => Ok(()),
                },
            ]),
            HomeSection::Testimonials { title } | HomeSection::SocialFeed { title, .. } => {
                validate::collect([validate::required("title", title)])
            }
        }
    }
}

/// A homepage slot: ordering and visibility around its content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomeSectionEntry {
    pub id: SectionId,
    #[serde(default)]
    pub position: u32,
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(flatten)]
    pub section: HomeSection,
}

fn default_enabled() -> bool {
    true
}

/// Enabled sections in display order.
pub fn visible_sections(entries: &[HomeSectionEntry]) -> Vec<&HomeSectionEntry> {
    let mut out: Vec<_> = entries.iter().filter(|e| e.enabled).collect();
    out.sort_by_key(|e| e.position);
    out
}

/// A legal or policy page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LegalPage {
    pub id: LegalPageId,
    pub slug: String,
    pub title: String,
    /// Markdown body.
    pub body: String,
    pub updated_at: DateTime<Utc>,
}

/// Admin create-or-replace body, keyed by slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct LegalPageInput {
    pub slug: String,
    pub title: String,
    pub body: String,
}

impl LegalPageInput {
    pub fn validate(&self) -> Result<(), Vec<CommerceError>> {
        validate::collect([
            validate::slug("slug", &self.slug),
            validate::length("title", &self.title, 2, 120),
            validate::required("body", &self.body),
        ])
    }
}

/// How often a URL is expected to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFreq {
    Always,
    Hourly,
    Daily,
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFreq {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFreq::Always => "always",
            ChangeFreq::Hourly => "hourly",
            ChangeFreq::Daily => "daily",
            ChangeFreq::Weekly => "weekly",
            ChangeFreq::Monthly => "monthly",
            ChangeFreq::Yearly => "yearly",
            ChangeFreq::Never => "never",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    /// Absolute URL or site-relative path.
    pub loc: String,
    #[serde(default)]
    pub lastmod: Option<DateTime<Utc>>,
    #[serde(default)]
    pub changefreq: Option<ChangeFreq>,
    #[serde(default)]
    pub priority: Option<f32>,
}

impl SitemapEntry {
    pub fn new(loc: impl Into<String>) -> Self {
        Self {
            loc: loc.into(),
            lastmod: None,
            changefreq: None,
            priority: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav() -> Vec<NavItem> {
        vec![
            NavItem::new("Home", "/"),
            NavItem::new("Women", "/products?collection=women").with_children(vec![
                NavItem::new("Dresses", "/products?collection=dresses"),
                NavItem::new("Sarees", "/products?collection=sarees"),
            ]),
            NavItem::new("Contact", "/contact"),
        ]
    }

    #[test]
    fn test_sort_and_renumber() {
        let mut items = nav();
        items[0].position = 5;
        items[1].position = 1;
        items[2].position = 3;
        sort_tree(&mut items);
        let labels: Vec<_> = items.iter().map(|i| i.label.as_str()).collect();
        assert_eq!(labels, vec!["Women", "Contact", "Home"]);

        renumber(&mut items);
        assert_eq!(items.iter().map(|i| i.position).collect::<Vec<_>>(), vec![0, 1, 2]);
        assert_eq!(items[0].children[1].position, 1);
    }

    #[test]
    fn test_find_and_remove_nested() {
        let mut items = nav();
        let sarees = items[1].children[1].id.clone();
        assert_eq!(find(&items, &sarees).unwrap().label, "Sarees");
        let removed = remove(&mut items, &sarees).unwrap();
        assert_eq!(removed.label, "Sarees");
        assert!(find(&items, &sarees).is_none());
        assert_eq!(items[1].children.len(), 1);
    }

    #[test]
    fn test_validate_tree_depth_and_links() {
        assert!(validate_tree(&nav()).is_ok());

        let mut items = nav();
        items[1].children[0].children = vec![NavItem::new("Too deep", "/x")];
        items[2].href = "contact".to_string();
        let errors = validate_tree(&items).unwrap_err();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_is_active() {
        let contact = NavItem::new("Contact", "/contact");
        assert!(contact.is_active("/contact"));
        assert!(!contact.is_active("/contacts"));
        let home = NavItem::new("Home", "/");
        assert!(!home.is_active("/cart"));
        let legal = NavItem::new("Legal", "/legal");
        assert!(legal.is_active("/legal/privacy"));
    }

    #[test]
    fn test_home_section_wire_format() {
        let json = serde_json::json!({
            "id": "s1",
            "position": 2,
            "type": "product-carousel",
            "title": "New In",
            "collection": "new-in"
        });
        let entry: HomeSectionEntry = serde_json::from_value(json).unwrap();
        assert!(entry.enabled);
        assert_eq!(entry.section.kind(), "product-carousel");
        assert_eq!(
            entry.section,
            HomeSection::ProductCarousel {
                title: "New In".to_string(),
                collection: "new-in".to_string(),
                limit: 12
            }
        );
        let back = serde_json::to_value(&entry).unwrap();
        assert_eq!(back["type"], "product-carousel");
    }

    #[test]
    fn test_visible_sections_order() {
        let mk = |id: &str, position, enabled| HomeSectionEntry {
            id: SectionId::new(id),
            position,
            enabled,
            section: HomeSection::Testimonials { title: "Loved".into() },
        };
        let entries = vec![mk("a", 3, true), mk("b", 1, false), mk("c", 0, true)];
        let ids: Vec<_> = visible_sections(&entries).iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
    }

    #[test]
    fn test_section_validation() {
        let hero = HomeSection::Hero {
            headline: "Summer Linen".into(),
            subheadline: None,
            image_url: None,
            cta_text: "Shop".into(),
            cta_url: "shop".into(),
        };
        assert_eq!(hero.validate().unwrap_err()[0].field(), Some("ctaUrl"));
    }

    #[test]
    fn test_legal_input_validation() {
        let input = LegalPageInput {
            slug: "returns-policy".into(),
            title: "Returns".into(),
            body: "30 days.".into(),
        };
        assert!(input.validate().is_ok());
        let bad = LegalPageInput { slug: "Returns Policy".into(), ..input };
        assert!(bad.validate().is_err());
    }
}
