//! Catalog types: products, listing queries and paged results.

use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A product image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub url: String,
    #[serde(default)]
    pub alt: Option<String>,
}

/// A product as listed in the storefront.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// URL slug, unique per product.
    pub handle: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    pub price: Money,
    /// Original price, shown struck through when higher than `price`.
    #[serde(default)]
    pub compare_at_price: Option<Money>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub collection: Option<String>,
    #[serde(default = "default_available")]
    pub available: bool,
    #[serde(default)]
    pub average_rating: Option<f32>,
}

fn default_available() -> bool {
    true
}

impl Product {
    /// First image, used on cards and in the cart.
    pub fn featured_image(&self) -> Option<&ProductImage> {
        self.images.first()
    }

    /// Second image, shown on hover.
    pub fn hover_image(&self) -> Option<&ProductImage> {
        self.images.get(1)
    }

    /// Whether the product is discounted.
    pub fn is_on_sale(&self) -> bool {
        self.discount_percent().is_some()
    }

    pub fn discount_percent(&self) -> Option<u8> {
        self.compare_at_price
            .as_ref()
            .and_then(|compare| self.price.percent_off(compare))
    }

    /// Whether `size` is one of the offered sizes. Products without sizes
    /// accept no size.
    pub fn offers_size(&self, size: Option<&str>) -> bool {
        match size {
            None => self.sizes.is_empty(),
            Some(s) => self.sizes.iter().any(|offered| offered == s),
        }
    }

    pub fn offers_color(&self, color: Option<&str>) -> bool {
        match color {
            None => self.colors.is_empty(),
            Some(c) => self.colors.iter().any(|offered| offered.eq_ignore_ascii_case(c)),
        }
    }

    pub fn url(&self) -> String {
        format!("/products/{}", self.handle)
    }
}

/// Listing sort order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Merchandiser order.
    #[default]
    Featured,
    Newest,
    PriceAsc,
    PriceDesc,
    BestSelling,
    Rating,
}

impl SortOption {
    pub const ALL: [SortOption; 6] = [
        SortOption::Featured,
        SortOption::Newest,
        SortOption::PriceAsc,
        SortOption::PriceDesc,
        SortOption::BestSelling,
        SortOption::Rating,
    ];

    /// Query-string value.
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOption::Featured => "featured",
            SortOption::Newest => "newest",
            SortOption::PriceAsc => "price-asc",
            SortOption::PriceDesc => "price-desc",
            SortOption::BestSelling => "best-selling",
            SortOption::Rating => "rating",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|o| o.as_str() == s)
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            SortOption::Featured => "Featured",
            SortOption::Newest => "Newest",
            SortOption::PriceAsc => "Price: Low to High",
            SortOption::PriceDesc => "Price: High to Low",
            SortOption::BestSelling => "Best Selling",
            SortOption::Rating => "Highest Rated",
        }
    }
}

/// Product listing query, serialized into the request's query string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductQuery {
    pub collection: Option<String>,
    pub search: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    /// Minor units.
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub sort: SortOption,
    /// 1-indexed.
    pub page: u32,
    pub per_page: u32,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            collection: None,
            search: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            min_price: None,
            max_price: None,
            sort: SortOption::Featured,
            page: 1,
            per_page: 24,
        }
    }
}

impl ProductQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn in_collection(mut self, collection: impl Into<String>) -> Self {
        self.collection = Some(collection.into());
        self
    }

    /// Set the text search. Blank input clears it.
    pub fn with_search(mut self, q: impl Into<String>) -> Self {
        let q = q.into();
        let q = q.trim();
        self.search = (!q.is_empty()).then(|| q.to_string());
        self.page = 1;
        self
    }

    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self.page = 1;
        self
    }

    pub fn with_price_range(mut self, min: Option<i64>, max: Option<i64>) -> Self {
        // Swapped bounds are a common slider artefact.
        match (min, max) {
            (Some(lo), Some(hi)) if lo > hi => {
                self.min_price = Some(hi);
                self.max_price = Some(lo);
            }
            _ => {
                self.min_price = min;
                self.max_price = max;
            }
        }
        self.page = 1;
        self
    }

    pub fn with_pagination(mut self, page: u32, per_page: u32) -> Self {
        self.page = page.max(1);
        self.per_page = per_page.clamp(1, 100);
        self
    }

    /// Add the size if absent, remove it if present.
    pub fn toggle_size(&mut self, size: &str) {
        toggle(&mut self.sizes, size);
        self.page = 1;
    }

    pub fn toggle_color(&mut self, color: &str) {
        toggle(&mut self.colors, color);
        self.page = 1;
    }

    /// Number of filters the shopper has applied (sort and paging excluded).
    pub fn active_filter_count(&self) -> usize {
        self.sizes.len()
            + self.colors.len()
            + usize::from(self.min_price.is_some() || self.max_price.is_some())
            + usize::from(self.search.is_some())
    }

    /// Drop all filters, keeping the collection and sort.
    pub fn clear_filters(&mut self) {
        self.sizes.clear();
        self.colors.clear();
        self.min_price = None;
        self.max_price = None;
        self.search = None;
        self.page = 1;
    }

    /// Query-string pairs for the listing endpoint. Defaults are omitted.
    pub fn to_query_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::new();
        if let Some(c) = &self.collection {
            pairs.push(("collection".to_string(), c.clone()));
        }
        if let Some(q) = &self.search {
            pairs.push(("q".to_string(), q.clone()));
        }
        if !self.sizes.is_empty() {
            pairs.push(("size".to_string(), self.sizes.join(",")));
        }
        if !self.colors.is_empty() {
            pairs.push(("color".to_string(), self.colors.join(",")));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice".to_string(), min.to_string()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice".to_string(), max.to_string()));
        }
        if self.sort != SortOption::Featured {
            pairs.push(("sort".to_string(), self.sort.as_str().to_string()));
        }
        if self.page > 1 {
            pairs.push(("page".to_string(), self.page.to_string()));
        }
        pairs.push(("perPage".to_string(), self.per_page.to_string()));
        pairs
    }

    /// Rebuild a query from URL query-string pairs. Unknown keys are ignored.
    pub fn from_query_pairs<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let mut query = Self::default();
        let split = |v: &str| -> Vec<String> {
            v.split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        };
        for (key, value) in pairs {
            match key {
                "collection" if !value.is_empty() => query.collection = Some(value.to_string()),
                "q" => query = query.with_search(value),
                "size" => query.sizes = split(value),
                "color" => query.colors = split(value),
                "minPrice" => query.min_price = value.parse().ok(),
                "maxPrice" => query.max_price = value.parse().ok(),
                "sort" => query.sort = SortOption::from_str(value).unwrap_or_default(),
                "page" => query.page = value.parse().unwrap_or(1).max(1),
                "perPage" => query.per_page = value.parse().unwrap_or(24).clamp(1, 100),
                _ => {}
            }
        }
        query
    }
}

fn toggle(values: &mut Vec<String>, value: &str) {
    if let Some(pos) = values.iter().position(|v| v == value) {
        values.remove(pos);
    } else {
        values.push(value.to_string());
    }
}

/// One page of results plus pagination metadata.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub items: Vec<T>,
    /// 1-indexed.
    pub page: u32,
    pub per_page: u32,
    pub total: u64,
}

impl<T> Default for Page<T> {
    fn default() -> Self {
        Self::empty()
    }
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, page: u32, per_page: u32, total: u64) -> Self {
        Self {
            items,
            page: page.max(1),
            per_page: per_page.max(1),
            total,
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), 1, 24, 0)
    }

    /// At least 1, so an empty listing still reads as "page 1 of 1".
    pub fn total_pages(&self) -> u32 {
        if self.total == 0 {
            return 1;
        }
        let pages = self.total.div_ceil(u64::from(self.per_page));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages()
    }

    pub fn has_prev(&self) -> bool {
        self.page > 1
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Page numbers to show in a pager, a window of at most `max_visible`
    /// centred on the current page.
    pub fn page_numbers(&self, max_visible: u32) -> Vec<u32> {
        let total_pages = self.total_pages();
        let max_visible = max_visible.max(1);
        if total_pages <= max_visible {
            return (1..=total_pages).collect();
        }

        let half = max_visible / 2;
        let start = self.page.saturating_sub(half).max(1);
        let end = (start + max_visible - 1).min(total_pages);
        let start = (end + 1).saturating_sub(max_visible).max(1);

        (start..=end).collect()
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            per_page: self.per_page,
            total: self.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::Currency;

    fn product() -> Product {
        Product {
            id: ProductId::new("p1"),
            handle: "linen-shirt".to_string(),
            title: "Linen Shirt".to_string(),
            description: String::new(),
            images: vec![
                ProductImage { url: "/a.jpg".to_string(), alt: None },
                ProductImage { url: "/b.jpg".to_string(), alt: None },
            ],
            price: Money::new(149_900, Currency::INR),
            compare_at_price: Some(Money::new(199_900, Currency::INR)),
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["Ivory".to_string()],
            tags: vec![],
            collection: Some("summer".to_string()),
            available: true,
            average_rating: None,
        }
    }

    #[test]
    fn test_product_helpers() {
        let p = product();
        assert_eq!(p.featured_image().unwrap().url, "/a.jpg");
        assert_eq!(p.hover_image().unwrap().url, "/b.jpg");
        assert!(p.is_on_sale());
        assert_eq!(p.discount_percent(), Some(25));
        assert!(p.offers_size(Some("M")));
        assert!(!p.offers_size(Some("XL")));
        assert!(!p.offers_size(None));
        assert!(p.offers_color(Some("ivory")));
        assert_eq!(p.url(), "/products/linen-shirt");
    }

    #[test]
    fn test_product_decodes_with_defaults() {
        let json = serde_json::json!({
            "id": "p9",
            "handle": "scarf",
            "title": "Silk Scarf",
            "price": {"amount": 89900, "currencyCode": "INR"}
        });
        let p: Product = serde_json::from_value(json).unwrap();
        assert!(p.available);
        assert!(p.images.is_empty());
        assert!(p.offers_size(None));
    }

    #[test]
    fn test_query_pairs_omit_defaults() {
        let pairs = ProductQuery::new().to_query_pairs();
        assert_eq!(pairs, vec![("perPage".to_string(), "24".to_string())]);
    }

    #[test]
    fn test_query_pairs_full() {
        let mut q = ProductQuery::new()
            .in_collection("dresses")
            .with_search("  midi ")
            .with_sort(SortOption::PriceAsc)
            .with_price_range(Some(500_000), Some(100_000));
        q.toggle_size("S");
        q.toggle_size("M");
        q.toggle_color("Black");
        q = q.with_pagination(3, 12);

        let pairs = q.to_query_pairs();
        let get = |k: &str| pairs.iter().find(|(key, _)| key == k).map(|(_, v)| v.as_str());
        assert_eq!(get("collection"), Some("dresses"));
        assert_eq!(get("q"), Some("midi"));
        assert_eq!(get("size"), Some("S,M"));
        assert_eq!(get("color"), Some("Black"));
        assert_eq!(get("minPrice"), Some("100000"));
        assert_eq!(get("maxPrice"), Some("500000"));
        assert_eq!(get("sort"), Some("price-asc"));
        assert_eq!(get("page"), Some("3"));
        assert_eq!(get("perPage"), Some("12"));
        assert_eq!(q.active_filter_count(), 5);
    }

    #[test]
    fn test_query_from_pairs() {
        let q = ProductQuery::from_query_pairs([
            ("collection", "knitwear"),
            ("size", "S, L,"),
            ("sort", "newest"),
            ("page", "0"),
            ("perPage", "1000"),
            ("utm_source", "mail"),
        ]);
        assert_eq!(q.collection.as_deref(), Some("knitwear"));
        assert_eq!(q.sizes, vec!["S", "L"]);
        assert_eq!(q.sort, SortOption::Newest);
        assert_eq!(q.page, 1);
        assert_eq!(q.per_page, 100);
    }

    #[test]
    fn test_toggle_and_clear_filters() {
        let mut q = ProductQuery::new().with_pagination(4, 24);
        q.toggle_size("M");
        assert_eq!(q.page, 1);
        q.toggle_size("M");
        assert!(q.sizes.is_empty());
        q.toggle_color("Red");
        q.clear_filters();
        assert_eq!(q.active_filter_count(), 0);
    }

    #[test]
    fn test_page_math() {
        let page: Page<u8> = Page::new(vec![1, 2], 2, 24, 50);
        assert_eq!(page.total_pages(), 3);
        assert!(page.has_next());
        assert!(page.has_prev());

        let empty: Page<u8> = Page::empty();
        assert_eq!(empty.total_pages(), 1);
        assert!(!empty.has_next());
    }

    #[test]
    fn test_page_numbers_window() {
        let page: Page<u8> = Page::new(vec![], 10, 10, 200);
        assert_eq!(page.page_numbers(5), vec![8, 9, 10, 11, 12]);

        let first: Page<u8> = Page::new(vec![], 1, 10, 200);
        assert_eq!(first.page_numbers(5), vec![1, 2, 3, 4, 5]);

        let last: Page<u8> = Page::new(vec![], 20, 10, 200);
        assert_eq!(last.page_numbers(5), vec![16, 17, 18, 19, 20]);

        let small: Page<u8> = Page::new(vec![], 1, 10, 25);
        assert_eq!(small.page_numbers(5), vec![1, 2, 3]);
    }
}
