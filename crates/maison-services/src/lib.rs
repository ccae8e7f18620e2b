//! Backend API calls for the Maison storefront.
//!
//! One module per resource. Every call takes the request-scoped
//! [`FetchClient`] (which carries the shopper's cookie), validates its input
//! locally, and returns [`ServiceResult`]. There is no retry or caching at
//! this layer; the last response wins.
//!
//! ```rust,ignore
//! use maison_services::{products, StorefrontConfig};
//!
//! let config = StorefrontConfig::from_env()?;
//! let client = config.client().with_cookie(cookie);
//! let page = products::list(&client, &ProductQuery::new().in_collection("linen")).await?;
//! ```

pub mod config;
pub mod error;

pub mod auth;
pub mod cart;
pub mod homepage;
pub mod inquiries;
pub mod legal;
pub mod navbar;
pub mod orders;
pub mod products;
pub mod reviews;
pub mod sitemap;
pub mod social;
pub mod testimonials;
pub mod users;
pub mod wishlist;

pub use config::StorefrontConfig;
pub use error::{ServiceError, ServiceResult};

/// Encode a value for use as a single path segment.
pub(crate) fn segment(value: impl AsRef<str>) -> String {
    urlencoding::encode(value.as_ref()).into_owned()
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_segment_encodes_separators() {
        assert_eq!(segment("linen-shirt"), "linen-shirt");
        assert_eq!(segment("a/b c"), "a%2Fb%20c");
    }
}
