//! Social feed, fetched through the configured proxy.
//!
//! The proxy key lives only in server configuration; this module runs in
//! server functions and the key never reaches the browser.

use crate::config::StorefrontConfig;
use crate::error::{ServiceError, ServiceResult};
use maison_commerce::social::SocialPost;
use maison_data::FetchClient;

/// Header carrying the proxy key.
pub const API_KEY_HEADER: &str = "X-Api-Key";

/// Latest posts, at most `limit`. An unconfigured feed is an error the
/// homepage treats as "hide the section".
pub async fn feed(client: &FetchClient, config: &StorefrontConfig, limit: usize) -> ServiceResult<Vec<SocialPost>> {
    let url = config
        .social_feed_url
        .as_deref()
        .ok_or(ServiceError::NotConfigured("social_feed_url"))?;

    let mut request = client.get(url);
    match &config.social_feed_api_key {
        Some(key) => request = request.header(API_KEY_HEADER, key.clone()),
        None => tracing::warn!("social feed key missing, calling proxy without it"),
    }

    let mut posts: Vec<SocialPost> = request.send_data().await?;
    posts.truncate(limit);
    Ok(posts)
}
