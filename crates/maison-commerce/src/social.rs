//! Social feed posts shown on the homepage.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum MediaType {
    #[default]
    Image,
    Video,
    CarouselAlbum,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SocialPost {
    pub id: String,
    #[serde(default)]
    pub media_type: MediaType,
    pub media_url: String,
    /// Poster frame for videos.
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    pub permalink: String,
    #[serde(default)]
    pub caption: Option<String>,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SocialPost {
    /// Image to render in the grid.
    pub fn display_url(&self) -> &str {
        match self.media_type {
            MediaType::Video => self.thumbnail_url.as_deref().unwrap_or(&self.media_url),
            _ => &self.media_url,
        }
    }

    /// Caption cut to `max` characters on a word boundary, with an ellipsis.
    pub fn short_caption(&self, max: usize) -> Option<String> {
        let caption = self.caption.as_deref()?.trim();
        if caption.chars().count() <= max {
            return Some(caption.to_string());
        }
        let cut: String = caption.chars().take(max).collect();
        let cut = match cut.rfind(char::is_whitespace) {
            Some(pos) if pos > 0 => &cut[..pos],
            _ => cut.as_str(),
        };
        Some(format!("{}\u{2026}", cut.trim_end()))
    }
}
