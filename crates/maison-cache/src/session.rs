//! Anonymous shopper identity.
//!
//! Every browser gets a session id before it logs in; persisted cart,
//! wishlist and buy-now snapshots are namespaced under it.

use serde::{Deserialize, Serialize};
use std::fmt;

const PREFIX: &str = "sess_";
/// 18 random bytes encode to 24 URL-safe base64 characters.
const RANDOM_BYTES: usize = 18;
/// One year.
const COOKIE_MAX_AGE: u32 = 60 * 60 * 24 * 365;

/// Cookie carrying the session id between browser and server.
pub const SESSION_COOKIE: &str = "maison_sid";

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(String);

impl SessionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Fresh random id, `sess_` followed by URL-safe base64.
    pub fn generate() -> Self {
        use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
        use rand::RngCore;

        let mut bytes = [0u8; RANDOM_BYTES];
        rand::thread_rng().fill_bytes(&mut bytes);
        Self(format!("{PREFIX}{}", URL_SAFE_NO_PAD.encode(bytes)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Find the session cookie in a `Cookie` request header. Values that
    /// are not ids this module could have issued are ignored.
    pub fn from_cookie_header(header: &str) -> Option<Self> {
        header
            .split(';')
            .filter_map(|pair| pair.trim().split_once('='))
            .find(|(name, _)| *name == SESSION_COOKIE)
            .map(|(_, value)| value.trim())
            .filter(|value| Self::is_well_formed(value))
            .map(Self::new)
    }

    /// `Set-Cookie` value handing this id to the browser.
    pub fn to_set_cookie(&self) -> String {
        format!("{SESSION_COOKIE}={}; Path=/; Max-Age={COOKIE_MAX_AGE}; HttpOnly; SameSite=Lax", self.0)
    }

    fn is_well_formed(value: &str) -> bool {
        value.strip_prefix(PREFIX).is_some_and(|rest| {
            !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
        })
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_ids_are_prefixed_and_distinct() {
        let a = SessionId::generate();
        let b = SessionId::generate();
        assert!(a.as_str().starts_with("sess_"));
        assert_eq!(a.as_str().len(), PREFIX.len() + 24);
        assert_ne!(a, b);
    }

    #[test]
    fn test_serializes_as_plain_string() {
        let id = SessionId::new("sess_1");
        assert_eq!(serde_json::to_string(&id).unwrap(), r#""sess_1""#);
    }

    #[test]
    fn test_cookie_header_lookup() {
        let id = SessionId::generate();
        let header = format!("theme=dark; {SESSION_COOKIE}={id}; other=1");
        assert_eq!(SessionId::from_cookie_header(&header), Some(id.clone()));

        assert_eq!(SessionId::from_cookie_header("theme=dark"), None);
        assert_eq!(SessionId::from_cookie_header("maison_sid=../../etc"), None);
        assert_eq!(SessionId::from_cookie_header("maison_sid=sess_"), None);

        let set_cookie = id.to_set_cookie();
        assert!(set_cookie.starts_with(&format!("maison_sid={id};")));
        assert!(set_cookie.contains("HttpOnly"));
    }
}
