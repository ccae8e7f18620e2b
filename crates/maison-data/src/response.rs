//! Backend responses and envelope decoding.

use crate::FetchError;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::collections::HashMap;

/// An HTTP response.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The response headers.
    pub headers: HashMap<String, String>,
    /// The response body.
    pub body: Vec<u8>,
}

/// The backend's optional `{ "data": T }` wrapper.
#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// The backend's error body.
#[derive(Deserialize)]
struct ErrorBody {
    message: String,
}

impl Response {
    pub fn new(status: u16, headers: HashMap<String, String>, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Build a JSON response. Mostly useful for fakes.
    pub fn json_body(status: u16, value: &serde_json::Value) -> Self {
        let mut headers = HashMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        Self::new(status, headers, value.to_string().into_bytes())
    }

    /// 2xx.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// 4xx.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status)
    }

    /// 5xx.
    pub fn is_server_error(&self) -> bool {
        (500..600).contains(&self.status)
    }

    /// Body as UTF-8 text.
    pub fn text(&self) -> Result<String, FetchError> {
        String::from_utf8(self.body.clone())
            .map_err(|e| FetchError::ParseError(format!("Invalid UTF-8: {}", e)))
    }

    /// Body decoded as JSON, without envelope handling.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        serde_json::from_slice(&self.body).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    /// Parse the body as `T`, unwrapping a `{ "data": T }` envelope when present.
    ///
    /// An empty body decodes as JSON `null`, so `()` and `Option<_>` targets
    /// accept `204 No Content`.
    pub fn data<T: DeserializeOwned>(&self) -> Result<T, FetchError> {
        let value: serde_json::Value = if self.body.iter().all(u8::is_ascii_whitespace) {
            serde_json::Value::Null
        } else {
            self.json()?
        };

        if let serde_json::Value::Object(ref map) = value {
            if map.contains_key("data") {
                if let Ok(envelope) = serde_json::from_value::<Envelope<T>>(value.clone()) {
                    return Ok(envelope.data);
                }
            }
        }

        serde_json::from_value(value).map_err(|e| FetchError::ParseError(e.to_string()))
    }

    pub fn bytes(&self) -> &[u8] {
        &self.body
    }

    /// Get a header value.
    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v.as_str())
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("Content-Type")
    }

    /// Session cookie set by the backend (login), without attributes.
    pub fn session_cookie(&self) -> Option<&str> {
        self.header("Set-Cookie")
            .and_then(|v| v.split(';').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    }

    /// The `message` field of an error body, falling back to the raw text.
    pub fn error_message(&self) -> String {
        if let Ok(body) = serde_json::from_slice::<ErrorBody>(&self.body) {
            return body.message;
        }
        self.text().unwrap_or_else(|_| "Unknown error".to_string())
    }

    /// Turn a non-2xx response into [`FetchError::HttpError`], carrying the
    /// backend's `message` when the body has one.
    pub fn error_for_status(self) -> Result<Self, FetchError> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(FetchError::HttpError {
                status: self.status,
                message: self.error_message(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    fn make_response(status: u16, body: &[u8]) -> Response {
        Response::new(status, HashMap::new(), body.to_vec())
    }

    fn make_response_with_headers(
        status: u16,
        headers: Vec<(&str, &str)>,
        body: &[u8],
    ) -> Response {
        let headers: HashMap<String, String> = headers
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Response::new(status, headers, body.to_vec())
    }

    #[derive(Deserialize, Debug, PartialEq)]
    struct Data {
        value: i32,
    }


    #[test]
    fn test_response_is_success() {
        assert!(make_response(200, b"").is_success());
        assert!(make_response(204, b"").is_success());
        assert!(!make_response(199, b"").is_success());
        assert!(!make_response(300, b"").is_success());
    }

    #[test]
    fn test_response_error_classes() {
        assert!(make_response(404, b"").is_client_error());
        assert!(!make_response(500, b"").is_client_error());
        assert!(make_response(503, b"").is_server_error());
        assert!(!make_response(499, b"").is_server_error());
    }

    // === Body Tests ===

    #[test]
    fn test_response_text_invalid_utf8() {
        let resp = make_response(200, &[0xff, 0xfe]);
        assert!(resp.text().is_err());
    }

    #[test]
    fn test_data_unwraps_envelope() {
        let resp = make_response(200, br#"{"data": {"value": 42}}"#);
        let data: Data = resp.data().unwrap();
        assert_eq!(data, Data { value: 42 });
    }

    #[test]
    fn test_data_accepts_bare_body() {
        let resp = make_response(200, br#"{"value": 7}"#);
        let data: Data = resp.data().unwrap();
        assert_eq!(data, Data { value: 7 });
    }

    #[test]
    fn test_data_bare_object_with_data_field() {
        // A resource whose own field is called `data` must not be unwrapped
        // when the inner value does not match the target type.
        #[derive(Deserialize, Debug, PartialEq)]
        struct Upload {
            data: String,
            size: u32,
        }
        let resp = make_response(200, br#"{"data": "abc", "size": 3}"#);
        let upload: Upload = resp.data().unwrap();
        assert_eq!(upload.size, 3);
    }

    #[test]
    fn test_data_empty_body_as_unit() {
        let resp = make_response(204, b"");
        resp.data::<()>().unwrap();
        let none: Option<Data> = resp.data().unwrap();
        assert!(none.is_none());
    }

    #[test]
    fn test_data_invalid() {
        let resp = make_response(200, b"not json");
        let result: Result<Data, _> = resp.data();
        assert!(matches!(result, Err(FetchError::ParseError(_))));
    }

    // === Header Tests ===

    #[test]
    fn test_response_header_case_insensitive() {
        let resp = make_response_with_headers(200, vec![("Content-Type", "text/html")], b"");
        assert_eq!(resp.header("content-type"), Some("text/html"));
        assert_eq!(resp.content_type(), Some("text/html"));
        assert_eq!(resp.header("X-Missing"), None);
    }

    #[test]
    fn test_session_cookie_strips_attributes() {
        let resp = make_response_with_headers(
            200,
            vec![("set-cookie", "sid=abc123; Path=/; HttpOnly")],
            b"",
        );
        assert_eq!(resp.session_cookie(), Some("sid=abc123"));
    }


    #[test]
    fn test_error_for_status_success() {
        assert!(make_response(200, b"OK").error_for_status().is_ok());
    }

    #[test]
    fn test_error_for_status_uses_message_field() {
        let resp = make_response(400, br#"{"message": "Invalid coupon"}"#);
        let err = resp.error_for_status().unwrap_err();
        assert_eq!(
            err,
            FetchError::HttpError {
                status: 400,
                message: "Invalid coupon".to_string()
            }
        );
    }

    #[test]
    fn test_error_for_status_plain_text() {
        let resp = make_response(502, b"Bad Gateway");
        match resp.error_for_status() {
            Err(FetchError::HttpError { status, message }) => {
                assert_eq!(status, 502);
                assert_eq!(message, "Bad Gateway");
            }
            other => panic!("unexpected: {:?}", other),
        }
    }
}
