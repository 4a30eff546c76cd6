//! [`Credentials`]: basic-auth account/token pair extracted from a request.

use axum::http::{header::AUTHORIZATION, HeaderMap};
use base64::{engine::general_purpose::STANDARD, Engine as _};

/// Account identifier and secret token presented by the caller.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    /// Account identifier, safe to log.
    pub account: String,
    /// Secret token. Never log this.
    pub token: String,
}

impl Credentials {
    /// Extract credentials from the `Authorization: Basic ...` header.
    ///
    /// Returns `None` when the header is absent, uses another scheme, is not
    /// valid base64/UTF-8, or has no `:` separator.
    pub fn from_headers(headers: &HeaderMap) -> Option<Self> {
        let value = headers.get(AUTHORIZATION)?.to_str().ok()?;
        let (scheme, encoded) = value.trim().split_once(' ')?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return None;
        }
        let decoded = STANDARD.decode(encoded.trim()).ok()?;
        let decoded = String::from_utf8(decoded).ok()?;
        let (account, token) = decoded.split_once(':')?;
        Some(Self {
            account: account.to_owned(),
            token: token.to_owned(),
        })
    }

    /// Render as an `Authorization` header value.
    #[cfg(test)]
    pub fn to_header_value(&self) -> String {
        format!(
            "Basic {}",
            STANDARD.encode(format!("{}:{}", self.account, self.token))
        )
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("account", &self.account)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers_with(value: &str) -> HeaderMap {
        let mut h = HeaderMap::new();
        h.insert(AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        h
    }

    #[test]
    fn parses_basic_header() {
        // "alice:s3cret"
        let creds = Credentials::from_headers(&headers_with("Basic YWxpY2U6czNjcmV0")).unwrap();
        assert_eq!(creds.account, "alice");
        assert_eq!(creds.token, "s3cret");
    }

    #[test]
    fn scheme_is_case_insensitive() {
        assert!(Credentials::from_headers(&headers_with("basic YWxpY2U6czNjcmV0")).is_some());
    }

    #[test]
    fn token_may_contain_colons() {
        let creds = Credentials {
            account: "bob".into(),
            token: "a:b:c".into(),
        };
        let parsed = Credentials::from_headers(&headers_with(&creds.to_header_value())).unwrap();
        assert_eq!(parsed, creds);
    }

    #[test]
    fn rejects_missing_or_foreign_schemes() {
        assert!(Credentials::from_headers(&HeaderMap::new()).is_none());
        assert!(Credentials::from_headers(&headers_with("Bearer abc")).is_none());
        assert!(Credentials::from_headers(&headers_with("Basic !!!notbase64")).is_none());
        // "nocolon"
        assert!(Credentials::from_headers(&headers_with("Basic bm9jb2xvbg==")).is_none());
    }

    #[test]
    fn token_redacted_in_debug() {
        let creds = Credentials {
            account: "alice".into(),
            token: "s3cret".into(),
        };
        let dbg = format!("{creds:?}");
        assert!(dbg.contains("alice"));
        assert!(!dbg.contains("s3cret"));
        assert!(dbg.contains("REDACTED"));
    }
}
