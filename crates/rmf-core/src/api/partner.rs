//! Video partner wire shapes: `{token}` and `{gif:{urls:{hd,sd}}}`.

use crate::error::{FetchError, Result};
use serde::Deserialize;
use std::fmt;

/// Short-lived bearer token for the partner API. Fetched per resolution and
/// never stored.
#[derive(Clone, Deserialize)]
pub struct AuthToken {
    token: String,
}

impl AuthToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self { token: token.into() }
    }

    pub fn as_str(&self) -> &str {
        &self.token
    }

    pub(crate) fn bearer_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AuthToken(<redacted>)")
    }
}

#[derive(Debug, Deserialize)]
struct PartnerMedia {
    gif: PartnerGif,
}

#[derive(Debug, Deserialize)]
struct PartnerGif {
    #[serde(default)]
    urls: PartnerUrls,
}

/// Renditions offered by the partner.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PartnerUrls {
    #[serde(default)]
    pub hd: Option<String>,
    #[serde(default)]
    pub sd: Option<String>,
}

impl PartnerUrls {
    /// Highest quality available: `hd` over `sd`.
    pub fn best(&self) -> Option<&str> {
        self.hd
            .as_deref()
            .or(self.sd.as_deref())
            .filter(|u| !u.is_empty())
    }
}

pub(crate) fn parse_auth(body: &[u8]) -> Result<AuthToken> {
    let token: AuthToken = serde_json::from_slice(body)?;
    if token.token.is_empty() {
        return Err(FetchError::shape("partner auth returned an empty token"));
    }
    Ok(token)
}

pub(crate) fn parse_media_url(body: &[u8]) -> Result<String> {
    let media: PartnerMedia = serde_json::from_slice(body)?;
    media
        .gif
        .urls
        .best()
        .map(str::to_string)
        .ok_or_else(|| FetchError::shape("partner media has neither hd nor sd url"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn auth_token_parsed_and_redacted() {
        let t = parse_auth(br#"{"token":"abc.def","addr":"1.2.3.4"}"#).unwrap();
        assert_eq!(t.as_str(), "abc.def");
        assert_eq!(t.bearer_header(), "Bearer abc.def");
        assert!(!format!("{:?}", t).contains("abc.def"));
    }

    #[test]
    fn auth_without_token_is_shape_error() {
        assert_eq!(parse_auth(br#"{"error":"x"}"#).unwrap_err().kind(), ErrorKind::UnexpectedShape);
        assert_eq!(parse_auth(br#"{"token":""}"#).unwrap_err().kind(), ErrorKind::UnexpectedShape);
    }

    #[test]
    fn media_prefers_hd() {
        let body = br#"{"gif":{"id":"x","urls":{"sd":"https://media.redgifs.com/X-mobile.mp4","hd":"https://media.redgifs.com/X.mp4"}}}"#;
        assert_eq!(parse_media_url(body).unwrap(), "https://media.redgifs.com/X.mp4");
    }

    #[test]
    fn media_falls_back_to_sd() {
        let body = br#"{"gif":{"urls":{"sd":"https://media.redgifs.com/X-mobile.mp4"}}}"#;
        assert_eq!(parse_media_url(body).unwrap(), "https://media.redgifs.com/X-mobile.mp4");
    }

    #[test]
    fn media_without_urls_is_error() {
        let err = parse_media_url(br#"{"gif":{"urls":{}}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedShape);
        let err = parse_media_url(br#"{"error":{"code":"NotFound"}}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::UnexpectedShape);
    }
}
