//! libcurl-backed [`SourceApi`].

use super::partner::{parse_auth, parse_media_url, AuthToken};
use super::post::{post_from_listing, PostRecord};
use super::SourceApi;
use crate::config::{PartnerConfig, RmfConfig};
use crate::error::Result;
use crate::http::HttpClient;

#[derive(Debug, Clone)]
pub struct CurlSourceApi {
    http: HttpClient,
    partner: PartnerConfig,
}

impl CurlSourceApi {
    pub fn new(http: HttpClient, partner: PartnerConfig) -> Self {
        Self { http, partner }
    }

    pub fn from_config(cfg: &RmfConfig) -> Self {
        Self::new(HttpClient::from_config(cfg), cfg.partner.clone())
    }

    fn media_url(&self, video_id: &str) -> String {
        format!("{}/{}", self.partner.api_base.trim_end_matches('/'), video_id)
    }
}

impl SourceApi for CurlSourceApi {
    fn resolve_redirect(&self, url: &str) -> Result<String> {
        self.http.resolve_redirect(url)
    }

    fn fetch_post(&self, api_url: &str) -> Result<PostRecord> {
        tracing::debug!(url = api_url, "fetching post");
        let body = self.http.get_bytes(api_url, &[])?;
        post_from_listing(&body)
    }

    fn fetch_auth_token(&self) -> Result<AuthToken> {
        let body = self.http.get_bytes(&self.partner.auth_url, &[])?;
        parse_auth(&body)
    }

    fn fetch_partner_media(&self, video_id: &str, token: &AuthToken) -> Result<String> {
        let url = self.media_url(video_id);
        tracing::debug!(url = %url, "fetching partner media");
        let auth = token.bearer_header();
        let body = self.http.get_bytes(&url, &[("Authorization", auth.as_str())])?;
        parse_media_url(&body)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        self.http.get_bytes(url, &[])
    }
}
