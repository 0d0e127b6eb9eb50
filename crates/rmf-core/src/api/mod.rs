//! Source API client: the two upstream services behind one trait.
//!
//! The resolver only depends on [`SourceApi`]; [`CurlSourceApi`] is the real
//! implementation and tests substitute in-memory fakes. No call is retried.

mod client;
mod partner;
mod post;

pub use client::CurlSourceApi;
pub use partner::{AuthToken, PartnerUrls};
pub use post::{
    post_from_listing, GalleryData, GalleryItem, GalleryMedia, GallerySource, HostedVideo,
    ImageSource, ImageVariant, ImageVariants, MediaEnvelope, PostRecord, Preview, PreviewImage,
};

use crate::error::Result;

/// Upstream calls needed by resolution.
pub trait SourceApi {
    /// HEAD `url` following redirects; returns the final URL.
    fn resolve_redirect(&self, url: &str) -> Result<String>;

    /// GET the post listing at `api_url` (already canonicalized).
    fn fetch_post(&self, api_url: &str) -> Result<PostRecord>;

    /// Fresh partner token. Never cached.
    fn fetch_auth_token(&self) -> Result<AuthToken>;

    /// Best (hd, else sd) media URL for a partner video id.
    fn fetch_partner_media(&self, video_id: &str, token: &AuthToken) -> Result<String>;

    /// Raw GET, used for manifests.
    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>>;
}

impl<T: SourceApi + ?Sized> SourceApi for &T {
    fn resolve_redirect(&self, url: &str) -> Result<String> {
        (**self).resolve_redirect(url)
    }

    fn fetch_post(&self, api_url: &str) -> Result<PostRecord> {
        (**self).fetch_post(api_url)
    }

    fn fetch_auth_token(&self) -> Result<AuthToken> {
        (**self).fetch_auth_token()
    }

    fn fetch_partner_media(&self, video_id: &str, token: &AuthToken) -> Result<String> {
        (**self).fetch_partner_media(video_id, token)
    }

    fn fetch_bytes(&self, url: &str) -> Result<Vec<u8>> {
        (**self).fetch_bytes(url)
    }
}
