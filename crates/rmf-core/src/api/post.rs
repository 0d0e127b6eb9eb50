//! Typed view of a post as returned by the post API.
//!
//! Only the fields the resolver consults are modeled; everything is optional
//! and unknown fields are ignored, since the upstream schema is loose.

use crate::error::{FetchError, Result};
use serde::Deserialize;
use serde_json::{Map, Value};

/// `data.children[0].data` of the post listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostRecord {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub secure_media: Option<MediaEnvelope>,
    #[serde(default)]
    pub media: Option<MediaEnvelope>,
    #[serde(default)]
    pub preview: Option<Preview>,
    /// Gallery items keyed by media id, in document order.
    #[serde(default)]
    pub media_metadata: Option<Map<String, Value>>,
    #[serde(default)]
    pub gallery_data: Option<GalleryData>,
    #[serde(default)]
    pub url_overridden_by_dest: Option<String>,
    #[serde(default)]
    pub crosspost_parent_list: Option<Vec<PostRecord>>,
}

impl PostRecord {
    /// The record carrying media fields: the first crosspost parent when this
    /// post is a crosspost, otherwise the post itself.
    pub fn media_source(&self) -> &PostRecord {
        self.crosspost_parent_list
            .as_deref()
            .and_then(|parents| parents.first())
            .unwrap_or(self)
    }

    /// Hosted video from `secure_media`, `media`, or the preview video, in that order.
    pub fn hosted_video(&self) -> Option<&HostedVideo> {
        reddit_video(&self.secure_media)
            .or_else(|| reddit_video(&self.media))
            .or_else(|| self.preview.as_ref()?.reddit_video_preview.as_ref())
            .filter(|v| v.fallback_url.is_some())
    }

    /// Source URL of the first preview image's GIF variant, still HTML-escaped.
    pub fn preview_gif_url(&self) -> Option<&str> {
        let image = self.preview.as_ref()?.images.first()?;
        Some(image.variants.gif.as_ref()?.source.url.as_str())
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaEnvelope {
    #[serde(default)]
    pub reddit_video: Option<HostedVideo>,
}

fn reddit_video(envelope: &Option<MediaEnvelope>) -> Option<&HostedVideo> {
    envelope.as_ref()?.reddit_video.as_ref()
}

/// Site-hosted video: progressive fallback plus optional DASH manifest.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HostedVideo {
    #[serde(default)]
    pub fallback_url: Option<String>,
    #[serde(default)]
    pub dash_url: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Preview {
    #[serde(default)]
    pub images: Vec<PreviewImage>,
    #[serde(default)]
    pub reddit_video_preview: Option<HostedVideo>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreviewImage {
    #[serde(default)]
    pub variants: ImageVariants,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ImageVariants {
    #[serde(default)]
    pub gif: Option<ImageVariant>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageVariant {
    pub source: ImageSource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ImageSource {
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryData {
    #[serde(default)]
    pub items: Vec<GalleryItem>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GalleryItem {
    pub media_id: String,
}

/// One `media_metadata` entry.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GalleryMedia {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub s: Option<GallerySource>,
}

/// Largest rendition of a gallery item: `u` for stills, `gif` for animations.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GallerySource {
    #[serde(default)]
    pub u: Option<String>,
    #[serde(default)]
    pub gif: Option<String>,
}

impl GalleryMedia {
    /// Still URL, else the GIF rendition. Items still processing or failed
    /// upstream (`status` other than `valid`) have none.
    pub fn best_url(&self) -> Option<&str> {
        if self.status.as_deref().is_some_and(|st| st != "valid") {
            return None;
        }
        let s = self.s.as_ref()?;
        s.u.as_deref().or(s.gif.as_deref())
    }
}

/// Extracts the post from the listing body `[{data:{children:[{data:{...}}]}}]`.
pub fn post_from_listing(body: &[u8]) -> Result<PostRecord> {
    let listing: Value = serde_json::from_slice(body)?;
    let data = listing
        .get(0)
        .and_then(|first| first.pointer("/data/children/0/data"))
        .ok_or_else(|| FetchError::shape("post listing missing data.children[0].data"))?;
    Ok(serde_json::from_value(data.clone())?)
}
