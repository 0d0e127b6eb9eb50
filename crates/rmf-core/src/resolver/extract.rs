//! Network-free extraction steps over a post record.
//!
//! Each `try_extract_*` returns `Some` on a match; the resolver calls them in
//! order and stops at the first hit.

use super::descriptor::{decode_entities, strip_query, MediaDescriptor};
use crate::api::{GalleryMedia, HostedVideo, PostRecord};
use crate::url_model::{filename_from_url_path, host_matches};

/// Host of the video partner.
pub const PARTNER_DOMAIN: &str = "redgifs.com";

const IMAGE_EXTENSIONS: [&str; 5] = ["jpg", "jpeg", "png", "gif", "webp"];

/// Progressive video URL of a hosted video, query dropped.
pub fn fallback_video_url(video: &HostedVideo) -> Option<String> {
    let url = video.fallback_url.as_deref()?.trim();
    if url.is_empty() {
        return None;
    }
    Some(strip_query(url).to_string())
}

/// Preview GIF variant, when its URL actually points at a `.gif`.
pub fn try_extract_gif(post: &PostRecord) -> Option<MediaDescriptor> {
    let url = post.preview_gif_url()?;
    if !url.contains(".gif") {
        return None;
    }
    Some(MediaDescriptor::Gif {
        url: decode_entities(url),
    })
}

/// Gallery image URLs, in `gallery_data` order when present, else metadata order.
/// Returns `None` for an empty result so resolution falls through.
pub fn try_extract_gallery(post: &PostRecord) -> Option<MediaDescriptor> {
    let metadata = post.media_metadata.as_ref()?;

    let item_url = |value: &serde_json::Value| -> Option<String> {
        let media: GalleryMedia = serde_json::from_value(value.clone()).ok()?;
        media.best_url().map(decode_entities)
    };

    let ordered_ids: Vec<&str> = post
        .gallery_data
        .as_ref()
        .map(|g| g.items.iter().map(|i| i.media_id.as_str()).collect())
        .unwrap_or_default();

    let urls: Vec<String> = if ordered_ids.is_empty() {
        metadata.values().filter_map(item_url).collect()
    } else {
        ordered_ids
            .iter()
            .filter_map(|id| metadata.get(*id))
            .filter_map(item_url)
            .collect()
    };

    if urls.is_empty() {
        return None;
    }
    Some(MediaDescriptor::Gallery { urls })
}

/// Where an external destination URL leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExternalTarget {
    /// Partner-hosted video; needs an authenticated lookup by id.
    Partner { video_id: String },
    /// Resolved without further network calls.
    Direct(MediaDescriptor),
}

/// Classifies `url_overridden_by_dest`.
pub fn classify_external(url: &str) -> Option<ExternalTarget> {
    let url = url.trim();
    if url.is_empty() {
        return None;
    }
    if host_matches(url, PARTNER_DOMAIN) {
        return partner_video_id(url).map(|video_id| ExternalTarget::Partner { video_id });
    }

    let ext = filename_from_url_path(url)
        .and_then(|name| name.rsplit_once('.').map(|(_, e)| e.to_ascii_lowercase()));
    let descriptor = match ext.as_deref() {
        Some("gif") => MediaDescriptor::Gif {
            url: url.to_string(),
        },
        Some(e) if IMAGE_EXTENSIONS.contains(&e) => MediaDescriptor::Image {
            url: url.to_string(),
        },
        _ => MediaDescriptor::External {
            url: url.to_string(),
        },
    };
    Some(ExternalTarget::Direct(descriptor))
}

/// Video id from a partner URL: last path segment, extension dropped, lowercased.
/// Ids are alphanumeric; anything else is rejected.
pub fn partner_video_id(url: &str) -> Option<String> {
    let segment = filename_from_url_path(url)?;
    let id = segment.split('.').next()?.to_ascii_lowercase();
    if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(id)
}
