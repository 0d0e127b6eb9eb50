//! Media resolver: post link in, [`MediaDescriptor`] out.
//!
//! Resolution is a one-shot, ordered decision chain over the post record:
//! hosted video, preview GIF, gallery, then the external destination. The
//! first step that matches wins; a failed network call in a step ends the
//! attempt instead of falling back to a later step.

mod descriptor;
mod extract;

pub use descriptor::MediaDescriptor;
pub use extract::{
    classify_external, fallback_video_url, partner_video_id, try_extract_gallery, try_extract_gif,
    ExternalTarget, PARTNER_DOMAIN,
};

use crate::api::{PostRecord, SourceApi};
use crate::error::{FetchError, Result};
use crate::manifest::select_best_audio;
use crate::url_model::{canonicalize_for_api, expand_short_link, validate_post_url};

pub struct Resolver<A> {
    api: A,
}

impl<A: SourceApi> Resolver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Resolves a post link. `None` covers every failure; the cause is logged.
    pub fn resolve(&self, input: &str) -> Option<MediaDescriptor> {
        match self.try_resolve(input) {
            Ok(Some(media)) => {
                tracing::info!(kind = media.kind(), input, "resolved media");
                Some(media)
            }
            Ok(None) => {
                tracing::info!(input, "no media found");
                None
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), input, "resolution failed: {}", e);
                None
            }
        }
    }

    /// Like [`resolve`](Self::resolve) but keeps the error for diagnostics.
    pub fn try_resolve(&self, input: &str) -> Result<Option<MediaDescriptor>> {
        let url = expand_short_link(&self.api, input)?;
        if !validate_post_url(&url) {
            return Err(FetchError::InvalidInput(format!("not a post URL: {}", url)));
        }
        let api_url = canonicalize_for_api(&url)?;
        let post = self.api.fetch_post(&api_url)?;
        self.extract(post.media_source())
    }

    /// Runs the extraction chain over an already-fetched post.
    pub fn extract(&self, post: &PostRecord) -> Result<Option<MediaDescriptor>> {
        if let Some(media) = self.try_extract_video(post) {
            return Ok(Some(media));
        }
        if let Some(media) = try_extract_gif(post) {
            return Ok(Some(media));
        }
        if let Some(media) = try_extract_gallery(post) {
            return Ok(Some(media));
        }
        self.try_extract_external(post)
    }

    fn try_extract_video(&self, post: &PostRecord) -> Option<MediaDescriptor> {
        let video = post.hosted_video()?;
        let video_url = fallback_video_url(video)?;
        let audio_url = video
            .dash_url
            .as_deref()
            .and_then(|dash| self.best_effort_audio(dash));
        Some(MediaDescriptor::Video {
            video_url,
            audio_url,
        })
    }

    /// Audio track from the DASH manifest. A missing track is normal (silent
    /// clips); a manifest that cannot be fetched or parsed also yields `None`.
    fn best_effort_audio(&self, dash_url: &str) -> Option<String> {
        let dash_url = dash_url.trim();
        let audio = self
            .api
            .fetch_bytes(dash_url)
            .and_then(|body| select_best_audio(&body, dash_url));
        match audio {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                tracing::debug!(dash_url, "manifest has no audio track");
                None
            }
            Err(e) => {
                tracing::warn!(kind = ?e.kind(), dash_url, "audio lookup failed: {}", e);
                None
            }
        }
    }

    fn try_extract_external(&self, post: &PostRecord) -> Result<Option<MediaDescriptor>> {
        let Some(dest) = post.url_overridden_by_dest.as_deref() else {
            return Ok(None);
        };
        match classify_external(dest) {
            Some(ExternalTarget::Partner { video_id }) => {
                let token = self.api.fetch_auth_token()?;
                let video_url = self.api.fetch_partner_media(&video_id, &token)?;
                Ok(Some(MediaDescriptor::Video {
                    video_url,
                    audio_url: None,
                }))
            }
            Some(ExternalTarget::Direct(media)) => Ok(Some(media)),
            None => Ok(None),
        }
    }
}
