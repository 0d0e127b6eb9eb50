//! DASH manifest parsing: pick the best audio representation.
//!
//! The namespace is taken from the root element of each document rather than
//! hard-coded; the partner has served more than one MPD namespace URI.

mod parse;

pub use parse::{audio_representations, AudioRepresentation};

use crate::error::Result;

/// Returns the absolute URL of the highest-bandwidth audio representation,
/// or `None` when the manifest has no audio adaptation set (video-only).
///
/// Ties on bandwidth keep the first representation in document order.
pub fn select_best_audio(manifest: &[u8], manifest_url: &str) -> Result<Option<String>> {
    let reps = audio_representations(manifest)?;
    let mut best: Option<&AudioRepresentation> = None;
    for rep in &reps {
        if best.map_or(true, |b| rep.bandwidth > b.bandwidth) {
            best = Some(rep);
        }
    }
    Ok(best.map(|rep| {
        tracing::debug!(bandwidth = rep.bandwidth, base_url = %rep.base_url, "selected audio");
        join_base_url(manifest_url, &rep.base_url)
    }))
}

/// Directory of the manifest URL, query and fragment dropped, with trailing `/`.
pub fn manifest_dir(manifest_url: &str) -> &str {
    let end = manifest_url
        .find(|c| c == '?' || c == '#')
        .unwrap_or(manifest_url.len());
    let path = &manifest_url[..end];
    match path.rfind('/') {
        Some(i) => &path[..=i],
        None => path,
    }
}

/// Concatenates the manifest directory and a relative `BaseURL`.
/// Absolute base URLs are returned unchanged.
fn join_base_url(manifest_url: &str, base_url: &str) -> String {
    if base_url.starts_with("http://") || base_url.starts_with("https://") {
        return base_url.to_string();
    }
    format!("{}{}", manifest_dir(manifest_url), base_url.trim_start_matches('/'))
}
