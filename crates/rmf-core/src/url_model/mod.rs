//! URL modeling: post URL normalization and local filename derivation.
//!
//! Local asset names come from the last path segment of the source URL
//! (query dropped), sanitized for Linux filesystems.

mod normalize;
mod path;
mod sanitize;

pub use normalize::{canonicalize_for_api, expand_short_link, is_short_link, validate_post_url};
pub use path::{filename_from_url_path, host_matches};
pub use sanitize::sanitize_filename_for_linux;

/// Default filename when the URL path yields nothing usable.
const DEFAULT_FILENAME: &str = "media.bin";

/// Suffixes that already mark a playable container.
const MEDIA_EXTENSIONS: [&str; 6] = ["mp4", "webm", "mkv", "mov", "m4v", "gif"];

/// Prefix for muxed video+audio output.
pub const MERGED_PREFIX: &str = "merged_";

/// Derives the local filename for an asset URL.
///
/// # Examples
///
/// - `local_filename("https://v.redd.it/abc/DASH_720.mp4?source=fallback")` → `"DASH_720.mp4"`
/// - `local_filename("https://i.redd.it/")` → `"media.bin"`
pub fn local_filename(url: &str) -> String {
    let raw = match filename_from_url_path(url) {
        Some(c) => c,
        None => return DEFAULT_FILENAME.to_string(),
    };

    let sanitized = sanitize_filename_for_linux(&raw);
    if sanitized.is_empty() || sanitized == "." || sanitized == ".." {
        DEFAULT_FILENAME.to_string()
    } else {
        sanitized
    }
}

/// True if `name` ends in a recognized video/animation container suffix.
pub fn has_media_extension(name: &str) -> bool {
    name.rsplit_once('.')
        .map(|(_, ext)| MEDIA_EXTENSIONS.iter().any(|m| ext.eq_ignore_ascii_case(m)))
        .unwrap_or(false)
}

/// Appends `.mp4` unless the name already has a media suffix.
pub fn with_video_extension(name: &str) -> String {
    if has_media_extension(name) {
        name.to_string()
    } else {
        format!("{}.mp4", name)
    }
}

/// Output name for a muxed video: `merged_<video filename>`.
pub fn merged_filename(video_name: &str) -> String {
    format!("{}{}", MERGED_PREFIX, with_video_extension(video_name))
}
