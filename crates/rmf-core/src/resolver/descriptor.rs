//! The resolved media descriptor.

use serde::{Deserialize, Serialize};

/// Normalized result of resolving one post. Exactly one variant applies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MediaDescriptor {
    /// Video stream; `audio_url` only when the source serves audio separately.
    Video {
        video_url: String,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        audio_url: Option<String>,
    },
    Gif {
        url: String,
    },
    /// Gallery image URLs in gallery order.
    Gallery {
        urls: Vec<String>,
    },
    /// Direct image link found as the post's external destination.
    Image {
        url: String,
    },
    /// Unrecognized third-party destination, passed through verbatim.
    External {
        url: String,
    },
}

impl MediaDescriptor {
    pub fn kind(&self) -> &'static str {
        match self {
            MediaDescriptor::Video { .. } => "video",
            MediaDescriptor::Gif { .. } => "gif",
            MediaDescriptor::Gallery { .. } => "gallery",
            MediaDescriptor::Image { .. } => "image",
            MediaDescriptor::External { .. } => "external",
        }
    }
}

/// Undo the HTML escaping the post API applies to URLs inside JSON.
pub(crate) fn decode_entities(url: &str) -> String {
    url.replace("&amp;", "&")
}

/// Drop query string and fragment.
pub(crate) fn strip_query(url: &str) -> &str {
    url.split(['?', '#']).next().unwrap_or(url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let v = MediaDescriptor::Video {
            video_url: "https://v.redd.it/a/DASH_720.mp4".into(),
            audio_url: None,
        };
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "video", "video_url": "https://v.redd.it/a/DASH_720.mp4"})
        );
        let g: MediaDescriptor =
            serde_json::from_value(serde_json::json!({"type": "gallery", "urls": ["a", "b"]})).unwrap();
        assert_eq!(g.kind(), "gallery");
    }

    #[test]
    fn entity_and_query_helpers() {
        assert_eq!(decode_entities("http://x/1.jpg?a=1&amp;b=2"), "http://x/1.jpg?a=1&b=2");
        assert_eq!(strip_query("https://v.redd.it/a/DASH_720.mp4?source=fallback"), "https://v.redd.it/a/DASH_720.mp4");
        assert_eq!(strip_query("https://h/p#f"), "https://h/p");
        assert_eq!(strip_query("https://h/p"), "https://h/p");
    }
}
