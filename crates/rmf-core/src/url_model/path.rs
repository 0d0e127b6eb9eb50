//! Path and host helpers over parsed URLs.

/// Extracts the last path segment from a URL for use as a filename hint.
///
/// Returns `None` if the URL cannot be parsed or the path is empty/root.
pub fn filename_from_url_path(url: &str) -> Option<String> {
    let parsed = url::Url::parse(url).ok()?;
    let segment = parsed.path_segments()?.filter(|s| !s.is_empty()).last()?;
    if segment == "." || segment == ".." {
        return None;
    }
    Some(segment.to_string())
}

/// True if the URL's host is `domain` or one of its subdomains.
pub fn host_matches(url: &str, domain: &str) -> bool {
    let Some(host) = url::Url::parse(url)
        .ok()
        .and_then(|u| u.host_str().map(str::to_ascii_lowercase))
    else {
        return false;
    };
    host == domain || host.ends_with(&format!(".{}", domain))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normal() {
        assert_eq!(
            filename_from_url_path("https://v.redd.it/abc/DASH_720.mp4").as_deref(),
            Some("DASH_720.mp4")
        );
        assert_eq!(
            filename_from_url_path("https://example.com/single").as_deref(),
            Some("single")
        );
    }

    #[test]
    fn root_or_empty() {
        assert_eq!(filename_from_url_path("https://example.com/"), None);
        assert_eq!(filename_from_url_path("https://example.com"), None);
    }

    #[test]
    fn with_query() {
        assert_eq!(
            filename_from_url_path("https://i.redd.it/x.jpg?width=640&s=abc").as_deref(),
            Some("x.jpg")
        );
    }

    #[test]
    fn host_matching() {
        assert!(host_matches("https://www.redgifs.com/watch/abc", "redgifs.com"));
        assert!(host_matches("https://redgifs.com/watch/abc", "redgifs.com"));
        assert!(host_matches("https://media.REDGIFS.com/Abc.mp4", "redgifs.com"));
        assert!(!host_matches("https://notredgifs.com/watch/abc", "redgifs.com"));
        assert!(!host_matches("garbage", "redgifs.com"));
    }
}
