//! Post URL normalization: short-link expansion, shape check, API form.

use crate::api::SourceApi;
use crate::error::{FetchError, Result};
use url::Url;

const SITE_HOSTS: [&str; 2] = ["reddit.com", "www.reddit.com"];
const SHORT_HOST: &str = "redd.it";
const API_SUFFIX: &str = ".json";

fn segments(url: &Url) -> Vec<&str> {
    url.path_segments()
        .map(|s| s.filter(|seg| !seg.is_empty()).collect())
        .unwrap_or_default()
}

fn is_web_scheme(url: &Url) -> bool {
    matches!(url.scheme(), "http" | "https")
}

fn is_site_host(url: &Url) -> bool {
    url.host_str()
        .map(|h| SITE_HOSTS.iter().any(|s| h.eq_ignore_ascii_case(s)))
        .unwrap_or(false)
}

/// True for mobile share links: `reddit.com/r/<name>/s/<token>` and `redd.it/<id>`.
pub fn is_short_link(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };
    if !is_web_scheme(&parsed) {
        return false;
    }
    let segs = segments(&parsed);
    if parsed
        .host_str()
        .is_some_and(|h| h.eq_ignore_ascii_case(SHORT_HOST))
    {
        return segs.len() == 1;
    }
    is_site_host(&parsed) && segs.len() == 4 && segs[0] == "r" && segs[2] == "s"
}

/// Follows a short link to its post URL; any other input passes through untouched.
pub fn expand_short_link<A: SourceApi + ?Sized>(api: &A, url: &str) -> Result<String> {
    let url = url.trim();
    if !is_short_link(url) {
        return Ok(url.to_string());
    }
    let expanded = api.resolve_redirect(url)?;
    tracing::debug!(short = url, expanded = %expanded, "expanded short link");
    Ok(expanded)
}

/// Structural check for `scheme://[www.]reddit.com/{r|user}/<name>/comments/<id>...`.
pub fn validate_post_url(url: &str) -> bool {
    let Ok(parsed) = Url::parse(url.trim()) else {
        return false;
    };
    if !is_web_scheme(&parsed) || !is_site_host(&parsed) {
        return false;
    }
    let segs = segments(&parsed);
    segs.len() >= 4 && matches!(segs[0], "r" | "user") && segs[2] == "comments"
}

/// Drops query and fragment and appends `.json` to the path.
pub fn canonicalize_for_api(url: &str) -> Result<String> {
    let mut parsed = Url::parse(url.trim())
        .map_err(|e| FetchError::InvalidInput(format!("{}: {}", url, e)))?;
    parsed.set_query(None);
    parsed.set_fragment(None);

    let path = parsed.path().trim_end_matches('/').to_string();
    if !path.ends_with(API_SUFFIX) {
        parsed.set_path(&format!("{}{}", path, API_SUFFIX));
    }
    Ok(parsed.to_string())
}
