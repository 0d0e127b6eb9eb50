//! Blocking HTTP client on libcurl.
//!
//! Every request follows redirects, sends the configured browser User-Agent and
//! carries connect/total timeouts. Runs in the current thread; call from
//! `spawn_blocking` if used from async code.

mod status;

use crate::config::RmfConfig;
use crate::error::{FetchError, Result};
use std::cell::Cell;
use std::io;
use std::time::Duration;

use status::StatusTracker;

/// Extra request headers as `(name, value)` pairs.
pub type Headers<'a> = &'a [(&'a str, &'a str)];

#[derive(Debug, Clone)]
pub struct HttpClient {
    user_agent: String,
    connect_timeout: Duration,
    timeout: Duration,
}

impl HttpClient {
    pub fn new(user_agent: impl Into<String>, connect_timeout: Duration, timeout: Duration) -> Self {
        Self {
            user_agent: user_agent.into(),
            connect_timeout,
            timeout,
        }
    }

    pub fn from_config(cfg: &RmfConfig) -> Self {
        Self::new(
            cfg.user_agent.clone(),
            cfg.connect_timeout(),
            cfg.request_timeout(),
        )
    }

    fn easy(&self, url: &str, headers: Headers<'_>) -> std::result::Result<curl::easy::Easy, curl::Error> {
        let mut easy = curl::easy::Easy::new();
        easy.url(url)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.useragent(&self.user_agent)?;
        easy.connect_timeout(self.connect_timeout)?;
        easy.timeout(self.timeout)?;

        if !headers.is_empty() {
            let mut list = curl::easy::List::new();
            for (k, v) in headers {
                list.append(&format!("{}: {}", k.trim(), v.trim()))?;
            }
            easy.http_headers(list)?;
        }
        Ok(easy)
    }

    /// HEAD request following redirects; returns the final effective URL.
    ///
    /// After at least one redirect the landing page's status is not checked
    /// (post pages may refuse HEAD with 403 or 429). Without a redirect it must be 2xx.
    pub fn resolve_redirect(&self, url: &str) -> Result<String> {
        let mut easy = self
            .easy(url, &[])
            .and_then(|mut e| e.nobody(true).map(|_| e))
            .map_err(|e| FetchError::transport(url, e))?;
        easy.perform().map_err(|e| FetchError::transport(url, e))?;

        let hops = easy
            .redirect_count()
            .map_err(|e| FetchError::transport(url, e))?;
        if hops == 0 {
            ensure_success(url, &mut easy)?;
        } else if let Ok(code) = easy.response_code() {
            if !status::is_success(code) {
                tracing::debug!(url, status = code, hops, "redirect target refused HEAD");
            }
        }

        let effective = easy
            .effective_url()
            .map_err(|e| FetchError::transport(url, e))?
            .unwrap_or(url)
            .to_string();
        tracing::debug!(from = url, to = %effective, "resolved redirect");
        Ok(effective)
    }

    /// Streams the body of a GET to `sink`, `chunk_size` bytes at a time at most.
    ///
    /// Body bytes are only handed to `sink` when the final response is 2xx, so
    /// an error page never lands in the caller's file. A sink error aborts the
    /// transfer and is returned as `Storage`. Returns the number of bytes delivered.
    pub fn stream_get<F>(
        &self,
        url: &str,
        headers: Headers<'_>,
        chunk_size: usize,
        mut sink: F,
    ) -> Result<u64>
    where
        F: FnMut(&[u8]) -> io::Result<()>,
    {
        let mut easy = self
            .easy(url, headers)
            .and_then(|mut e| e.buffer_size(chunk_size).map(|_| e))
            .map_err(|e| FetchError::transport(url, e))?;

        let status = StatusTracker::default();
        let delivered = Cell::new(0u64);
        let mut sink_err: Option<io::Error> = None;

        let outcome = {
            let mut transfer = easy.transfer();
            transfer
                .header_function(|line| {
                    status.observe(line);
                    true
                })
                .map_err(|e| FetchError::transport(url, e))?;
            transfer
                .write_function(|data| {
                    if !status.is_success() {
                        return Ok(data.len());
                    }
                    match sink(data) {
                        Ok(()) => {
                            delivered.set(delivered.get() + data.len() as u64);
                            Ok(data.len())
                        }
                        Err(e) => {
                            sink_err = Some(e);
                            Ok(0) // abort transfer
                        }
                    }
                })
                .map_err(|e| FetchError::transport(url, e))?;
            transfer.perform()
        };

        if let Some(e) = sink_err {
            return Err(FetchError::Storage(e));
        }
        outcome.map_err(|e| FetchError::transport(url, e))?;
        ensure_success(url, &mut easy)?;
        Ok(delivered.get())
    }

    /// Buffered GET returning the whole body.
    pub fn get_bytes(&self, url: &str, headers: Headers<'_>) -> Result<Vec<u8>> {
        let mut body = Vec::new();
        self.stream_get(url, headers, 16 * 1024, |chunk| {
            body.extend_from_slice(chunk);
            Ok(())
        })?;
        Ok(body)
    }
}

fn ensure_success(url: &str, easy: &mut curl::easy::Easy) -> Result<()> {
    let code = easy
        .response_code()
        .map_err(|e| FetchError::transport(url, e))?;
    if !status::is_success(code) {
        return Err(FetchError::HttpStatus {
            url: url.to_string(),
            status: code,
        });
    }
    Ok(())
}
