//! Media acquisition: descriptor in, files in the media directory out.
//!
//! Every asset is stored under the basename of its URL. A name that already
//! exists is reused without touching the network, which makes repeated
//! requests for the same post cheap. Video with a separate audio track is
//! downloaded into a scratch directory, muxed, and only the merged file is kept.

mod locks;
mod staging;

pub use staging::{Promotion, StagedFile};

use crate::config::RmfConfig;
use crate::error::{FetchError, Result};
use crate::http::HttpClient;
use crate::mux::{FfmpegMuxer, Muxer};
use crate::resolver::{MediaDescriptor, PARTNER_DOMAIN};
use crate::url_model::{host_matches, local_filename, merged_filename, with_video_extension};
use locks::PathLocks;
use std::fs;
use std::path::{Path, PathBuf};

pub struct Acquirer<M = FfmpegMuxer> {
    http: HttpClient,
    media_dir: PathBuf,
    chunk_size: usize,
    partner_referer: Option<String>,
    muxer: M,
    locks: PathLocks,
}

impl Acquirer<FfmpegMuxer> {
    pub fn from_config(cfg: &RmfConfig, media_dir: impl Into<PathBuf>) -> Self {
        Acquirer::new(
            HttpClient::from_config(cfg),
            media_dir,
            cfg.chunk_size_bytes,
            FfmpegMuxer::from_config(cfg),
        )
        .with_partner_referer(cfg.partner.referer.clone())
    }
}

impl<M: Muxer> Acquirer<M> {
    pub fn new(http: HttpClient, media_dir: impl Into<PathBuf>, chunk_size: usize, muxer: M) -> Self {
        Self {
            http,
            media_dir: media_dir.into(),
            chunk_size: chunk_size.max(1),
            partner_referer: None,
            muxer,
            locks: PathLocks::default(),
        }
    }

    /// Referer header for assets on the partner host, which refuses hotlinks without one.
    pub fn with_partner_referer(mut self, referer: impl Into<String>) -> Self {
        let referer = referer.into();
        self.partner_referer = (!referer.trim().is_empty()).then_some(referer);
        self
    }

    pub fn media_dir(&self) -> &Path {
        &self.media_dir
    }

    /// Downloads `url` to `target` unless `target` already exists.
    ///
    /// Returns the basename of `target`. On failure nothing is left at `target`.
    pub fn download_one(&self, url: &str, target: &Path) -> Result<String> {
        let name = target
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                FetchError::InvalidInput(format!("target has no file name: {}", target.display()))
            })?;

        let _guard = self.locks.lock(target);
        if target.exists() {
            tracing::info!(file = %name, "already present, skipping download");
            return Ok(name);
        }

        let dir = match target.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut staged = StagedFile::create_in(dir, &name)?;

        let referer = self.referer_for(url);
        let headers: Vec<(&str, &str)> = referer.map(|r| ("Referer", r)).into_iter().collect();

        tracing::debug!(url, file = %name, "downloading");
        self.http
            .stream_get(url, &headers, self.chunk_size, |chunk| staged.write_chunk(chunk))?;

        let bytes = staged.written();
        match staged.promote(target)? {
            Promotion::Written => tracing::info!(file = %name, bytes, "downloaded"),
            Promotion::AlreadyPresent => {
                tracing::info!(file = %name, "another writer finished first, keeping its copy")
            }
        }
        Ok(name)
    }

    /// Stores every asset of `media` in the media directory and returns their
    /// filenames, in descriptor order.
    pub fn download_media(&self, media: &MediaDescriptor) -> Result<Vec<String>> {
        if !matches!(media, MediaDescriptor::External { .. }) {
            fs::create_dir_all(&self.media_dir)?;
        }

        match media {
            MediaDescriptor::Video {
                video_url,
                audio_url: Some(audio_url),
            } => Ok(vec![self.download_and_mux(video_url, audio_url)?]),
            MediaDescriptor::Video {
                video_url,
                audio_url: None,
            } => {
                let name = with_video_extension(&local_filename(video_url));
                Ok(vec![self.download_one(video_url, &self.media_dir.join(name))?])
            }
            MediaDescriptor::Gif { url } | MediaDescriptor::Image { url } => {
                Ok(vec![self.download_one(url, &self.asset_path(url))?])
            }
            MediaDescriptor::Gallery { urls } => urls
                .iter()
                .map(|url| self.download_one(url, &self.asset_path(url)))
                .collect(),
            MediaDescriptor::External { url } => Err(FetchError::InvalidInput(format!(
                "external link has no downloadable media: {}",
                url
            ))),
        }
    }

    fn asset_path(&self, url: &str) -> PathBuf {
        self.media_dir.join(local_filename(url))
    }

    fn referer_for(&self, url: &str) -> Option<&str> {
        self.partner_referer
            .as_deref()
            .filter(|_| host_matches(url, PARTNER_DOMAIN))
    }

    /// Downloads both tracks into a scratch directory, muxes them and keeps
    /// only `merged_<video name>`.
    fn download_and_mux(&self, video_url: &str, audio_url: &str) -> Result<String> {
        let video_name = with_video_extension(&local_filename(video_url));
        let merged_name = merged_filename(&video_name);
        let merged_path = self.media_dir.join(&merged_name);

        let _guard = self.locks.lock(&merged_path);
        if merged_path.exists() {
            tracing::info!(file = %merged_name, "already present, skipping download");
            return Ok(merged_name);
        }

        let scratch = tempfile::Builder::new()
            .prefix(".mux-")
            .tempdir_in(&self.media_dir)?;
        let video_path = scratch.path().join(&video_name);
        let mut audio_name = local_filename(audio_url);
        if audio_name == video_name {
            audio_name = format!("audio_{}", audio_name);
        }
        let audio_path = scratch.path().join(audio_name);

        self.download_one(video_url, &video_path)?;
        self.download_one(audio_url, &audio_path)?;

        let staged = StagedFile::create_in(&self.media_dir, &merged_name)?;
        let muxed = self.muxer.mux(&video_path, &audio_path, staged.path());
        remove_quietly(&video_path);
        remove_quietly(&audio_path);
        if let Err(e) = muxed {
            tracing::error!(file = %merged_name, "mux failed: {}", e);
            return Err(e);
        }

        match staged.promote(&merged_path)? {
            Promotion::Written => tracing::info!(file = %merged_name, "merged video and audio"),
            Promotion::AlreadyPresent => {
                tracing::info!(file = %merged_name, "another writer finished first, keeping its copy")
            }
        }
        Ok(merged_name)
    }
}

fn remove_quietly(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), "could not remove intermediate file: {}", e);
        }
    }
}
