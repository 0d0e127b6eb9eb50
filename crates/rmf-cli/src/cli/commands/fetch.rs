//! `rmf fetch` – resolve a post link and download its media.

use anyhow::{bail, Context, Result};
use rmf_core::acquire::Acquirer;
use rmf_core::api::CurlSourceApi;
use rmf_core::config::RmfConfig;
use rmf_core::resolver::Resolver;
use std::path::PathBuf;

pub fn run_fetch(cfg: &RmfConfig, url: &str, media_dir: Option<PathBuf>) -> Result<()> {
    let media_dir = match media_dir {
        Some(dir) => dir,
        None => cfg.resolve_media_dir()?,
    };

    let resolver = Resolver::new(CurlSourceApi::from_config(cfg));
    let Some(media) = resolver.resolve(url) else {
        bail!("no media found for {}", url);
    };

    let acquirer = Acquirer::from_config(cfg, &media_dir);
    let files = acquirer
        .download_media(&media)
        .with_context(|| format!("failed to download {} media", media.kind()))?;

    for name in files {
        println!("{}", media_dir.join(name).display());
    }
    Ok(())
}
