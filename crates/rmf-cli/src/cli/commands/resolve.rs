//! `rmf resolve` – print the media descriptor for a post link.

use anyhow::{bail, Result};
use rmf_core::api::CurlSourceApi;
use rmf_core::config::RmfConfig;
use rmf_core::resolver::Resolver;

pub fn run_resolve(cfg: &RmfConfig, url: &str) -> Result<()> {
    let resolver = Resolver::new(CurlSourceApi::from_config(cfg));
    let Some(media) = resolver.resolve(url) else {
        bail!("no media found for {}", url);
    };
    println!("{}", serde_json::to_string_pretty(&media)?);
    Ok(())
}
