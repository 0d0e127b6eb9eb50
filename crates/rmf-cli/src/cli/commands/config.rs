//! `rmf config` – show where the config lives and what is in effect.

use anyhow::Result;
use rmf_core::config::{self, RmfConfig};

pub fn run_config(cfg: &RmfConfig) -> Result<()> {
    println!("# {}", config::config_path()?.display());
    println!("# media dir: {}", cfg.resolve_media_dir()?.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
