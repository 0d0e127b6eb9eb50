use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

/// Browser-like User-Agent; the post API rejects default client agents.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/110.0.0.0 Safari/537.36";

/// Video partner endpoints (optional `[partner]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PartnerConfig {
    /// Temporary-auth endpoint returning `{"token": "..."}`.
    pub auth_url: String,
    /// Base for media lookups; the video id is appended as a path segment.
    pub api_base: String,
    /// Referer sent when downloading partner-hosted assets.
    pub referer: String,
}

impl Default for PartnerConfig {
    fn default() -> Self {
        Self {
            auth_url: "https://api.redgifs.com/v2/auth/temporary".to_string(),
            api_base: "https://api.redgifs.com/v2/gifs".to_string(),
            referer: "https://www.redgifs.com/".to_string(),
        }
    }
}

/// External muxer settings (optional `[mux]` section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MuxConfig {
    /// ffmpeg executable name or absolute path.
    pub ffmpeg_path: String,
    /// Kill the muxer if it runs longer than this.
    pub timeout_secs: u64,
}

impl Default for MuxConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            timeout_secs: 600,
        }
    }
}

/// Global configuration loaded from `~/.config/rmf/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RmfConfig {
    /// Shared media directory. When unset, `~/.local/share/rmf/media` is used.
    pub media_dir: Option<PathBuf>,
    /// User-Agent sent on every request.
    pub user_agent: String,
    /// Chunk size for streamed downloads, in bytes.
    pub chunk_size_bytes: usize,
    /// TCP connect timeout per request.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout (includes body transfer).
    pub request_timeout_secs: u64,
    pub partner: PartnerConfig,
    pub mux: MuxConfig,
}

impl Default for RmfConfig {
    fn default() -> Self {
        Self {
            media_dir: None,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            chunk_size_bytes: 8192,
            connect_timeout_secs: 15,
            request_timeout_secs: 600,
            partner: PartnerConfig::default(),
            mux: MuxConfig::default(),
        }
    }
}

impl RmfConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn mux_timeout(&self) -> Duration {
        Duration::from_secs(self.mux.timeout_secs)
    }

    /// Media directory from config, or the XDG data default.
    pub fn resolve_media_dir(&self) -> Result<PathBuf> {
        if let Some(dir) = &self.media_dir {
            return Ok(dir.clone());
        }
        let xdg_dirs = xdg::BaseDirectories::with_prefix("rmf")?;
        Ok(xdg_dirs.get_data_home().join("media"))
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("rmf")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<RmfConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = RmfConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(&path)?;
    let cfg: RmfConfig = toml::from_str(&data)?;
    Ok(cfg)
}
