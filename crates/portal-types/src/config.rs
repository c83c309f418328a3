//! Shell configuration.
//!
//! Resolution order for [`ShellConfig::resolve`]:
//! 1. Built-in fallback (`https://example.com`, allow-list `["example.com"]`)
//! 2. TOML file at `$PORTAL_CONFIG`, or `./portal.toml` when present
//! 3. `PORTAL_URL` / `PORTAL_ALLOWED_DOMAINS` environment overrides

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PortalError, Result};

/// Start URL used when neither the file nor the environment provides one.
pub const DEFAULT_START_URL: &str = "https://example.com";

/// Allow-listed domain used when neither the file nor the environment
/// provides one.
pub const DEFAULT_ALLOWED_DOMAIN: &str = "example.com";

/// Page message that starts the upload flow.
pub const DEFAULT_UPLOAD_MESSAGE: &str = "uploadFile";

/// Environment variable overriding the start URL.
pub const ENV_START_URL: &str = "PORTAL_URL";

/// Environment variable overriding the allow-list (comma separated).
pub const ENV_ALLOWED_DOMAINS: &str = "PORTAL_ALLOWED_DOMAINS";

/// Environment variable pointing at a TOML config file.
pub const ENV_CONFIG_PATH: &str = "PORTAL_CONFIG";

/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "portal.toml";

// ---------------------------------------------------------------------------
// Surface settings
// ---------------------------------------------------------------------------

/// Settings handed to the embedded browser surface at startup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SurfaceSettings {
    pub javascript_enabled: bool,
    pub dom_storage_enabled: bool,
    pub cache_enabled: bool,
    /// Allow the surface to open `file://` resources.
    pub allow_file_access: bool,
    /// Allow scripts on `file://` pages to read other `file://` resources.
    pub allow_file_access_from_file_urls: bool,
    /// Allow scripts on `file://` pages to reach any origin.
    pub allow_universal_access_from_file_urls: bool,
    /// Show the loading indicator before the first load event arrives.
    pub start_in_loading_state: bool,
    pub over_scroll: bool,
}

impl Default for SurfaceSettings {
    fn default() -> Self {
        Self {
            javascript_enabled: true,
            dom_storage_enabled: true,
            cache_enabled: true,
            allow_file_access: true,
            allow_file_access_from_file_urls: true,
            allow_universal_access_from_file_urls: true,
            start_in_loading_state: true,
            over_scroll: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Picker options
// ---------------------------------------------------------------------------

/// Kind of media offered by the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Images,
    Videos,
    All,
}

/// Options for the media selection prompt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerOptions {
    pub media: MediaKind,
    /// Offer the platform crop/edit step after selection.
    pub allows_editing: bool,
    /// Compression quality in `0.0..=1.0`.
    pub quality: f32,
}

impl Default for PickerOptions {
    fn default() -> Self {
        Self {
            media: MediaKind::Images,
            allows_editing: true,
            quality: 1.0,
        }
    }
}

// ---------------------------------------------------------------------------
// ShellConfig
// ---------------------------------------------------------------------------

/// Top-level shell configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Page loaded into the surface at startup.
    pub start_url: String,
    /// Substrings a navigation target must contain to be allowed.
    pub allowed_domains: Vec<String>,
    /// Sentinel page message that triggers the upload flow.
    pub upload_message: String,
    pub surface: SurfaceSettings,
    pub picker: PickerOptions,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            allowed_domains: vec![DEFAULT_ALLOWED_DOMAIN.to_string()],
            upload_message: DEFAULT_UPLOAD_MESSAGE.to_string(),
            surface: SurfaceSettings::default(),
            picker: PickerOptions::default(),
        }
    }
}

impl ShellConfig {
    /// Parse a TOML document. Missing keys keep their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self> {
        let config: Self = toml::from_str(toml_str)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml(&text)
            .map_err(|e| PortalError::Config(format!("{}: {e}", path.display())))
    }

    /// Apply `PORTAL_URL` / `PORTAL_ALLOWED_DOMAINS` overrides.
    ///
    /// A blank `PORTAL_URL` is ignored. `PORTAL_ALLOWED_DOMAINS` replaces the
    /// whole list; entries are trimmed but empty entries are kept as-is.
    pub fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(url) = lookup(ENV_START_URL) {
            let url = url.trim();
            if !url.is_empty() {
                self.start_url = url.to_string();
            }
        }
        if let Some(domains) = lookup(ENV_ALLOWED_DOMAINS) {
            self.allowed_domains = domains.split(',').map(|d| d.trim().to_string()).collect();
        }
    }

    /// Check the values the shell cannot run without.
    pub fn validate(&self) -> Result<()> {
        if self.start_url.trim().is_empty() {
            return Err(PortalError::Config("start_url is empty".into()));
        }
        if self.upload_message.is_empty() {
            return Err(PortalError::Config("upload_message is empty".into()));
        }
        if !(0.0..=1.0).contains(&self.picker.quality) {
            return Err(PortalError::Config(format!(
                "picker.quality {} is outside 0.0..=1.0",
                self.picker.quality
            )));
        }
        Ok(())
    }

    /// Resolve the configuration from the process environment and the
    /// working directory.
    pub fn resolve() -> Result<Self> {
        Self::resolve_with(|key| std::env::var(key).ok(), Path::new("."))
    }

    /// Resolve with an explicit environment lookup and working directory.
    pub fn resolve_with(lookup: impl Fn(&str) -> Option<String>, cwd: &Path) -> Result<Self> {
        let mut config = match config_path(&lookup, cwd) {
            Some(path) => {
                log::info!("Loading config from {}", path.display());
                Self::load(&path)?
            },
            None => {
                log::info!("No config file -- using built-in defaults");
                Self::default()
            },
        };
        config.apply_env(&lookup);
        config.validate()?;

        if config.allowed_domains.is_empty() {
            log::warn!("Allow-list is empty -- every navigation will be blocked");
        } else if config.allowed_domains.iter().any(String::is_empty) {
            log::warn!("Allow-list contains an empty entry -- every navigation will be allowed");
        }
        Ok(config)
    }
}

/// `$PORTAL_CONFIG` wins; otherwise `portal.toml` in `cwd` if it exists.
fn config_path(lookup: &impl Fn(&str) -> Option<String>, cwd: &Path) -> Option<PathBuf> {
    if let Some(path) = lookup(ENV_CONFIG_PATH).filter(|p| !p.trim().is_empty()) {
        return Some(PathBuf::from(path));
    }
    let local = cwd.join(DEFAULT_CONFIG_FILE);
    local.is_file().then_some(local)
}
