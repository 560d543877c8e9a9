//! User configuration: `~/.config/gitaddons/config.toml`

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, bail};
use etcetera::base_strategy::{BaseStrategy, choose_base_strategy};
use serde::{Deserialize, Serialize};

use crate::git::DEFAULT_REMOTE;

/// Override for user config path, set via --config CLI flag
static CONFIG_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Set the user config path override (called from CLI --config flag)
pub fn set_config_path(path: PathBuf) {
    CONFIG_PATH.set(path).ok();
}

/// Personal preferences for gitaddons.
///
/// Sources, later overriding earlier:
/// 1. Defaults
/// 2. The config file ([`get_config_path`])
/// 3. `GITADDONS_*` environment variables
///
/// ```toml
/// remote = "origin"
/// fetch = true
/// rebase = true
///
/// [who]
/// since = "1 week ago"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct UserConfig {
    /// Remote whose branches are offered and whose default branch is the rebase upstream
    pub remote: String,
    /// Run `git fetch <remote>` before listing branches
    pub fetch: bool,
    /// Rebase onto the remote default branch after switching
    pub rebase: bool,
    pub who: WhoConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", deny_unknown_fields, default)]
pub struct WhoConfig {
    /// Default `--since` for `gitaddons who`, in any format `git log` accepts
    pub since: String,
}

impl Default for UserConfig {
    fn default() -> Self {
        Self {
            remote: DEFAULT_REMOTE.to_string(),
            fetch: true,
            rebase: true,
            who: WhoConfig::default(),
        }
    }
}

impl Default for WhoConfig {
    fn default() -> Self {
        Self {
            since: "1 week ago".to_string(),
        }
    }
}

impl UserConfig {
    /// Load configuration from the config file and environment variables.
    pub fn load() -> anyhow::Result<Self> {
        let mut config = match get_config_path() {
            Some(path) if path.exists() => Self::load_from_file(&path)?,
            Some(path) => {
                log::debug!("No user config at {}", path.display());
                Self::default()
            }
            None => Self::default(),
        };
        config.apply_env(|key| std::env::var(key).ok())?;
        config.validate()?;
        Ok(config)
    }

    fn load_from_file(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Apply `GITADDONS_*` overrides. `lookup` stands in for `std::env::var`.
    fn apply_env(&mut self, lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<()> {
        if let Some(remote) = lookup("GITADDONS_REMOTE") {
            self.remote = remote;
        }
        if let Some(value) = lookup("GITADDONS_FETCH") {
            self.fetch = parse_bool("GITADDONS_FETCH", &value)?;
        }
        if let Some(value) = lookup("GITADDONS_REBASE") {
            self.rebase = parse_bool("GITADDONS_REBASE", &value)?;
        }
        if let Some(since) = lookup("GITADDONS_WHO_SINCE") {
            self.who.since = since;
        }
        Ok(())
    }

    fn validate(&self) -> anyhow::Result<()> {
        if self.remote.is_empty() || self.remote.chars().any(char::is_whitespace) {
            bail!("remote must be a remote name, got {:?}", self.remote);
        }
        if self.who.since.trim().is_empty() {
            bail!("who.since cannot be empty");
        }
        Ok(())
    }

    /// Load configuration from a TOML string for testing.
    #[cfg(test)]
    fn load_from_str(content: &str) -> anyhow::Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }
}

fn parse_bool(key: &str, value: &str) -> anyhow::Result<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => bail!("{key} must be true or false, got {value:?}"),
    }
}

pub fn get_config_path() -> Option<PathBuf> {
    // Priority 1: CLI --config flag
    if let Some(path) = CONFIG_PATH.get() {
        return Some(path.clone());
    }

    // Priority 2: Environment variable (also used by tests)
    if let Ok(path) = std::env::var("GITADDONS_CONFIG_PATH") {
        return Some(PathBuf::from(path));
    }

    // XDG on Linux and macOS, %APPDATA% on Windows
    let strategy = choose_base_strategy().ok()?;
    Some(strategy.config_dir().join("gitaddons").join("config.toml"))
}
