//! hubctl configuration management

use anyhow::{Context, Result, anyhow};
use protocol::MatchMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];
const VALID_LIBUSB_LEVELS: [&str; 5] = ["none", "error", "warning", "info", "debug"];

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HubctlConfig {
    #[serde(default)]
    pub general: GeneralSettings,
    #[serde(default)]
    pub transfer: TransferSettings,
    #[serde(default)]
    pub matching: MatchSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "GeneralSettings::default_log_level")]
    pub log_level: String,
    /// libusb's own debug output (none, error, warning, info, debug)
    #[serde(default = "GeneralSettings::default_libusb_debug")]
    pub libusb_debug: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: Self::default_log_level(),
            libusb_debug: Self::default_libusb_debug(),
        }
    }
}

impl GeneralSettings {
    fn default_log_level() -> String {
        "info".to_string()
    }

    fn default_libusb_debug() -> String {
        "info".to_string()
    }

    /// Map the configured libusb level onto rusb's
    pub fn libusb_log_level(&self) -> rusb::LogLevel {
        match self.libusb_debug.as_str() {
            "none" => rusb::LogLevel::None,
            "error" => rusb::LogLevel::Error,
            "warning" => rusb::LogLevel::Warning,
            "debug" => rusb::LogLevel::Debug,
            _ => rusb::LogLevel::Info,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransferSettings {
    /// Control transfer timeout in milliseconds
    #[serde(default = "TransferSettings::default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for TransferSettings {
    fn default() -> Self {
        Self {
            timeout_ms: Self::default_timeout_ms(),
        }
    }
}

impl TransferSettings {
    fn default_timeout_ms() -> u64 {
        2000
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MatchSettings {
    /// "either" (vendor or product) or "both"
    #[serde(default)]
    pub mode: MatchMode,
}

impl HubctlConfig {
    /// Load configuration from file
    ///
    /// With no explicit path the standard locations are tried in order.
    pub fn load(path: Option<PathBuf>) -> Result<Self> {
        let config_path = if let Some(p) = path {
            p
        } else {
            let candidates = vec![
                Self::default_path(),
                PathBuf::from("/etc/hubctl/hubctl.toml"),
            ];

            candidates
                .into_iter()
                .find(|p| p.exists())
                .ok_or_else(|| anyhow!("No configuration file found, using defaults"))?
        };

        let content = fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;

        let config: HubctlConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", config_path.display()))?;

        config.validate()?;

        tracing::debug!("Loaded configuration from: {}", config_path.display());
        Ok(config)
    }

    /// Load configuration from the standard locations, falling back to defaults
    pub fn load_or_default() -> Self {
        match Self::load(None) {
            Ok(config) => config,
            Err(e) => {
                tracing::debug!("Failed to load config: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save configuration to the specified path
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self).context("Failed to serialize configuration")?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        tracing::info!("Saved configuration to: {}", path.display());
        Ok(())
    }

    /// Get the default configuration file path
    pub fn default_path() -> PathBuf {
        if let Some(config_dir) = dirs::config_dir() {
            config_dir.join("hubctl").join("hubctl.toml")
        } else {
            PathBuf::from(".config/hubctl/hubctl.toml")
        }
    }

    /// Apply command line overrides and validate the result
    pub fn with_overrides(
        mut self,
        log_level: Option<&str>,
        timeout_ms: Option<u64>,
        mode: Option<MatchMode>,
    ) -> Result<Self> {
        if let Some(level) = log_level {
            self.general.log_level = level.to_string();
        }
        if let Some(timeout_ms) = timeout_ms {
            self.transfer.timeout_ms = timeout_ms;
        }
        if let Some(mode) = mode {
            self.matching.mode = mode;
        }

        self.validate()?;
        Ok(self)
    }

    /// Validate configuration values
    pub(crate) fn validate(&self) -> Result<()> {
        if !VALID_LOG_LEVELS.contains(&self.general.log_level.as_str()) {
            return Err(anyhow!(
                "Invalid log level '{}', must be one of: {}",
                self.general.log_level,
                VALID_LOG_LEVELS.join(", ")
            ));
        }

        if !VALID_LIBUSB_LEVELS.contains(&self.general.libusb_debug.as_str()) {
            return Err(anyhow!(
                "Invalid libusb debug level '{}', must be one of: {}",
                self.general.libusb_debug,
                VALID_LIBUSB_LEVELS.join(", ")
            ));
        }

        if self.transfer.timeout_ms == 0 {
            return Err(anyhow!("Transfer timeout must be greater than 0"));
        }

        Ok(())
    }
}

/// Load config from a user-supplied path, expanding `~`
pub fn load_config(path: &str) -> Result<HubctlConfig> {
    let path_buf = PathBuf::from(shellexpand::tilde(path).as_ref());
    HubctlConfig::load(Some(path_buf))
}
