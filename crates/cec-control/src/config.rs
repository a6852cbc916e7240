//! TOML-based configuration for the controller.
//!
//! Reads `ControllerConfig` from the platform-appropriate config file:
//! - Linux:    `~/.config/cec-pilot/config.toml`
//! - macOS:    `~/Library/Application Support/CecPilot/config.toml`
//! - Windows:  `%APPDATA%\CecPilot\config.toml`
//!
//! Every field carries a serde default, so a missing or partial file still
//! produces a working configuration (first run, or upgrades from an older
//! file).  Address fields are kept as plain strings/integers here and
//! validated through `cec-core` when the controller is constructed.

use std::collections::HashMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration file operations.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The platform config directory could not be determined.
    #[error("could not determine platform config directory")]
    NoPlatformConfigDir,

    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The TOML content could not be parsed.
    #[error("failed to parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Controller configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ControllerConfig {
    /// Name (or path) of the adapter executable.
    #[serde(default = "default_adapter_binary")]
    pub adapter_binary: String,
    /// Startup flags placing the adapter in single-device control mode.
    #[serde(default = "default_adapter_args")]
    pub adapter_args: Vec<String>,
    /// Logical address of the controlled device (0 = TV).
    #[serde(default)]
    pub target_address: i64,
    /// Logical address this controller transmits from (4 = playback device).
    #[serde(default = "default_source_address")]
    pub source_address: i64,
    /// Own physical address, in any accepted form (`"1.0.0.0"`, `"1000"`, ...).
    #[serde(default = "default_physical_address")]
    pub physical_address: String,
    /// OSD name reported to the TV.
    #[serde(default = "default_osd_name")]
    pub osd_name: String,
    /// Three-byte vendor id used for `VendorCommandWithId` frames.
    #[serde(default = "default_vendor_id")]
    pub vendor_id: [u8; 3],
    /// Per-call adapter timeout in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Custom key-map entries, merged over the built-in table (name → code).
    #[serde(default)]
    pub key_overrides: HashMap<String, u8>,
    /// `tracing` log level: `"error"`, `"warn"`, `"info"`, `"debug"`, `"trace"`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

// ── Default helpers ───────────────────────────────────────────────────────────

fn default_adapter_binary() -> String {
    "cec-client".to_string()
}
fn default_adapter_args() -> Vec<String> {
    // -s: single command mode, -d 1: log errors only.
    vec!["-s".to_string(), "-d".to_string(), "1".to_string()]
}
fn default_source_address() -> i64 {
    4
}
fn default_physical_address() -> String {
    "1.0.0.0".to_string()
}
fn default_osd_name() -> String {
    "CEC-Pilot".to_string()
}
fn default_vendor_id() -> [u8; 3] {
    [0x00, 0x00, 0xF0]
}
fn default_timeout_ms() -> u64 {
    10_000
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            adapter_binary: default_adapter_binary(),
            adapter_args: default_adapter_args(),
            target_address: 0,
            source_address: default_source_address(),
            physical_address: default_physical_address(),
            osd_name: default_osd_name(),
            vendor_id: default_vendor_id(),
            timeout_ms: default_timeout_ms(),
            key_overrides: HashMap::new(),
            log_level: default_log_level(),
        }
    }
}

// ── Loading ───────────────────────────────────────────────────────────────────

/// Resolves the full path to the config file.
///
/// # Errors
///
/// Returns [`ConfigError::NoPlatformConfigDir`] if the base directory cannot
/// be determined from the environment.
pub fn config_file_path() -> Result<PathBuf, ConfigError> {
    platform_config_dir()
        .map(|dir| dir.join("config.toml"))
        .ok_or(ConfigError::NoPlatformConfigDir)
}

/// Loads the configuration from `path`, returning defaults if the file does
/// not exist.
///
/// # Errors
///
/// Returns [`ConfigError::Io`] for file-system errors other than "not found"
/// and [`ConfigError::Parse`] if the TOML is malformed.
pub fn load_from_path(path: &std::path::Path) -> Result<ControllerConfig, ConfigError> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(toml::from_str(&content)?),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(ControllerConfig::default()),
        Err(e) => Err(ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

/// Resolves the platform config base directory.
fn platform_config_dir() -> Option<PathBuf> {
    #[cfg(target_os = "windows")]
    {
        std::env::var_os("APPDATA").map(|p| PathBuf::from(p).join("CecPilot"))
    }

    #[cfg(target_os = "linux")]
    {
        let base = std::env::var_os("XDG_CONFIG_HOME")
            .map(PathBuf::from)
            .or_else(|| std::env::var_os("HOME").map(|h| PathBuf::from(h).join(".config")))?;
        Some(base.join("cec-pilot"))
    }

    #[cfg(target_os = "macos")]
    {
        std::env::var_os("HOME").map(|h| {
            PathBuf::from(h)
                .join("Library")
                .join("Application Support")
                .join("CecPilot")
        })
    }

    #[cfg(not(any(target_os = "windows", target_os = "linux", target_os = "macos")))]
    {
        None
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
