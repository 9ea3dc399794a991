//! Configuration file support for Shipwright.
//!
//! Shipwright supports two configuration file locations:
//! - Global: `~/.shipwright/config.toml` - User-wide defaults
//! - Project: `.shipwright/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config, and CLI options
//! override both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::profile::{Arch, BuildProfile, BuildTarget, Optimize};

/// Shipwright configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Build profile defaults
    pub profile: ProfileConfig,

    /// iOS platform settings
    pub ios: IosConfig,
}

/// Build profile defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProfileConfig {
    /// Build target (debug, release, release_debug)
    pub target: Option<BuildTarget>,

    /// Optimization tier (speed, size)
    pub optimize: Option<Optimize>,

    /// Target architecture (normalized to x86_64 or arm64)
    pub arch: Option<String>,

    /// Enable link-time optimization
    pub use_lto: Option<bool>,

    /// Build the full-tooling variant
    pub tools: Option<bool>,

    /// Enable the Vulkan rendering backend
    pub vulkan: Option<bool>,
}

/// iOS platform settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IosConfig {
    /// Path to the iOS toolchain
    pub toolchain_path: Option<PathBuf>,

    /// Path to the iOS SDK
    pub sdk_path: Option<PathBuf>,

    /// Build for the iOS Simulator
    pub simulator: Option<bool>,

    /// Enable exceptions on non-tools builds
    pub exceptions: Option<bool>,

    /// Triple prefix for toolchain executables
    pub triple: Option<String>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("failed to create config directory: {}", parent.display())
            })?;
        }

        let contents =
            toml::to_string_pretty(self).with_context(|| "failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Profile settings
        if other.profile.target.is_some() {
            self.profile.target = other.profile.target;
        }
        if other.profile.optimize.is_some() {
            self.profile.optimize = other.profile.optimize;
        }
        if other.profile.arch.is_some() {
            self.profile.arch = other.profile.arch;
        }
        if other.profile.use_lto.is_some() {
            self.profile.use_lto = other.profile.use_lto;
        }
        if other.profile.tools.is_some() {
            self.profile.tools = other.profile.tools;
        }
        if other.profile.vulkan.is_some() {
            self.profile.vulkan = other.profile.vulkan;
        }

        // iOS settings
        if other.ios.toolchain_path.is_some() {
            self.ios.toolchain_path = other.ios.toolchain_path;
        }
        if other.ios.sdk_path.is_some() {
            self.ios.sdk_path = other.ios.sdk_path;
        }
        if other.ios.simulator.is_some() {
            self.ios.simulator = other.ios.simulator;
        }
        if other.ios.exceptions.is_some() {
            self.ios.exceptions = other.ios.exceptions;
        }
        if other.ios.triple.is_some() {
            self.ios.triple = other.ios.triple;
        }
    }

    /// Apply configured values on top of a build profile.
    pub fn apply(&self, profile: &mut BuildProfile) {
        if let Some(target) = self.profile.target {
            profile.target = target;
        }
        if let Some(optimize) = self.profile.optimize {
            profile.optimize = optimize;
        }
        if let Some(ref arch) = self.profile.arch {
            profile.arch = Arch::from_name(arch);
        }
        if let Some(use_lto) = self.profile.use_lto {
            profile.use_lto = use_lto;
        }
        if let Some(tools) = self.profile.tools {
            profile.tools = tools;
        }
        if let Some(vulkan) = self.profile.vulkan {
            profile.vulkan = vulkan;
        }
        if let Some(ref toolchain_path) = self.ios.toolchain_path {
            profile.toolchain_path = toolchain_path.clone();
        }
        if let Some(ref sdk_path) = self.ios.sdk_path {
            profile.sdk_path = sdk_path.clone();
        }
        if let Some(simulator) = self.ios.simulator {
            profile.simulator = simulator;
        }
        if let Some(exceptions) = self.ios.exceptions {
            profile.exceptions = exceptions;
        }
        if let Some(ref triple) = self.ios.triple {
            profile.triple = triple.clone();
        }
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.shipwright/config.toml)
/// 2. Global config (~/.shipwright/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global shipwright config directory (~/.shipwright).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".shipwright"))
}

/// Get the global config path (~/.shipwright/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.shipwright/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".shipwright").join("config.toml")
}
