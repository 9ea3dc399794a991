//! Build profile types.
//!
//! This module contains the typed build options a platform configuration
//! step branches on: build target, optimization tier, architecture, and
//! the platform-specific toggles and paths.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default Xcode toolchain location on a macOS host.
pub const DEFAULT_IOS_TOOLCHAIN_PATH: &str =
    "/Applications/Xcode.app/Contents/Developer/Toolchains/XcodeDefault.xctoolchain";

/// The build target kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum BuildTarget {
    /// Debug build (default)
    #[default]
    Debug,
    /// Optimized release build
    Release,
    /// Release build with debugger-friendly optimization
    ReleaseDebug,
}

impl BuildTarget {
    /// Get the target name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildTarget::Debug => "debug",
            BuildTarget::Release => "release",
            BuildTarget::ReleaseDebug => "release_debug",
        }
    }

    /// Whether this is a release-like target (release or release_debug).
    pub fn is_release(&self) -> bool {
        matches!(self, BuildTarget::Release | BuildTarget::ReleaseDebug)
    }
}

impl std::str::FromStr for BuildTarget {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "debug" => Ok(BuildTarget::Debug),
            "release" => Ok(BuildTarget::Release),
            "release_debug" => Ok(BuildTarget::ReleaseDebug),
            _ => Err(ProfileParseError {
                field: "target",
                value: s.to_string(),
                valid: "debug, release, release_debug",
            }),
        }
    }
}

impl std::fmt::Display for BuildTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Optimization tier for release-like targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Optimize {
    /// Optimize for speed (default)
    #[default]
    Speed,
    /// Optimize for binary size
    Size,
}

impl Optimize {
    /// Get the tier name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Optimize::Speed => "speed",
            Optimize::Size => "size",
        }
    }
}

impl std::str::FromStr for Optimize {
    type Err = ProfileParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "speed" => Ok(Optimize::Speed),
            "size" => Ok(Optimize::Size),
            _ => Err(ProfileParseError {
                field: "optimize",
                value: s.to_string(),
                valid: "speed, size",
            }),
        }
    }
}

impl std::fmt::Display for Optimize {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Target CPU architecture.
///
/// iOS targets are 64-bit only, so this is always exactly one of the two
/// supported values after normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Arch {
    /// x86_64 (simulator on Intel hosts)
    X86_64,
    /// arm64 (devices, simulator on Apple Silicon)
    #[default]
    Arm64,
}

impl Arch {
    /// Normalize an architecture name.
    ///
    /// Anything that is not exactly `x86_64` collapses to `arm64`.
    pub fn from_name(s: &str) -> Arch {
        if s == "x86_64" {
            Arch::X86_64
        } else {
            Arch::Arm64
        }
    }

    /// Get the architecture name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Arch::X86_64 => "x86_64",
            Arch::Arm64 => "arm64",
        }
    }
}

impl std::str::FromStr for Arch {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Arch::from_name(s))
    }
}

impl std::fmt::Display for Arch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error returned when parsing an invalid profile option string.
#[derive(Debug, Clone, Error)]
#[error("invalid {field} '{value}', valid values: {valid}")]
pub struct ProfileParseError {
    pub field: &'static str,
    pub value: String,
    pub valid: &'static str,
}

/// Complete build profile for one configuration pass.
///
/// Populated by the build orchestrator from config files and CLI options
/// before the platform configuration step runs.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildProfile {
    /// Build target kind
    pub target: BuildTarget,

    /// Optimization tier for release-like targets
    pub optimize: Optimize,

    /// Target CPU architecture
    pub arch: Arch,

    /// Enable link-time optimization
    pub use_lto: bool,

    /// Build the full-tooling (editor) variant
    pub tools: bool,

    /// Enable the Vulkan rendering backend
    pub vulkan: bool,

    /// Build for the iOS Simulator
    pub simulator: bool,

    /// Enable C++ exceptions on non-tools builds
    pub exceptions: bool,

    /// Path to the iOS toolchain
    pub toolchain_path: PathBuf,

    /// Path to the iOS SDK (empty = resolve via the SDK resolver)
    pub sdk_path: PathBuf,

    /// Triple prefix for toolchain executables (empty on native hosts)
    pub triple: String,
}

impl Default for BuildProfile {
    fn default() -> Self {
        BuildProfile {
            target: BuildTarget::default(),
            optimize: Optimize::default(),
            arch: Arch::default(),
            use_lto: false,
            tools: false,
            vulkan: false,
            simulator: false,
            exceptions: false,
            toolchain_path: PathBuf::from(DEFAULT_IOS_TOOLCHAIN_PATH),
            sdk_path: PathBuf::new(),
            triple: String::new(),
        }
    }
}
