//! SDK path resolution.
//!
//! Apple SDK roots are resolved through a collaborator trait so the
//! configuration step stays pure: the real resolver shells out to
//! `xcrun`, tests substitute a fixed path.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};

/// Which Apple SDK variant to resolve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SdkKind {
    /// Physical device SDK (iphoneos)
    Device,
    /// Simulator SDK (iphonesimulator)
    Simulator,
}

impl SdkKind {
    /// The SDK name as understood by `xcrun --sdk`.
    pub fn sdk_name(&self) -> &'static str {
        match self {
            SdkKind::Device => "iphoneos",
            SdkKind::Simulator => "iphonesimulator",
        }
    }
}

/// Resolves the filesystem root of an Apple SDK.
pub trait SdkResolver {
    /// Resolve the SDK root for the given variant.
    fn resolve(&self, kind: SdkKind) -> Result<PathBuf>;
}

/// SDK resolver backed by the `xcrun` tool.
#[derive(Debug, Clone, Default)]
pub struct XcrunSdkResolver;

impl SdkResolver for XcrunSdkResolver {
    fn resolve(&self, kind: SdkKind) -> Result<PathBuf> {
        let xcrun = which::which("xcrun").context(
            "xcrun not found\n\
             \n\
             Resolving an Apple SDK path requires the Xcode command line tools.\n\
             Install them, or set the SDK path explicitly.",
        )?;

        let output = std::process::Command::new(&xcrun)
            .args(["--sdk", kind.sdk_name(), "--show-sdk-path"])
            .output()
            .with_context(|| format!("failed to run {}", xcrun.display()))?;

        if !output.status.success() {
            bail!(
                "xcrun could not locate the {} SDK: {}",
                kind.sdk_name(),
                String::from_utf8_lossy(&output.stderr).trim()
            );
        }

        let path = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if path.is_empty() {
            bail!("xcrun returned an empty path for the {} SDK", kind.sdk_name());
        }

        tracing::debug!("Resolved {} SDK at {}", kind.sdk_name(), path);

        Ok(PathBuf::from(path))
    }
}

/// Resolver that always returns a fixed path. Used in tests and when the
/// SDK location is already known.
#[derive(Debug, Clone)]
pub struct FixedSdkResolver {
    root: PathBuf,
}

impl FixedSdkResolver {
    /// Create a resolver returning `root` for every SDK variant.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        FixedSdkResolver { root: root.into() }
    }
}

impl SdkResolver for FixedSdkResolver {
    fn resolve(&self, _kind: SdkKind) -> Result<PathBuf> {
        Ok(self.root.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sdk_names() {
        assert_eq!(SdkKind::Device.sdk_name(), "iphoneos");
        assert_eq!(SdkKind::Simulator.sdk_name(), "iphonesimulator");
    }

    #[test]
    fn test_fixed_resolver_ignores_kind() {
        let resolver = FixedSdkResolver::new("/opt/ios-sdk");
        assert_eq!(
            resolver.resolve(SdkKind::Device).unwrap(),
            PathBuf::from("/opt/ios-sdk")
        );
        assert_eq!(
            resolver.resolve(SdkKind::Simulator).unwrap(),
            PathBuf::from("/opt/ios-sdk")
        );
    }
}
