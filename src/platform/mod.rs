//! Platform configuration modules.
//!
//! Each platform exposes the same surface to the build orchestrator:
//! whether it is selectable, whether the current host can build for it,
//! which options it accepts, and the configuration step that derives its
//! flag set into a [`BuildEnv`](crate::core::env::BuildEnv).
//!
//! Only iOS is implemented here; the trait is the seam for the other
//! platform modules of the engine build.

use anyhow::Result;

use crate::core::env::BuildEnv;
use crate::core::profile::BuildProfile;

pub mod host;
pub mod ios;
pub mod options;
pub mod sdk;

pub use host::HostEnv;
pub use ios::IosPlatform;
pub use options::{OptionDefault, OptionInfo};
pub use sdk::{SdkKind, SdkResolver, XcrunSdkResolver};

/// A buildable target platform.
pub trait Platform {
    /// Whether this platform is active/selectable in the build graph.
    fn is_active(&self) -> bool;

    /// Display name of the platform.
    fn name(&self) -> &'static str;

    /// Whether the current host is capable of building for this platform.
    fn can_build(&self, host: &HostEnv) -> bool;

    /// Configuration options this platform accepts, with defaults.
    fn options(&self) -> Vec<OptionInfo>;

    /// Default feature flags this platform requests from the shared build graph.
    fn default_flags(&self) -> Vec<(&'static str, bool)>;

    /// Derive the platform's flag set into the build environment.
    ///
    /// Append-only: the environment is created by the caller and only
    /// gains entries here.
    fn configure(
        &self,
        profile: &BuildProfile,
        host: &HostEnv,
        sdk: &dyn SdkResolver,
        env: &mut BuildEnv,
    ) -> Result<()>;
}

/// All known platforms.
pub fn all() -> Vec<Box<dyn Platform>> {
    vec![Box::new(IosPlatform)]
}

/// Look up a platform by display name (case-insensitive).
pub fn by_name(name: &str) -> Option<Box<dyn Platform>> {
    all()
        .into_iter()
        .find(|p| p.name().eq_ignore_ascii_case(name))
}
