//! Host environment capture.
//!
//! Ambient process state consulted during configuration is captured once
//! into a [`HostEnv`] value and threaded into the configuration step,
//! keeping the step itself deterministic and unit-testable.

/// Ambient host state for one configuration pass.
#[derive(Debug, Clone)]
pub struct HostEnv {
    /// Host operating system (`std::env::consts::OS` form, e.g. "macos")
    pub os: String,

    /// Path to a compilation cache wrapper, from `CCACHE`
    pub ccache: Option<String>,

    /// Whether an osxcross iOS toolchain is configured, from `OSXCROSS_IOS`
    pub osxcross_ios: bool,

    /// The host executable search path, from `PATH`
    pub search_path: String,
}

impl HostEnv {
    /// Capture the host environment from the current process.
    pub fn from_process() -> Self {
        HostEnv {
            os: std::env::consts::OS.to_string(),
            ccache: std::env::var("CCACHE").ok(),
            osxcross_ios: std::env::var_os("OSXCROSS_IOS").is_some(),
            search_path: std::env::var("PATH").unwrap_or_default(),
        }
    }
}
