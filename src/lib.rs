//! Shipwright - platform build configuration for a native engine
//!
//! This crate derives compiler, assembler, and linker invocation state for
//! cross-compiled engine targets. Each platform module turns a build profile
//! into a concrete set of flags, preprocessor defines, include paths, and
//! toolchain executable paths, accumulated into a shared [`BuildEnv`].

pub mod core;
pub mod platform;
pub mod util;

pub use crate::core::env::{BuildEnv, Define};
pub use crate::core::profile::{Arch, BuildProfile, BuildTarget, Optimize};
pub use platform::host::HostEnv;
pub use platform::sdk::{SdkKind, SdkResolver, XcrunSdkResolver};
pub use platform::Platform;
