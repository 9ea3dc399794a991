//! Core data structures for Shipwright.
//!
//! This module contains the foundational types used throughout Shipwright:
//! - The build environment accumulator (flags, defines, tool paths)
//! - The build profile (target, optimization tier, architecture, toggles)

pub mod env;
pub mod profile;

pub use env::{BuildEnv, Define};
pub use profile::{Arch, BuildProfile, BuildTarget, Optimize};
